//! Shared constants for the canvas crate.

/// Width of a freshly created canvas, matching the HTML default.
pub const DEFAULT_WIDTH: u32 = 300;

/// Height of a freshly created canvas, matching the HTML default.
pub const DEFAULT_HEIGHT: u32 = 150;

/// Transparent black; every pixel holds this after a resize.
pub const CLEAR: [u8; 4] = [0, 0, 0, 0];
