//! Pixel surface the viewer draws decoded frames onto.
//!
//! The surface follows the semantics of an HTML `<canvas>` element closely
//! enough that the frame renderer can treat it the same way: it starts at
//! 300×150, assigning a new size discards the current contents, and images
//! are drawn at an offset with anything outside the surface clipped.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`surface`] | The [`Canvas`] pixel buffer and its drawing operations |
//! | [`consts`] | Default dimensions and the cleared pixel value |

pub mod consts;
pub mod surface;

pub use surface::{Canvas, SurfaceError};
