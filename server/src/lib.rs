//! Backend for the frame viewer: issues HS256 stream tokens and pushes a
//! synthetic MJPEG scene over token-authenticated WebSockets.

pub mod config;
pub mod routes;
pub mod scene;
pub mod state;
pub mod token;

pub use config::{ConfigError, StreamConfig};
pub use routes::{app, serve};
pub use state::AppState;
