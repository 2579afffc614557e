//! Streaming viewer: fetch a bearer token, open a token-authenticated
//! WebSocket, and draw the binary image frames it delivers onto a canvas.
//!
//! | Module | Role |
//! |--------|------|
//! | [`auth`] | Token request against `/auth/token` |
//! | [`connector`] | One WebSocket connection and its lifecycle task |
//! | [`render`] | Latest-frame renderer with a single in-flight draw |
//! | [`page`] | Page state tying the three together |
//! | [`status`] | Status label shared by the auth and stream flows |
//! | [`origin`] | Scheme/host resolution for HTTP and WebSocket URLs |

pub mod auth;
pub mod connector;
pub mod error;
pub mod origin;
pub mod page;
pub mod render;
pub mod status;

pub use error::ClientError;
pub use origin::Origin;
pub use page::{ConnectOutcome, Page};
pub use render::{DrawOutcome, Renderer};
pub use status::{STATUS_PREFIX, Status, StatusLabel};
