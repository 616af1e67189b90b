//! HTTP surface.
//!
//! Pages and the JSON API share one router built by `app_router()`. The
//! router is composable, so tests drive it in-process with `oneshot` and
//! `server` runs it on a real socket.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod server;
pub mod types;

pub use router::app_router;
pub use server::{start_server_on, ServerError, ServerHandle, ServerSession};
pub use types::AppContext;
