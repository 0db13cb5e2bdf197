//! WebSocket broadcast sessions.
//!
//! Each subscriber gets its own task and timer ([`BroadcastSession`]); the
//! [`SessionRegistry`] only tracks which sessions are alive so health checks
//! and shutdown can see them.

mod handler;
pub mod registry;
pub mod session;

pub use handler::ws_handler;
pub use registry::SessionRegistry;
pub use session::{BroadcastSession, SessionEnd, SnapshotSink, TransportError};
