//! RECORD extension plumbing.
//!
//! Recording needs two connections to the X server:
//!
//! - the **observer** connection answers keyboard-mapping queries and issues
//!   every control request (create, disable, free);
//! - the **recorder** connection is handed to `EnableContext` and then
//!   blocks, receiving one reply per batch of intercepted events until the
//!   context is disabled.
//!
//! A context can only be disabled from a connection other than the one
//! recording it, which is why `disable_context` must be callable from any
//! thread while `enable_context` is blocked on another.
//!
//! # Testability
//!
//! The [`RecordBackend`] trait lets tests feed synthetic replies through
//! [`mock::MockRecordBackend`] without an X server.

use thiserror::Error;
use xtap_core::{KeyboardMapping, RecordReply};

pub mod mock;
pub mod x11;

/// Server-side id of a RECORD context.
pub type ContextId = u32;

/// Error type for backend operations.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("cannot connect to X display: {0}")]
    Connect(String),

    #[error("X server does not support the RECORD extension")]
    ExtensionMissing,

    /// The server rejected a request.
    #[error("X protocol error: {0}")]
    Protocol(String),

    /// The connection broke while in use.
    #[error("connection to X server lost: {0}")]
    ConnectionLost(String),

    /// A blocking receive was interrupted by a signal.
    #[error("receive interrupted")]
    Interrupted,
}

/// The observer/recorder connection pair, seen from the logger.
///
/// Implementations must tolerate `disable_context` being called from one
/// thread while `enable_context` blocks on another.
pub trait RecordBackend: Send + Sync + 'static {
    /// Fetches the current keycode → keysym table.
    fn keyboard_mapping(&self) -> Result<KeyboardMapping, RecordError>;

    /// Creates a context recording the device events (KeyPress through
    /// MotionNotify) of all clients.
    fn create_context(&self) -> Result<ContextId, RecordError>;

    /// Enables `context` and blocks, passing every reply to `sink` in the
    /// order received.
    ///
    /// Returns `Ok(())` once the `EndOfData` reply following a disable has
    /// been delivered.
    fn enable_context(
        &self,
        context: ContextId,
        sink: &mut dyn FnMut(RecordReply),
    ) -> Result<(), RecordError>;

    /// Asks the server to stop recording `context`.  Flushed immediately.
    fn disable_context(&self, context: ContextId) -> Result<(), RecordError>;

    /// Releases `context` on the server.
    fn free_context(&self, context: ContextId) -> Result<(), RecordError>;
}
