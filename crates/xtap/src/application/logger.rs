//! The logger: recording lifecycle and observer delivery.
//!
//! A [`Logger`] owns one backend (the observer/recorder connection pair) and
//! the registered observers.  [`Logger::run`] blocks the calling thread:
//!
//! ```text
//! Idle ──run()──▶ refresh keymap ─▶ create context ─▶ publish id ─▶ enable
//!                                                                    │
//!   ◀── free context ◀── EndOfData / fault / interrupt ◀── replies ◀─┘
//! ```
//!
//! Stopping is done from anywhere through a [`StopHandle`]: it raises the
//! stop flag and, if a context id has been published, disables that context
//! on the observer connection.  The server answers with `EndOfData`, which
//! ends the blocking receive.  A stop that lands before the id is published
//! is picked up when the `StartOfData` reply arrives.
//!
//! Observers run on the recording thread, one event at a time, in server
//! order.  Modifier and pointer state belong to a single run; every
//! `run()` starts from a clean slate.

use std::fmt;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use tracing::{debug, warn};
use xtap_core::{Dispatcher, EventHandler, KeyEvent, MouseEvent, Observers, RecordReply, ReplyCategory};

use crate::infrastructure::record::{x11::X11Backend, ContextId, RecordBackend, RecordError};

const THREAD_NAME: &str = "xtap-record";

/// Failure to build a logger.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot connect to X display: {0}")]
    Connect(String),

    #[error("X server does not support the RECORD extension")]
    RecordExtensionMissing,

    #[error("X protocol error during setup: {0}")]
    Protocol(String),
}

impl From<RecordError> for SetupError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Connect(message) => Self::Connect(message),
            RecordError::ExtensionMissing => Self::RecordExtensionMissing,
            other => Self::Protocol(other.to_string()),
        }
    }
}

/// Error type for logger operations.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The X connection failed while recording.
    #[error("connection fault while recording: {0}")]
    ConnectionFault(String),

    #[error("failed to spawn recording thread: {0}")]
    ThreadSpawn(String),

    #[error("recording thread panicked")]
    ThreadPanicked,
}

// ── Run state ─────────────────────────────────────────────────────────────────

/// State shared between a logger and its stop handles.
#[derive(Debug, Default)]
struct RunState {
    running: AtomicBool,
    stop_requested: AtomicBool,
    context: Mutex<Option<ContextId>>,
}

impl RunState {
    fn begin(&self) {
        self.stop_requested.store(false, Ordering::SeqCst);
        self.running.store(true, Ordering::SeqCst);
    }

    fn finish(&self) {
        self.slot().take();
        self.running.store(false, Ordering::SeqCst);
    }

    fn publish(&self, context: ContextId) {
        *self.slot() = Some(context);
    }

    fn take_context(&self) -> Option<ContextId> {
        self.slot().take()
    }

    fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    fn slot(&self) -> MutexGuard<'_, Option<ContextId>> {
        self.context.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct IdleOnDrop(Arc<RunState>);

impl Drop for IdleOnDrop {
    fn drop(&mut self) {
        self.0.finish();
    }
}

// ── StopHandle ────────────────────────────────────────────────────────────────

/// Cloneable, thread-safe handle that stops a running logger.
#[derive(Clone)]
pub struct StopHandle {
    state: Arc<RunState>,
    backend: Arc<dyn RecordBackend>,
}

impl StopHandle {
    /// Requests the current run to end.
    ///
    /// Idempotent, never fails, and a no-op while the logger is idle.  Does
    /// not wait for the run to finish.
    pub fn stop(&self) {
        self.state.stop_requested.store(true, Ordering::SeqCst);
        if let Some(context) = self.state.take_context() {
            debug!(context, "disabling recording context");
            if let Err(e) = self.backend.disable_context(context) {
                warn!(context, error = %e, "failed to disable recording context");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StopHandle")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// ── Logger ────────────────────────────────────────────────────────────────────

/// Global keyboard and mouse logger.
pub struct Logger<B: RecordBackend = X11Backend> {
    backend: Arc<B>,
    state: Arc<RunState>,
    observers: Observers,
}

impl Logger<X11Backend> {
    /// Connects to the display named by `$DISPLAY`.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Setup`] if the display is unreachable or lacks
    /// the RECORD extension.
    pub fn new() -> Result<Self, LoggerError> {
        Self::connect(None)
    }

    /// Connects to `display`, or `$DISPLAY` when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::Setup`] if the display is unreachable or lacks
    /// the RECORD extension.
    pub fn connect(display: Option<&str>) -> Result<Self, LoggerError> {
        let backend = X11Backend::open(display).map_err(SetupError::from)?;
        Ok(Self::with_backend(backend))
    }
}

impl<B: RecordBackend> Logger<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            state: Arc::new(RunState::default()),
            observers: Observers::new(),
        }
    }

    /// Registers the keyboard observer, replacing any previous one.
    pub fn on_keyboard<F>(&mut self, callback: F)
    where
        F: FnMut(KeyEvent) + Send + 'static,
    {
        self.observers.on_keyboard(callback);
    }

    /// Registers the mouse observer, replacing any previous one.
    pub fn on_mouse<F>(&mut self, callback: F)
    where
        F: FnMut(MouseEvent) + Send + 'static,
    {
        self.observers.on_mouse(callback);
    }

    /// Registers `handler` as both keyboard and mouse observer.
    pub fn set_handler<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.observers.set_handler(handler);
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            state: Arc::clone(&self.state),
            backend: self.backend.clone(),
        }
    }

    /// Same as [`StopHandle::stop`].
    pub fn stop(&self) {
        self.stop_handle().stop();
    }

    pub fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    /// Records until stopped, delivering events to the observers on the
    /// calling thread.
    ///
    /// Returns `Ok(())` after a stop or an interrupted receive.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::ConnectionFault`] if the X connection fails.
    pub fn run(&mut self) -> Result<(), LoggerError> {
        self.state.begin();
        self.run_started()
    }

    /// Runs the logger on a background thread.
    ///
    /// The run is marked as started before this returns, so stopping the
    /// returned guard right away is never lost.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::ThreadSpawn`] if the thread cannot be created.
    pub fn spawn(self) -> Result<LoggerGuard, LoggerError> {
        let handle = self.stop_handle();
        self.state.begin();

        let mut logger = self;
        let thread = thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || logger.run_started())
            .map_err(|e| {
                handle.state.finish();
                LoggerError::ThreadSpawn(e.to_string())
            })?;

        Ok(LoggerGuard {
            handle,
            thread: Some(thread),
        })
    }

    fn run_started(&mut self) -> Result<(), LoggerError> {
        // Back to idle even if an observer panics.
        let _idle = IdleOnDrop(Arc::clone(&self.state));
        let result = self.record();
        debug!(ok = result.is_ok(), "logger idle");
        result
    }

    fn record(&mut self) -> Result<(), LoggerError> {
        let mapping = match self.backend.keyboard_mapping() {
            Ok(mapping) => mapping,
            Err(e) => return run_outcome(e),
        };
        debug!(keycodes = mapping.keycode_count(), "keyboard mapping refreshed");
        let mut dispatcher = Dispatcher::new(mapping);

        let context = match self.backend.create_context() {
            Ok(context) => context,
            Err(e) => return run_outcome(e),
        };
        self.state.publish(context);
        debug!(context, "recording context created");

        let backend = &*self.backend;
        let state = &*self.state;
        let observers = &mut self.observers;
        let outcome = backend.enable_context(context, &mut |reply: RecordReply| {
            if reply.category == ReplyCategory::StartOfData {
                if state.stop_requested() {
                    debug!(context, "stop requested before recording started");
                    if let Err(e) = backend.disable_context(context) {
                        warn!(context, error = %e, "failed to disable recording context");
                    }
                }
                return;
            }
            dispatcher.dispatch(&reply, observers);
        });

        state.take_context();
        if let Err(e) = backend.free_context(context) {
            warn!(context, error = %e, "failed to free recording context");
        }

        let stats = dispatcher.stats();
        debug!(
            context,
            replies = stats.replies,
            dropped = stats.dropped_replies,
            events = stats.events,
            delivered = stats.delivered,
            "recording context released"
        );

        match outcome {
            Ok(()) => Ok(()),
            Err(e) => run_outcome(e),
        }
    }
}

impl<B: RecordBackend> fmt::Debug for Logger<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("state", &self.state)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

/// An interrupted receive counts as a cancel; anything else is a fault.
fn run_outcome(err: RecordError) -> Result<(), LoggerError> {
    match err {
        RecordError::Interrupted => {
            debug!("receive interrupted, ending run");
            Ok(())
        }
        other => Err(LoggerError::ConnectionFault(other.to_string())),
    }
}

// ── LoggerGuard ───────────────────────────────────────────────────────────────

/// A logger running on its own thread.
///
/// Dropping the guard stops the logger and waits for the thread.
#[derive(Debug)]
pub struct LoggerGuard {
    handle: StopHandle,
    thread: Option<JoinHandle<Result<(), LoggerError>>>,
}

impl LoggerGuard {
    pub fn stop(&self) {
        self.handle.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.handle.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Stops the logger, waits for its thread and returns the run's result.
    ///
    /// # Errors
    ///
    /// Returns the run's own error, or [`LoggerError::ThreadPanicked`] if an
    /// observer panicked.
    pub fn close(mut self) -> Result<(), LoggerError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), LoggerError> {
        self.handle.stop();
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| LoggerError::ThreadPanicked)?,
            None => Ok(()),
        }
    }
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!(error = %e, "logger thread ended with an error");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::record::mock::MockRecordBackend;

    #[test]
    fn test_setup_error_from_record_error() {
        assert!(matches!(
            SetupError::from(RecordError::Connect("no socket".into())),
            SetupError::Connect(m) if m == "no socket"
        ));
        assert!(matches!(
            SetupError::from(RecordError::ExtensionMissing),
            SetupError::RecordExtensionMissing
        ));
        assert!(matches!(
            SetupError::from(RecordError::Protocol("BadAlloc".into())),
            SetupError::Protocol(_)
        ));
    }

    #[test]
    fn test_interrupt_is_a_clean_end_and_loss_is_a_fault() {
        assert!(run_outcome(RecordError::Interrupted).is_ok());
        assert!(matches!(
            run_outcome(RecordError::ConnectionLost("EOF".into())),
            Err(LoggerError::ConnectionFault(m)) if m.contains("EOF")
        ));
    }

    #[test]
    fn test_idle_logger_stop_is_a_no_op() {
        // Arrange
        let backend = MockRecordBackend::default();
        let logger = Logger::with_backend(backend.clone());

        // Act
        logger.stop();
        logger.stop();

        // Assert
        assert!(!logger.is_running());
        assert!(backend.disabled_contexts().is_empty());
    }

    #[test]
    fn test_run_resets_a_stop_requested_while_idle() {
        // Arrange: a stop while idle must not cancel the next run.
        let backend = MockRecordBackend::default();
        let mut logger = Logger::with_backend(backend.clone());
        logger.stop();
        backend.inject_interrupt();

        // Act
        let result = logger.run();

        // Assert: the run only ended through the interrupt, no disable issued.
        assert!(result.is_ok());
        assert!(backend.disabled_contexts().is_empty());
        assert_eq!(backend.freed_contexts().len(), 1);
    }
}
