//! xtap library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! ```no_run
//! use xtap::Logger;
//!
//! let mut logger = Logger::new()?;
//! logger.on_keyboard(|key| println!("{key}"));
//! let stop = logger.stop_handle();
//! // hand `stop` to another thread, then:
//! logger.run()?;
//! # drop(stop);
//! # Ok::<(), xtap::LoggerError>(())
//! ```

pub mod application;
pub mod infrastructure;

pub use application::logger::{Logger, LoggerError, LoggerGuard, SetupError, StopHandle};
pub use xtap_core::{EventHandler, InputEvent, KeyEvent, MouseEvent};
