//! Application layer.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer sits between the pure decoding logic in
//! `xtap_core` and the infrastructure that talks to the X server.  It drives
//! the recording lifecycle through the `RecordBackend` trait, so the same
//! code runs against a real server or the mock backend in tests.
//!
//! # Sub-modules
//!
//! - **`logger`** – The public [`logger::Logger`]: observer registration,
//!   the blocking `run()` loop, cross-thread stop and the background-thread
//!   guard.
//!
//! - **`output`** – How the `xtap` binary renders events (text or JSON
//!   lines) and which ones it prints.

pub mod logger;
pub mod output;
