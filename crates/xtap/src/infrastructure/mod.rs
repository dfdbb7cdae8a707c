//! Infrastructure layer.
//!
//! Contains OS-facing adapters: the X server connections used for recording
//! and file-system storage of the configuration.
//!
//! **Dependency rule**: this layer may depend on `xtap_core`, but nothing in
//! here drives the recording lifecycle; that is `application`'s job.

pub mod record;
pub mod storage;
