//! # xtap-core
//!
//! Platform-free core of xtap, a global keyboard and mouse logger for the X
//! Window System.  Everything here works on plain bytes and plain values; the
//! X11 connection handling lives in the `xtap` crate.
//!
//! # Architecture overview (for beginners)
//!
//! The X server's RECORD extension lets a client watch the device events the
//! server sends to *every* other client.  The server hands them over in
//! opaque reply buffers; this crate turns those buffers into typed events:
//!
//! - **`protocol`** – Which reply buffers are worth decoding, and how a
//!   buffer is sliced into 32-byte core event records.
//!
//! - **`keymap`** / **`keysym`** – Keycodes are physical key numbers; keysyms
//!   are symbolic identities such as `a`, `A` or `Return`.  `keymap` holds the
//!   server's keycode → keysym table and `keysym` the names of keysyms.
//!
//! - **`modifier`** – The records carry no modifier state, so Shift and
//!   Caps Lock are followed here to decide between `a` and `A`.
//!
//! - **`decoder`** / **`event`** – Records become [`KeyEvent`]s and
//!   [`MouseEvent`]s; button events are stamped with the last pointer
//!   position.
//!
//! - **`dispatch`** – Observer registration and in-order delivery.

pub mod decoder;
pub mod dispatch;
pub mod event;
pub mod keymap;
pub mod keysym;
pub mod modifier;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `xtap_core::KeyEvent` instead of `xtap_core::event::KeyEvent`.
pub use decoder::EventDecoder;
pub use dispatch::{DispatchStats, Dispatcher, EventHandler, Observers};
pub use event::{InputEvent, KeyEvent, MouseEvent};
pub use keymap::{KeyboardMapping, KeysymLookup};
pub use keysym::{Keycode, Keysym};
pub use modifier::ModifierState;
pub use protocol::{RawRecord, RecordReply, ReplyCategory, ReplyRejection};
