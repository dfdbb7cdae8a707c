//! Observer registration and per-reply dispatch.
//!
//! Observers are called synchronously, on the thread that received the
//! reply, in exactly the order the records appear in the reply.  There is no
//! queue between decoding and delivery: a slow observer delays the next
//! event.
//!
//! At most one keyboard and one mouse callback are registered at a time; a
//! new registration replaces the previous one.  Events of a class nobody
//! observes are still decoded so modifier and pointer state stay correct.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

use crate::decoder::EventDecoder;
use crate::event::{InputEvent, KeyEvent, MouseEvent};
use crate::keymap::KeysymLookup;
use crate::protocol::RecordReply;

/// Capability interface for objects that observe both event classes.
///
/// Both methods default to doing nothing, so a handler only implements the
/// class it cares about.
pub trait EventHandler: Send {
    fn on_key(&mut self, _event: KeyEvent) {}
    fn on_mouse(&mut self, _event: MouseEvent) {}
}

pub type KeyCallback = Box<dyn FnMut(KeyEvent) + Send>;
pub type MouseCallback = Box<dyn FnMut(MouseEvent) + Send>;

/// The registered keyboard and mouse callbacks.
#[derive(Default)]
pub struct Observers {
    keyboard: Option<KeyCallback>,
    mouse: Option<MouseCallback>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the keyboard callback, replacing any previous one.
    pub fn on_keyboard<F>(&mut self, callback: F)
    where
        F: FnMut(KeyEvent) + Send + 'static,
    {
        self.keyboard = Some(Box::new(callback));
    }

    /// Registers the mouse callback, replacing any previous one.
    pub fn on_mouse<F>(&mut self, callback: F)
    where
        F: FnMut(MouseEvent) + Send + 'static,
    {
        self.mouse = Some(Box::new(callback));
    }

    /// Registers one handler object for both classes, replacing both
    /// callbacks.
    pub fn set_handler<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        let shared = Arc::new(Mutex::new(handler));
        let for_keys = Arc::clone(&shared);
        self.on_keyboard(move |event| {
            for_keys
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .on_key(event)
        });
        self.on_mouse(move |event| {
            shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .on_mouse(event)
        });
    }

    pub fn has_keyboard(&self) -> bool {
        self.keyboard.is_some()
    }

    pub fn has_mouse(&self) -> bool {
        self.mouse.is_some()
    }

    /// Delivers `event` to the matching callback.
    ///
    /// Returns `true` if a callback was invoked.
    pub fn notify(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => match self.keyboard.as_mut() {
                Some(callback) => {
                    callback(key);
                    true
                }
                None => false,
            },
            InputEvent::Mouse(mouse) => match self.mouse.as_mut() {
                Some(callback) => {
                    callback(mouse);
                    true
                }
                None => false,
            },
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("keyboard", &self.has_keyboard())
            .field("mouse", &self.has_mouse())
            .finish()
    }
}

/// Counters kept by a [`Dispatcher`] for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Replies whose data was decoded.
    pub replies: u64,
    /// Replies dropped by the acceptance check.
    pub dropped_replies: u64,
    /// Events produced by the decoder.
    pub events: u64,
    /// Events that reached a callback.
    pub delivered: u64,
}

/// Decodes replies and delivers the resulting events.
///
/// A dispatcher lives for one run of the logger; creating a new one resets
/// modifier and pointer state.
#[derive(Debug)]
pub struct Dispatcher<L> {
    decoder: EventDecoder<L>,
    stats: DispatchStats,
}

impl<L: KeysymLookup> Dispatcher<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            decoder: EventDecoder::new(lookup),
            stats: DispatchStats::default(),
        }
    }

    pub fn decoder(&self) -> &EventDecoder<L> {
        &self.decoder
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Decodes `reply` and invokes the observers for each event.
    ///
    /// Replies that fail the acceptance check are dropped without touching
    /// decoder state.  Returns the number of callbacks invoked.
    pub fn dispatch(&mut self, reply: &RecordReply, observers: &mut Observers) -> usize {
        let data = match reply.event_data() {
            Ok(data) => data,
            Err(reason) => {
                trace!(%reason, "dropping record reply");
                self.stats.dropped_replies += 1;
                return 0;
            }
        };
        self.stats.replies += 1;

        let mut delivered = 0;
        for event in self.decoder.decode_all(data) {
            self.stats.events += 1;
            if observers.notify(event) {
                delivered += 1;
            }
        }
        self.stats.delivered += delivered as u64;
        delivered
    }
}
