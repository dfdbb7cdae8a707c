//! Mock record backend for unit and integration testing.
//!
//! Allows tests to feed synthetic [`RecordReply`]s to a running logger
//! without an X server.  The mock behaves like the server where the logger
//! can tell the difference:
//!
//! - enabling a context first delivers a `StartOfData` reply;
//! - disabling the enabled context queues an `EndOfData` reply behind
//!   everything injected so far, which ends `enable_context`;
//! - disabling a context that is not enabled does nothing.
//!
//! Clones share state, so a test keeps one clone to inject into while the
//! logger owns another.

use std::sync::{
    atomic::{AtomicU32, Ordering},
    mpsc::{self, Receiver, Sender},
    Arc, Mutex, MutexGuard, PoisonError,
};

use xtap_core::{KeyboardMapping, RecordReply, ReplyCategory};

use super::{ContextId, RecordBackend, RecordError};

/// Something the running `enable_context` will observe.
#[derive(Debug)]
enum Feed {
    Reply(RecordReply),
    Fault(String),
    Interrupt,
}

#[derive(Debug, Default)]
struct Calls {
    mapping_requests: u32,
    created: Vec<ContextId>,
    disabled: Vec<ContextId>,
    freed: Vec<ContextId>,
}

/// A mock implementation of [`RecordBackend`] driven by a channel.
#[derive(Clone)]
pub struct MockRecordBackend {
    mapping: Arc<Mutex<KeyboardMapping>>,
    sender: Arc<Mutex<Sender<Feed>>>,
    receiver: Arc<Mutex<Receiver<Feed>>>,
    enabled: Arc<Mutex<Option<ContextId>>>,
    next_context: Arc<AtomicU32>,
    calls: Arc<Mutex<Calls>>,
}

impl MockRecordBackend {
    /// Creates a mock whose keyboard mapping is `mapping`.
    pub fn new(mapping: KeyboardMapping) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            mapping: Arc::new(Mutex::new(mapping)),
            sender: Arc::new(Mutex::new(tx)),
            receiver: Arc::new(Mutex::new(rx)),
            enabled: Arc::new(Mutex::new(None)),
            next_context: Arc::new(AtomicU32::new(0x0040_0001)),
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }

    /// Queues a reply, as if intercepted by the server.
    pub fn inject_reply(&self, reply: RecordReply) {
        self.send(Feed::Reply(reply));
    }

    /// Queues a connection failure; `enable_context` returns it when reached.
    pub fn inject_fault(&self, message: &str) {
        self.send(Feed::Fault(message.to_string()));
    }

    /// Queues a signal interruption of the blocking receive.
    pub fn inject_interrupt(&self) {
        self.send(Feed::Interrupt);
    }

    /// Replaces the mapping returned by later `keyboard_mapping` calls.
    pub fn set_mapping(&self, mapping: KeyboardMapping) {
        *lock(&self.mapping) = mapping;
    }

    /// The context currently being recorded, if any.
    pub fn enabled_context(&self) -> Option<ContextId> {
        *lock(&self.enabled)
    }

    pub fn mapping_requests(&self) -> u32 {
        lock(&self.calls).mapping_requests
    }

    pub fn created_contexts(&self) -> Vec<ContextId> {
        lock(&self.calls).created.clone()
    }

    pub fn disabled_contexts(&self) -> Vec<ContextId> {
        lock(&self.calls).disabled.clone()
    }

    pub fn freed_contexts(&self) -> Vec<ContextId> {
        lock(&self.calls).freed.clone()
    }

    fn send(&self, feed: Feed) {
        // The receiver lives as long as any clone, so this cannot fail.
        let _ = lock(&self.sender).send(feed);
    }
}

impl Default for MockRecordBackend {
    fn default() -> Self {
        Self::new(KeyboardMapping::default())
    }
}

impl RecordBackend for MockRecordBackend {
    fn keyboard_mapping(&self) -> Result<KeyboardMapping, RecordError> {
        lock(&self.calls).mapping_requests += 1;
        Ok(lock(&self.mapping).clone())
    }

    fn create_context(&self) -> Result<ContextId, RecordError> {
        let context = self.next_context.fetch_add(1, Ordering::Relaxed);
        lock(&self.calls).created.push(context);
        Ok(context)
    }

    fn enable_context(
        &self,
        context: ContextId,
        sink: &mut dyn FnMut(RecordReply),
    ) -> Result<(), RecordError> {
        *lock(&self.enabled) = Some(context);
        sink(RecordReply::marker(ReplyCategory::StartOfData));

        let receiver = lock(&self.receiver);
        loop {
            let feed = match receiver.recv() {
                Ok(feed) => feed,
                Err(_) => return Err(RecordError::ConnectionLost("mock channel closed".into())),
            };
            match feed {
                Feed::Reply(reply) => {
                    let end = reply.category == ReplyCategory::EndOfData;
                    sink(reply);
                    if end {
                        return Ok(());
                    }
                }
                Feed::Fault(message) => {
                    *lock(&self.enabled) = None;
                    return Err(RecordError::ConnectionLost(message));
                }
                Feed::Interrupt => {
                    *lock(&self.enabled) = None;
                    return Err(RecordError::Interrupted);
                }
            }
        }
    }

    fn disable_context(&self, context: ContextId) -> Result<(), RecordError> {
        lock(&self.calls).disabled.push(context);
        let mut enabled = lock(&self.enabled);
        if *enabled == Some(context) {
            *enabled = None;
            self.send(Feed::Reply(RecordReply::marker(ReplyCategory::EndOfData)));
        }
        Ok(())
    }

    fn free_context(&self, context: ContextId) -> Result<(), RecordError> {
        lock(&self.calls).freed.push(context);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
