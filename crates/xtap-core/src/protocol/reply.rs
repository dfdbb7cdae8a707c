//! RECORD `EnableContext` replies and their acceptance check.
//!
//! While a context is enabled the server streams replies to the recording
//! client.  Each one carries a *category* and a block of intercepted
//! protocol data:
//!
//! | Category | Value | Meaning                                     |
//! |----------|-------|---------------------------------------------|
//! | FromServer    | 0 | data the server sent (our device events)   |
//! | FromClient    | 1 | requests a client sent                      |
//! | ClientStarted | 2 | a client connected                          |
//! | ClientDied    | 3 | a client disconnected                       |
//! | StartOfData   | 4 | first reply after enabling, no data         |
//! | EndOfData     | 5 | last reply after disabling, no data         |
//!
//! Only `FromServer` data in the recorder's own byte order is decoded.

use thiserror::Error;

/// Reply category as sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyCategory {
    FromServer,
    FromClient,
    ClientStarted,
    ClientDied,
    StartOfData,
    EndOfData,
    Unknown(u8),
}

impl From<u8> for ReplyCategory {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::FromServer,
            1 => Self::FromClient,
            2 => Self::ClientStarted,
            3 => Self::ClientDied,
            4 => Self::StartOfData,
            5 => Self::EndOfData,
            other => Self::Unknown(other),
        }
    }
}

impl From<ReplyCategory> for u8 {
    fn from(category: ReplyCategory) -> Self {
        match category {
            ReplyCategory::FromServer => 0,
            ReplyCategory::FromClient => 1,
            ReplyCategory::ClientStarted => 2,
            ReplyCategory::ClientDied => 3,
            ReplyCategory::StartOfData => 4,
            ReplyCategory::EndOfData => 5,
            ReplyCategory::Unknown(other) => other,
        }
    }
}

/// Why a reply buffer was dropped instead of decoded.
///
/// Never surfaced to callers; the dispatch loop only logs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReplyRejection {
    #[error("reply category {0:?} does not carry server data")]
    NotFromServer(ReplyCategory),

    #[error("reply data uses the swapped byte order")]
    ClientSwapped,

    #[error("reply carries no data")]
    Empty,

    /// Byte 0 is 0 (error) or 1 (reply) rather than an event code.
    #[error("reply data starts with code {0}, not an event")]
    NotAnEvent(u8),
}

/// One reply delivered by an enabled RECORD context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReply {
    pub category: ReplyCategory,
    pub client_swapped: bool,
    pub data: Vec<u8>,
}

impl RecordReply {
    /// A `FromServer` reply in the native byte order.
    pub fn from_server(data: Vec<u8>) -> Self {
        Self {
            category: ReplyCategory::FromServer,
            client_swapped: false,
            data,
        }
    }

    /// A data-less reply of the given category (`StartOfData`, `EndOfData`).
    pub fn marker(category: ReplyCategory) -> Self {
        Self {
            category,
            client_swapped: false,
            data: Vec::new(),
        }
    }

    /// Returns the decodable data, or the reason the reply must be dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyRejection`] when the reply is not from the server, is
    /// byte-swapped, is empty, or does not start with an event code.
    pub fn event_data(&self) -> Result<&[u8], ReplyRejection> {
        if self.category != ReplyCategory::FromServer {
            return Err(ReplyRejection::NotFromServer(self.category));
        }
        if self.client_swapped {
            return Err(ReplyRejection::ClientSwapped);
        }
        let first = *self.data.first().ok_or(ReplyRejection::Empty)?;
        if first < 2 {
            return Err(ReplyRejection::NotAnEvent(first));
        }
        Ok(&self.data)
    }
}
