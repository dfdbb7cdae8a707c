//! RECORD reply handling: validation of reply buffers and slicing of the
//! intercepted protocol data into device records.

pub mod record;
pub mod reply;

pub use record::{encode_records, records, RawRecord, RecordIter};
pub use reply::{RecordReply, ReplyCategory, ReplyRejection};
