//! Slicing of intercepted server data into device records.
//!
//! Layout of a core device event (all X11 events are at least 32 bytes):
//! ```text
//! [type:1][detail:1][seq:2][time:4][root:4][event:4][child:4]
//! [root_x:2][root_y:2][event_x:2][event_y:2][state:2][same_screen:1][pad:1]
//! ```
//! `detail` is the keycode for key events and the button number for button
//! events.  Multi-byte fields are in the recording client's byte order;
//! swapped replies never reach this module.
//!
//! The high bit of `type` marks events produced by `SendEvent` and is masked
//! off.  A `GenericEvent` (type 35) is followed by `4 * length` extra bytes,
//! where `length` is the 32-bit field at offset 4, so record boundaries are
//! always taken from each record's own header.

use tracing::warn;

use crate::keysym::Keycode;

/// Size of a core X11 event on the wire.
pub const EVENT_SIZE: usize = 32;

pub const KEY_PRESS: u8 = 2;
pub const KEY_RELEASE: u8 = 3;
pub const BUTTON_PRESS: u8 = 4;
pub const BUTTON_RELEASE: u8 = 5;
pub const MOTION_NOTIFY: u8 = 6;
pub const GENERIC_EVENT: u8 = 35;

const SEND_EVENT_BIT: u8 = 0x80;
const ROOT_X_OFFSET: usize = 20;
const ROOT_Y_OFFSET: usize = 22;
const GENERIC_LENGTH_OFFSET: usize = 4;

/// One device-level record sliced from a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawRecord {
    KeyPress(Keycode),
    KeyRelease(Keycode),
    ButtonPress(u8),
    ButtonRelease(u8),
    /// Pointer motion to an absolute root-window position.
    Motion { x: i16, y: i16 },
    /// Any other event code; carries the masked type byte.
    Other(u8),
}

impl RawRecord {
    /// Parses one 32-byte core event.
    ///
    /// # Panics
    ///
    /// Panics if `event` is shorter than [`EVENT_SIZE`]; [`RecordIter`] only
    /// hands out complete records.
    fn parse(event: &[u8]) -> Self {
        let detail = event[1];
        match event[0] & !SEND_EVENT_BIT {
            KEY_PRESS => Self::KeyPress(detail),
            KEY_RELEASE => Self::KeyRelease(detail),
            BUTTON_PRESS => Self::ButtonPress(detail),
            BUTTON_RELEASE => Self::ButtonRelease(detail),
            MOTION_NOTIFY => Self::Motion {
                x: read_i16(event, ROOT_X_OFFSET),
                y: read_i16(event, ROOT_Y_OFFSET),
            },
            other => Self::Other(other),
        }
    }

    /// Encodes this record as a 32-byte core event in native byte order.
    ///
    /// Fields the decoder does not read are zero.  Used to build fixture
    /// replies for tests, benches and the mock backend.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xtap_core::protocol::{records, RawRecord};
    ///
    /// let bytes = RawRecord::Motion { x: 10, y: 20 }.encode();
    /// assert_eq!(records(&bytes).collect::<Vec<_>>(), vec![RawRecord::Motion { x: 10, y: 20 }]);
    /// ```
    pub fn encode(&self) -> [u8; EVENT_SIZE] {
        let mut event = [0u8; EVENT_SIZE];
        let (code, detail) = match *self {
            Self::KeyPress(keycode) => (KEY_PRESS, keycode),
            Self::KeyRelease(keycode) => (KEY_RELEASE, keycode),
            Self::ButtonPress(button) => (BUTTON_PRESS, button),
            Self::ButtonRelease(button) => (BUTTON_RELEASE, button),
            Self::Motion { x, y } => {
                event[ROOT_X_OFFSET..ROOT_X_OFFSET + 2].copy_from_slice(&x.to_ne_bytes());
                event[ROOT_Y_OFFSET..ROOT_Y_OFFSET + 2].copy_from_slice(&y.to_ne_bytes());
                (MOTION_NOTIFY, 0)
            }
            Self::Other(code) => (code, 0),
        };
        event[0] = code;
        event[1] = detail;
        event
    }
}

/// Concatenates the encodings of `records` into one reply payload.
pub fn encode_records(records: &[RawRecord]) -> Vec<u8> {
    records.iter().flat_map(|record| record.encode()).collect()
}

/// Returns a lazy iterator over the records in `data`.
pub fn records(data: &[u8]) -> RecordIter<'_> {
    RecordIter { remaining: data }
}

/// Front-to-back, non-restartable iterator over the records of one reply.
///
/// A trailing fragment shorter than its declared length ends the iteration.
#[derive(Debug)]
pub struct RecordIter<'a> {
    remaining: &'a [u8],
}

impl<'a> RecordIter<'a> {
    fn truncate(&mut self, declared: Option<usize>) -> Option<RawRecord> {
        warn!(
            available = self.remaining.len(),
            declared = ?declared,
            "dropping truncated record at end of reply"
        );
        self.remaining = &[];
        None
    }
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        if self.remaining.is_empty() {
            return None;
        }
        if self.remaining.len() < EVENT_SIZE {
            return self.truncate(Some(EVENT_SIZE));
        }

        let length = match record_length(self.remaining) {
            Some(length) if length <= self.remaining.len() => length,
            declared => return self.truncate(declared),
        };

        let (record, rest) = self.remaining.split_at(length);
        self.remaining = rest;
        Some(RawRecord::parse(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = self.remaining.len() / EVENT_SIZE;
        (0, Some(upper))
    }
}

/// Total length of the record at the start of `data`, header included.
///
/// `None` when a generic event declares a length that overflows `usize`.
fn record_length(data: &[u8]) -> Option<usize> {
    if data[0] & !SEND_EVENT_BIT != GENERIC_EVENT {
        return Some(EVENT_SIZE);
    }
    let words = u32::from_ne_bytes([
        data[GENERIC_LENGTH_OFFSET],
        data[GENERIC_LENGTH_OFFSET + 1],
        data[GENERIC_LENGTH_OFFSET + 2],
        data[GENERIC_LENGTH_OFFSET + 3],
    ]);
    (words as usize)
        .checked_mul(4)
        .and_then(|extra| extra.checked_add(EVENT_SIZE))
}

fn read_i16(data: &[u8], offset: usize) -> i16 {
    i16::from_ne_bytes([data[offset], data[offset + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic_event(extra_words: u32) -> Vec<u8> {
        let mut event = vec![0u8; EVENT_SIZE + extra_words as usize * 4];
        event[0] = GENERIC_EVENT;
        event[4..8].copy_from_slice(&extra_words.to_ne_bytes());
        event
    }

    #[test]
    fn test_key_press_detail_is_keycode() {
        let bytes = RawRecord::KeyPress(38).encode();
        assert_eq!(records(&bytes).next(), Some(RawRecord::KeyPress(38)));
    }

    #[test]
    fn test_all_device_codes_parse_to_their_variants() {
        // Arrange
        let input = [
            RawRecord::KeyPress(10),
            RawRecord::KeyRelease(10),
            RawRecord::ButtonPress(1),
            RawRecord::ButtonRelease(3),
            RawRecord::Motion { x: -5, y: 1080 },
        ];

        // Act
        let decoded: Vec<RawRecord> = records(&encode_records(&input)).collect();

        // Assert
        assert_eq!(decoded, input);
    }

    #[test]
    fn test_send_event_bit_is_masked() {
        let mut bytes = RawRecord::ButtonPress(2).encode();
        bytes[0] |= 0x80;
        assert_eq!(records(&bytes).next(), Some(RawRecord::ButtonPress(2)));
    }

    #[test]
    fn test_unrecognised_code_becomes_other() {
        let bytes = RawRecord::Other(12).encode();
        assert_eq!(records(&bytes).next(), Some(RawRecord::Other(12)));
    }

    #[test]
    fn test_generic_event_consumes_declared_extra_bytes() {
        // Arrange: a generic event with 3 extra words, then a key press.
        let mut data = generic_event(3);
        data.extend_from_slice(&RawRecord::KeyPress(40).encode());

        // Act
        let decoded: Vec<RawRecord> = records(&data).collect();

        // Assert
        assert_eq!(
            decoded,
            vec![RawRecord::Other(GENERIC_EVENT), RawRecord::KeyPress(40)]
        );
    }

    #[test]
    fn test_generic_event_longer_than_buffer_ends_iteration() {
        let mut data = generic_event(0);
        data[4..8].copy_from_slice(&100u32.to_ne_bytes());
        let mut iter = records(&data);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_trailing_fragment_is_dropped() {
        // Arrange
        let mut data = RawRecord::KeyPress(38).encode().to_vec();
        data.extend_from_slice(&[KEY_RELEASE, 38, 0, 0]);

        // Act
        let decoded: Vec<RawRecord> = records(&data).collect();

        // Assert
        assert_eq!(decoded, vec![RawRecord::KeyPress(38)]);
    }

    #[test]
    fn test_iterator_is_not_restartable() {
        let data = RawRecord::KeyPress(38).encode();
        let mut iter = records(&data);
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_empty_data_yields_nothing() {
        assert_eq!(records(&[]).count(), 0);
    }

    #[test]
    fn test_motion_coordinates_are_signed() {
        let bytes = RawRecord::Motion { x: -1920, y: -1 }.encode();
        assert_eq!(
            records(&bytes).next(),
            Some(RawRecord::Motion { x: -1920, y: -1 })
        );
    }
}
