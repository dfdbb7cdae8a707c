//! Turns raw device records into [`InputEvent`]s.
//!
//! The decoder owns the two pieces of state the protocol does not carry:
//! the modifier snapshot and the last known pointer position.  Button
//! records on the core protocol arrive without a usable position, so they
//! are stamped with the position of the most recent motion record.

use crate::event::{InputEvent, KeyEvent, MouseEvent};
use crate::keymap::KeysymLookup;
use crate::keysym::Keycode;
use crate::modifier::{ModifierState, ModifierTracker};
use crate::protocol::{records, RawRecord};

const PLAIN_GROUP: u8 = 0;
const SHIFTED_GROUP: u8 = 1;

/// Stateful record decoder; one per running logger.
#[derive(Debug)]
pub struct EventDecoder<L> {
    lookup: L,
    modifiers: ModifierTracker,
    pointer: (i32, i32),
}

impl<L: KeysymLookup> EventDecoder<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            modifiers: ModifierTracker::new(),
            pointer: (0, 0),
        }
    }

    /// Last observed pointer position, `(0, 0)` before any motion.
    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    pub fn modifiers(&self) -> ModifierState {
        self.modifiers.state()
    }

    /// Decodes one record, updating modifier and pointer state.
    ///
    /// Returns `None` for [`RawRecord::Other`], which changes nothing.
    pub fn decode(&mut self, record: RawRecord) -> Option<InputEvent> {
        let event = match record {
            RawRecord::KeyPress(keycode) => InputEvent::Key(self.key_event(keycode, true)),
            RawRecord::KeyRelease(keycode) => InputEvent::Key(self.key_event(keycode, false)),
            RawRecord::ButtonPress(button) => {
                InputEvent::Mouse(MouseEvent::button(button, true, self.pointer))
            }
            RawRecord::ButtonRelease(button) => {
                InputEvent::Mouse(MouseEvent::button(button, false, self.pointer))
            }
            RawRecord::Motion { x, y } => {
                self.pointer = (i32::from(x), i32::from(y));
                InputEvent::Mouse(MouseEvent::motion(self.pointer))
            }
            RawRecord::Other(_) => return None,
        };
        Some(event)
    }

    /// Decodes every record of a reply payload, lazily and in order.
    pub fn decode_all<'a>(&'a mut self, data: &'a [u8]) -> impl Iterator<Item = InputEvent> + 'a {
        records(data).filter_map(move |record| self.decode(record))
    }

    fn key_event(&mut self, keycode: Keycode, down: bool) -> KeyEvent {
        let lookup = &self.lookup;
        let plain = lookup.translate(keycode, PLAIN_GROUP);
        let resolved = self
            .modifiers
            .apply(plain, down, || lookup.translate(keycode, SHIFTED_GROUP));
        KeyEvent::new(resolved.keysym, down, resolved.modifiers)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::keymap::{KeyboardMapping, MockKeysymLookup};
    use crate::keysym::{Keysym, XK_CAPS_LOCK, XK_SHIFT_L};

    const KC_SHIFT: Keycode = 50;
    const KC_CAPS: Keycode = 66;
    const KC_A: Keycode = 38;
    const KC_RETURN: Keycode = 36;

    fn mapping() -> KeyboardMapping {
        // keycodes 30..70, only the ones under test are populated
        let mut rows: Vec<Vec<Keysym>> = vec![Vec::new(); 40];
        rows[(KC_RETURN - 30) as usize] = vec![0xFF0D, 0xFF0D];
        rows[(KC_A - 30) as usize] = vec![0x61, 0x41];
        rows[(KC_SHIFT - 30) as usize] = vec![XK_SHIFT_L, XK_SHIFT_L];
        rows[(KC_CAPS - 30) as usize] = vec![XK_CAPS_LOCK, XK_CAPS_LOCK];
        let rows: Vec<&[Keysym]> = rows.iter().map(Vec::as_slice).collect();
        KeyboardMapping::from_rows(30, &rows)
    }

    fn key(event: Option<InputEvent>) -> KeyEvent {
        match event {
            Some(InputEvent::Key(key)) => key,
            other => panic!("expected key event, got {other:?}"),
        }
    }

    fn mouse(event: Option<InputEvent>) -> MouseEvent {
        match event {
            Some(InputEvent::Mouse(mouse)) => mouse,
            other => panic!("expected mouse event, got {other:?}"),
        }
    }

    #[test]
    fn test_key_press_without_modifiers_uses_group_zero_only() {
        // Arrange
        let mut lookup = MockKeysymLookup::new();
        lookup
            .expect_translate()
            .with(eq(KC_A), eq(0))
            .times(1)
            .return_const(0x61u32);
        let mut decoder = EventDecoder::new(lookup);

        // Act
        let event = key(decoder.decode(RawRecord::KeyPress(KC_A)));

        // Assert
        assert_eq!(event.keysym(), 0x61);
        assert!(event.down());
    }

    #[test]
    fn test_shifted_letter_consults_group_one() {
        // Arrange
        let mut lookup = MockKeysymLookup::new();
        lookup
            .expect_translate()
            .with(eq(KC_SHIFT), eq(0))
            .return_const(XK_SHIFT_L);
        lookup
            .expect_translate()
            .with(eq(KC_A), eq(0))
            .times(1)
            .return_const(0x61u32);
        lookup
            .expect_translate()
            .with(eq(KC_A), eq(1))
            .times(1)
            .return_const(0x41u32);
        let mut decoder = EventDecoder::new(lookup);

        // Act
        decoder.decode(RawRecord::KeyPress(KC_SHIFT));
        let event = key(decoder.decode(RawRecord::KeyPress(KC_A)));

        // Assert
        assert_eq!(event.keysym(), 0x41);
        assert!(event.shift());
    }

    #[test]
    fn test_key_release_reports_up() {
        let mut decoder = EventDecoder::new(mapping());
        let event = key(decoder.decode(RawRecord::KeyRelease(KC_RETURN)));
        assert!(event.up());
        assert_eq!(event.name(), "Return");
    }

    #[test]
    fn test_unmapped_keycode_yields_placeholder_name() {
        let mut decoder = EventDecoder::new(mapping());
        let event = key(decoder.decode(RawRecord::KeyPress(200)));
        assert_eq!(event.keysym(), 0);
        assert_eq!(event.name(), "[0]");
    }

    #[test]
    fn test_motion_updates_pointer_and_button_uses_it() {
        // Arrange
        let mut decoder = EventDecoder::new(mapping());

        // Act
        let motion = mouse(decoder.decode(RawRecord::Motion { x: 10, y: 20 }));
        let press = mouse(decoder.decode(RawRecord::ButtonPress(1)));

        // Assert
        assert!(motion.is_motion());
        assert_eq!(decoder.pointer(), (10, 20));
        assert_eq!(press.position(), (10, 20));
        assert_eq!(press.down(), Some(true));
        assert!(press.left());
    }

    #[test]
    fn test_button_before_any_motion_is_at_origin() {
        let mut decoder = EventDecoder::new(mapping());
        let release = mouse(decoder.decode(RawRecord::ButtonRelease(3)));
        assert_eq!(release.position(), (0, 0));
        assert_eq!(release.down(), Some(false));
    }

    #[test]
    fn test_other_record_produces_nothing_and_changes_nothing() {
        // Arrange
        let mut decoder = EventDecoder::new(mapping());
        decoder.decode(RawRecord::Motion { x: 7, y: 8 });
        decoder.decode(RawRecord::KeyPress(KC_CAPS));
        let before = (decoder.pointer(), decoder.modifiers());

        // Act
        let event = decoder.decode(RawRecord::Other(12));

        // Assert
        assert!(event.is_none());
        assert_eq!((decoder.pointer(), decoder.modifiers()), before);
    }

    #[test]
    fn test_decode_all_preserves_record_order() {
        // Arrange
        let data = crate::protocol::encode_records(&[
            RawRecord::KeyPress(KC_A),
            RawRecord::Other(9),
            RawRecord::Motion { x: 1, y: 2 },
            RawRecord::ButtonPress(5),
        ]);
        let mut decoder = EventDecoder::new(mapping());

        // Act
        let events: Vec<InputEvent> = decoder.decode_all(&data).collect();

        // Assert
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], InputEvent::Key(_)));
        assert!(matches!(events[1], InputEvent::Mouse(m) if m.is_motion()));
        assert!(matches!(events[2], InputEvent::Mouse(m) if m.wheel() == -1));
    }
}
