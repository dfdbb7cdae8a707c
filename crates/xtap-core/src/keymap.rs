//! Keycode → keysym translation.
//!
//! The X server publishes its keyboard mapping as one flat array: for every
//! keycode between `min_keycode` and `max_keycode` there are
//! `keysyms_per_keycode` consecutive entries, one per group/level column.
//! [`KeyboardMapping`] keeps a copy of that array so translation is a pure
//! table lookup that never touches the connection.

use crate::keysym::{Keycode, Keysym, NO_SYMBOL};

/// Synchronous, side-effect-free keysym lookup.
///
/// Implemented by [`KeyboardMapping`] in production; tests may use the
/// generated `MockKeysymLookup`.
#[cfg_attr(test, mockall::automock)]
pub trait KeysymLookup {
    /// Returns the keysym in column `group` for `keycode`, or
    /// [`NO_SYMBOL`] when the pair is unmapped.
    fn translate(&self, keycode: Keycode, group: u8) -> Keysym;
}

/// A snapshot of the server keyboard mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardMapping {
    min_keycode: Keycode,
    keysyms_per_keycode: u8,
    keysyms: Vec<Keysym>,
}

impl KeyboardMapping {
    /// Builds a mapping from the raw `GetKeyboardMapping` reply layout.
    ///
    /// `keysyms` holds `keysyms_per_keycode` entries for each keycode starting
    /// at `min_keycode`.  A trailing partial row is ignored by lookups.
    pub fn new(min_keycode: Keycode, keysyms_per_keycode: u8, keysyms: Vec<Keysym>) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode,
            keysyms,
        }
    }

    /// Builds a mapping from per-keycode rows, padding short rows with
    /// [`NO_SYMBOL`].  Convenient for tests and fixtures.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use xtap_core::keymap::{KeyboardMapping, KeysymLookup};
    ///
    /// let map = KeyboardMapping::from_rows(38, &[&[0x61, 0x41]]);
    /// assert_eq!(map.translate(38, 0), 0x61);
    /// assert_eq!(map.translate(38, 1), 0x41);
    /// assert_eq!(map.translate(39, 0), 0);
    /// ```
    pub fn from_rows(min_keycode: Keycode, rows: &[&[Keysym]]) -> Self {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut keysyms = Vec::with_capacity(width * rows.len());
        for row in rows {
            keysyms.extend_from_slice(row);
            keysyms.extend(std::iter::repeat(NO_SYMBOL).take(width - row.len()));
        }
        Self::new(min_keycode, width as u8, keysyms)
    }

    /// Number of keycodes covered by this mapping.
    pub fn keycode_count(&self) -> usize {
        if self.keysyms_per_keycode == 0 {
            0
        } else {
            self.keysyms.len() / self.keysyms_per_keycode as usize
        }
    }
}

impl KeysymLookup for KeyboardMapping {
    fn translate(&self, keycode: Keycode, group: u8) -> Keysym {
        if keycode < self.min_keycode || group >= self.keysyms_per_keycode {
            return NO_SYMBOL;
        }
        let row = (keycode - self.min_keycode) as usize;
        if row >= self.keycode_count() {
            return NO_SYMBOL;
        }
        let index = row * self.keysyms_per_keycode as usize + group as usize;
        self.keysyms[index]
    }
}

impl<L: KeysymLookup + ?Sized> KeysymLookup for &L {
    fn translate(&self, keycode: Keycode, group: u8) -> Keysym {
        (**self).translate(keycode, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us_fragment() -> KeyboardMapping {
        // keycodes 10..=12: "1 !", "2 @", "3 #"
        KeyboardMapping::new(10, 2, vec![0x31, 0x21, 0x32, 0x40, 0x33, 0x23])
    }

    #[test]
    fn test_translate_returns_group_columns() {
        let map = us_fragment();
        assert_eq!(map.translate(10, 0), 0x31);
        assert_eq!(map.translate(10, 1), 0x21);
        assert_eq!(map.translate(12, 1), 0x23);
    }

    #[test]
    fn test_translate_below_min_keycode_is_no_symbol() {
        assert_eq!(us_fragment().translate(9, 0), NO_SYMBOL);
    }

    #[test]
    fn test_translate_past_last_row_is_no_symbol() {
        assert_eq!(us_fragment().translate(13, 0), NO_SYMBOL);
        assert_eq!(us_fragment().translate(255, 0), NO_SYMBOL);
    }

    #[test]
    fn test_translate_group_outside_row_width_is_no_symbol() {
        assert_eq!(us_fragment().translate(10, 2), NO_SYMBOL);
    }

    #[test]
    fn test_translate_is_repeatable() {
        let map = us_fragment();
        let first = map.translate(11, 1);
        let second = map.translate(11, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_mapping_translates_nothing() {
        let map = KeyboardMapping::default();
        assert_eq!(map.keycode_count(), 0);
        assert_eq!(map.translate(8, 0), NO_SYMBOL);
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        // Arrange
        let map = KeyboardMapping::from_rows(50, &[&[0xFFE1], &[0x61, 0x41]]);

        // Assert
        assert_eq!(map.keycode_count(), 2);
        assert_eq!(map.translate(50, 0), 0xFFE1);
        assert_eq!(map.translate(50, 1), NO_SYMBOL);
        assert_eq!(map.translate(51, 1), 0x41);
    }

    #[test]
    fn test_trailing_partial_row_is_ignored() {
        let map = KeyboardMapping::new(8, 2, vec![0x61, 0x41, 0x62]);
        assert_eq!(map.keycode_count(), 1);
        assert_eq!(map.translate(9, 0), NO_SYMBOL);
    }
}
