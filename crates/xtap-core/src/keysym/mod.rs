//! X11 keysyms: constants, classification and the name table.
//!
//! # What is a keysym? (for beginners)
//!
//! The X server reports a key press as a *keycode*: a small integer that
//! identifies a physical key on this particular keyboard.  Keycodes are not
//! portable; the same physical key may have a different keycode on another
//! machine.  The server also holds a *keyboard mapping* that turns each
//! keycode into one or more *keysyms* (key symbols):
//!
//! | Keycode | Group 0 (plain) | Group 1 (shifted) |
//! |---------|-----------------|-------------------|
//! | 38      | `a` (0x0061)    | `A` (0x0041)      |
//! | 10      | `1` (0x0031)    | `exclam` (0x0021) |
//! | 50      | `Shift_L`       | `Shift_L`         |
//!
//! Printable Latin-1 keysyms use their character code as their value, so
//! `a` is 0x61 just like in ASCII.  Function keys live in the 0xFF00 page.
//!
//! The name table in [`table`] is built at compile time; no lookup structure
//! is assembled at runtime.

mod table;

use table::{KEYSYM_ALIASES, KEYSYM_NAMES};

/// A symbolic key identity as defined by `X11/keysymdef.h`.
pub type Keysym = u32;

/// A server-assigned physical key identifier.
pub type Keycode = u8;

/// The keysym reported for an unmapped keycode/group pair.
pub const NO_SYMBOL: Keysym = 0x0000;

pub const XK_SHIFT_L: Keysym = 0xFFE1;
pub const XK_SHIFT_R: Keysym = 0xFFE2;
pub const XK_CAPS_LOCK: Keysym = 0xFFE5;
pub const XK_SHIFT_LOCK: Keysym = 0xFFE6;

/// Punctuation keys whose shifted form is a different character on a
/// standard layout.  Letters and digits are shiftable as well.
const SHIFTABLE_PUNCTUATION: [Keysym; 11] = [
    0x002D, // minus
    0x003D, // equal
    0x005B, // bracketleft
    0x005D, // bracketright
    0x003B, // semicolon
    0x005C, // backslash
    0x0027, // apostrophe
    0x002C, // comma
    0x002E, // period
    0x002F, // slash
    0x0060, // grave
];

/// Returns `true` if the group-0 `keysym` has a distinct shifted form that
/// Shift or Caps Lock should select.
///
/// Only lowercase letters, digits and the fixed punctuation set qualify.
pub fn is_shiftable(keysym: Keysym) -> bool {
    matches!(keysym, 0x0061..=0x007A | 0x0030..=0x0039) || SHIFTABLE_PUNCTUATION.contains(&keysym)
}

/// Returns `true` for the physical Shift identities, including Shift Lock.
pub fn is_shift_key(keysym: Keysym) -> bool {
    matches!(keysym, XK_SHIFT_L | XK_SHIFT_R | XK_SHIFT_LOCK)
}

/// Looks up the `keysymdef.h` name of `keysym`.
///
/// Returns `None` for keysyms outside the table.
///
/// # Examples
///
/// ```rust
/// use xtap_core::keysym::keysym_name;
///
/// assert_eq!(keysym_name(0x0061), Some("a"));
/// assert_eq!(keysym_name(0xFF0D), Some("Return"));
/// assert_eq!(keysym_name(0x1234_5678), None);
/// ```
pub fn keysym_name(keysym: Keysym) -> Option<&'static str> {
    KEYSYM_NAMES
        .binary_search_by_key(&keysym, |&(value, _)| value)
        .ok()
        .map(|index| KEYSYM_NAMES[index].1)
}

/// Looks up a keysym by its `keysymdef.h` name (case-sensitive).
///
/// Accepts the legacy aliases listed in the table module as well, so both
/// `"apostrophe"` and `"quoteright"` resolve to 0x27.
pub fn keysym_from_name(name: &str) -> Option<Keysym> {
    KEYSYM_NAMES
        .iter()
        .find(|&&(_, candidate)| candidate == name)
        .map(|&(value, _)| value)
        .or_else(|| {
            KEYSYM_ALIASES
                .iter()
                .find(|&&(alias, _)| alias == name)
                .map(|&(_, value)| value)
        })
}
