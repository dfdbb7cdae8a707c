//! Shift / Caps Lock tracking for keysym group selection.
//!
//! The RECORD extension reports raw keycodes without the modifier state the
//! server would normally attach to a delivered event, so the logger has to
//! follow the modifier keys itself.  Two facts are tracked:
//!
//! - whether a Shift key (`Shift_L`, `Shift_R` or `Shift_Lock`) is held;
//! - whether Caps Lock is toggled on.
//!
//! Either one selects the shifted column (group 1) for shiftable keys.
//! Caps Lock only combines with Shift through that OR, so releasing Shift
//! while Caps Lock is on keeps letters uppercase.

use serde::Serialize;

use crate::keysym::{is_shift_key, is_shiftable, Keysym, XK_CAPS_LOCK};

/// Snapshot of the tracked modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ModifierState {
    pub shift_held: bool,
    pub caps_held: bool,
}

impl ModifierState {
    /// `true` when the shifted column applies to shiftable keys.
    pub fn selects_shifted_group(&self) -> bool {
        self.shift_held || self.caps_held
    }
}

/// Outcome of feeding one key event through the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedKey {
    /// The group-0 keysym, or the group-1 keysym when it was re-resolved.
    pub keysym: Keysym,
    /// Modifier state after this event was applied.
    pub modifiers: ModifierState,
}

/// Pure modifier state machine.  No I/O; owned by one decoder.
#[derive(Debug, Default)]
pub struct ModifierTracker {
    state: ModifierState,
}

impl ModifierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current modifier snapshot.
    pub fn state(&self) -> ModifierState {
        self.state
    }

    /// Applies one key event.
    ///
    /// `plain` is the group-0 keysym of the key.  `shifted` is only invoked
    /// when the group-1 keysym is actually needed, so callers can defer the
    /// second lookup.
    ///
    /// Rules, first match wins:
    /// 1. shiftable key with Shift or Caps active → re-resolve via `shifted`;
    /// 2. Shift key → `shift_held = down`;
    /// 3. Caps Lock press → toggle `caps_held`.
    pub fn apply<F>(&mut self, plain: Keysym, down: bool, shifted: F) -> ResolvedKey
    where
        F: FnOnce() -> Keysym,
    {
        let keysym = if self.state.selects_shifted_group() && is_shiftable(plain) {
            shifted()
        } else {
            if is_shift_key(plain) {
                self.state.shift_held = down;
            } else if down && plain == XK_CAPS_LOCK {
                self.state.caps_held = !self.state.caps_held;
            }
            plain
        };

        ResolvedKey {
            keysym,
            modifiers: self.state,
        }
    }
}
