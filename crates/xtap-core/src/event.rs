//! Public event types handed to observers.
//!
//! Both types are immutable values: one is built per decoded record and
//! every derived property is computed from the stored fields.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::keysym::{keysym_from_name, keysym_name, Keysym, NO_SYMBOL};
use crate::modifier::ModifierState;

pub const BUTTON_LEFT: u8 = 1;
pub const BUTTON_MIDDLE: u8 = 2;
pub const BUTTON_RIGHT: u8 = 3;
pub const BUTTON_WHEEL_UP: u8 = 4;
pub const BUTTON_WHEEL_DOWN: u8 = 5;

/// A key press or release with its resolved keysym.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeyEvent {
    keysym: Keysym,
    down: bool,
    shift: bool,
    caps: bool,
}

impl KeyEvent {
    pub fn new(keysym: Keysym, down: bool, modifiers: ModifierState) -> Self {
        Self {
            keysym,
            down,
            shift: modifiers.shift_held,
            caps: modifiers.caps_held,
        }
    }

    /// The resolved keysym (group 1 when Shift/Caps selected it).
    pub fn keysym(&self) -> Keysym {
        self.keysym
    }

    pub fn down(&self) -> bool {
        self.down
    }

    pub fn up(&self) -> bool {
        !self.down
    }

    /// Whether a Shift key was held after this event was applied.
    pub fn shift(&self) -> bool {
        self.shift
    }

    /// Whether Caps Lock was on after this event was applied.
    pub fn caps(&self) -> bool {
        self.caps
    }

    /// The keysym's `keysymdef.h` name, or `"[<keysym>]"` when unknown.
    pub fn name(&self) -> Cow<'static, str> {
        match keysym_name(self.keysym) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("[{}]", self.keysym)),
        }
    }

    /// Best-effort single-byte value of the key.
    ///
    /// The name is looked back up in the keysym table; the result is returned
    /// only when it is below 256, otherwise (and for unknown names) 0.
    /// Named keys such as `Return` therefore report 0.
    pub fn ord(&self) -> u32 {
        let value = keysym_from_name(&self.name()).unwrap_or(NO_SYMBOL);
        if value < 256 {
            value
        } else {
            0
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.down { "down" } else { "up" };
        write!(f, "key {action} {}", self.name())?;
        match (self.shift, self.caps) {
            (false, false) => Ok(()),
            (true, false) => write!(f, " [shift]"),
            (false, true) => write!(f, " [caps]"),
            (true, true) => write!(f, " [shift caps]"),
        }
    }
}

/// A button press/release or a pointer motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MouseEvent {
    button: u8,
    down: Option<bool>,
    position: (i32, i32),
    is_motion: bool,
}

impl MouseEvent {
    /// A button event at the last known pointer position.
    pub fn button(button: u8, down: bool, position: (i32, i32)) -> Self {
        Self {
            button,
            down: Some(down),
            position,
            is_motion: false,
        }
    }

    /// A pointer motion to `position`.
    pub fn motion(position: (i32, i32)) -> Self {
        Self {
            button: 0,
            down: None,
            position,
            is_motion: true,
        }
    }

    /// The raw X button number (0 for motion).
    pub fn button_code(&self) -> u8 {
        self.button
    }

    /// `None` for motion events.
    pub fn down(&self) -> Option<bool> {
        self.down
    }

    /// `None` for motion events.
    pub fn up(&self) -> Option<bool> {
        self.down.map(|down| !down)
    }

    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn x(&self) -> i32 {
        self.position.0
    }

    pub fn y(&self) -> i32 {
        self.position.1
    }

    pub fn is_motion(&self) -> bool {
        self.is_motion
    }

    pub fn left(&self) -> bool {
        self.button == BUTTON_LEFT
    }

    pub fn middle(&self) -> bool {
        self.button == BUTTON_MIDDLE
    }

    pub fn right(&self) -> bool {
        self.button == BUTTON_RIGHT
    }

    /// +1 for wheel up (button 4), -1 for wheel down (button 5), else 0.
    pub fn wheel(&self) -> i8 {
        match self.button {
            BUTTON_WHEEL_UP => 1,
            BUTTON_WHEEL_DOWN => -1,
            _ => 0,
        }
    }
}

impl fmt::Display for MouseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = self.position;
        match self.down {
            None => write!(f, "mouse move ({x}, {y})"),
            Some(down) => {
                let action = if down { "down" } else { "up" };
                write!(f, "mouse {action} button {} at ({x}, {y})", self.button)
            }
        }
    }
}

/// Any decoded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(event) => fmt::Display::fmt(event, f),
            Self::Mouse(event) => fmt::Display::fmt(event, f),
        }
    }
}
