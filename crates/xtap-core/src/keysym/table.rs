//! Keysym name table generated from X11/keysymdef.h.
//!
//! Covers Latin-1, the whole MISCELLANY block (TTY function keys, Japanese
//! input keys, cursor motion, misc functions, keypad, F1-F35, modifiers)
//! and the ISO lock keys. Names are the `keysymdef.h` identifiers without
//! the `XK_` prefix.
//!
//! The primary table is sorted by keysym value so it can be binary searched.

use super::Keysym;

/// `(keysym, name)` pairs, strictly ascending by keysym.
pub(super) static KEYSYM_NAMES: &[(Keysym, &str)] = &[
    // Latin-1, ASCII range
    (0x0020, "space"),
    (0x0021, "exclam"),
    (0x0022, "quotedbl"),
    (0x0023, "numbersign"),
    (0x0024, "dollar"),
    (0x0025, "percent"),
    (0x0026, "ampersand"),
    (0x0027, "apostrophe"),
    (0x0028, "parenleft"),
    (0x0029, "parenright"),
    (0x002A, "asterisk"),
    (0x002B, "plus"),
    (0x002C, "comma"),
    (0x002D, "minus"),
    (0x002E, "period"),
    (0x002F, "slash"),
    (0x0030, "0"),
    (0x0031, "1"),
    (0x0032, "2"),
    (0x0033, "3"),
    (0x0034, "4"),
    (0x0035, "5"),
    (0x0036, "6"),
    (0x0037, "7"),
    (0x0038, "8"),
    (0x0039, "9"),
    (0x003A, "colon"),
    (0x003B, "semicolon"),
    (0x003C, "less"),
    (0x003D, "equal"),
    (0x003E, "greater"),
    (0x003F, "question"),
    (0x0040, "at"),
    (0x0041, "A"),
    (0x0042, "B"),
    (0x0043, "C"),
    (0x0044, "D"),
    (0x0045, "E"),
    (0x0046, "F"),
    (0x0047, "G"),
    (0x0048, "H"),
    (0x0049, "I"),
    (0x004A, "J"),
    (0x004B, "K"),
    (0x004C, "L"),
    (0x004D, "M"),
    (0x004E, "N"),
    (0x004F, "O"),
    (0x0050, "P"),
    (0x0051, "Q"),
    (0x0052, "R"),
    (0x0053, "S"),
    (0x0054, "T"),
    (0x0055, "U"),
    (0x0056, "V"),
    (0x0057, "W"),
    (0x0058, "X"),
    (0x0059, "Y"),
    (0x005A, "Z"),
    (0x005B, "bracketleft"),
    (0x005C, "backslash"),
    (0x005D, "bracketright"),
    (0x005E, "asciicircum"),
    (0x005F, "underscore"),
    (0x0060, "grave"),
    (0x0061, "a"),
    (0x0062, "b"),
    (0x0063, "c"),
    (0x0064, "d"),
    (0x0065, "e"),
    (0x0066, "f"),
    (0x0067, "g"),
    (0x0068, "h"),
    (0x0069, "i"),
    (0x006A, "j"),
    (0x006B, "k"),
    (0x006C, "l"),
    (0x006D, "m"),
    (0x006E, "n"),
    (0x006F, "o"),
    (0x0070, "p"),
    (0x0071, "q"),
    (0x0072, "r"),
    (0x0073, "s"),
    (0x0074, "t"),
    (0x0075, "u"),
    (0x0076, "v"),
    (0x0077, "w"),
    (0x0078, "x"),
    (0x0079, "y"),
    (0x007A, "z"),
    (0x007B, "braceleft"),
    (0x007C, "bar"),
    (0x007D, "braceright"),
    (0x007E, "asciitilde"),

    // Latin-1, upper half
    (0x00A0, "nobreakspace"),
    (0x00A1, "exclamdown"),
    (0x00A2, "cent"),
    (0x00A3, "sterling"),
    (0x00A4, "currency"),
    (0x00A5, "yen"),
    (0x00A6, "brokenbar"),
    (0x00A7, "section"),
    (0x00A8, "diaeresis"),
    (0x00A9, "copyright"),
    (0x00AA, "ordfeminine"),
    (0x00AB, "guillemotleft"),
    (0x00AC, "notsign"),
    (0x00AD, "hyphen"),
    (0x00AE, "registered"),
    (0x00AF, "macron"),
    (0x00B0, "degree"),
    (0x00B1, "plusminus"),
    (0x00B2, "twosuperior"),
    (0x00B3, "threesuperior"),
    (0x00B4, "acute"),
    (0x00B5, "mu"),
    (0x00B6, "paragraph"),
    (0x00B7, "periodcentered"),
    (0x00B8, "cedilla"),
    (0x00B9, "onesuperior"),
    (0x00BA, "masculine"),
    (0x00BB, "guillemotright"),
    (0x00BC, "onequarter"),
    (0x00BD, "onehalf"),
    (0x00BE, "threequarters"),
    (0x00BF, "questiondown"),
    (0x00C0, "Agrave"),
    (0x00C1, "Aacute"),
    (0x00C2, "Acircumflex"),
    (0x00C3, "Atilde"),
    (0x00C4, "Adiaeresis"),
    (0x00C5, "Aring"),
    (0x00C6, "AE"),
    (0x00C7, "Ccedilla"),
    (0x00C8, "Egrave"),
    (0x00C9, "Eacute"),
    (0x00CA, "Ecircumflex"),
    (0x00CB, "Ediaeresis"),
    (0x00CC, "Igrave"),
    (0x00CD, "Iacute"),
    (0x00CE, "Icircumflex"),
    (0x00CF, "Idiaeresis"),
    (0x00D0, "ETH"),
    (0x00D1, "Ntilde"),
    (0x00D2, "Ograve"),
    (0x00D3, "Oacute"),
    (0x00D4, "Ocircumflex"),
    (0x00D5, "Otilde"),
    (0x00D6, "Odiaeresis"),
    (0x00D7, "multiply"),
    (0x00D8, "Oslash"),
    (0x00D9, "Ugrave"),
    (0x00DA, "Uacute"),
    (0x00DB, "Ucircumflex"),
    (0x00DC, "Udiaeresis"),
    (0x00DD, "Yacute"),
    (0x00DE, "THORN"),
    (0x00DF, "ssharp"),
    (0x00E0, "agrave"),
    (0x00E1, "aacute"),
    (0x00E2, "acircumflex"),
    (0x00E3, "atilde"),
    (0x00E4, "adiaeresis"),
    (0x00E5, "aring"),
    (0x00E6, "ae"),
    (0x00E7, "ccedilla"),
    (0x00E8, "egrave"),
    (0x00E9, "eacute"),
    (0x00EA, "ecircumflex"),
    (0x00EB, "ediaeresis"),
    (0x00EC, "igrave"),
    (0x00ED, "iacute"),
    (0x00EE, "icircumflex"),
    (0x00EF, "idiaeresis"),
    (0x00F0, "eth"),
    (0x00F1, "ntilde"),
    (0x00F2, "ograve"),
    (0x00F3, "oacute"),
    (0x00F4, "ocircumflex"),
    (0x00F5, "otilde"),
    (0x00F6, "odiaeresis"),
    (0x00F7, "division"),
    (0x00F8, "oslash"),
    (0x00F9, "ugrave"),
    (0x00FA, "uacute"),
    (0x00FB, "ucircumflex"),
    (0x00FC, "udiaeresis"),
    (0x00FD, "yacute"),
    (0x00FE, "thorn"),
    (0x00FF, "ydiaeresis"),

    // ISO 9995
    (0xFE01, "ISO_Lock"),
    (0xFE03, "ISO_Level3_Shift"),
    (0xFE08, "ISO_Next_Group"),
    (0xFE20, "ISO_Left_Tab"),

    // TTY function keys
    (0xFF08, "BackSpace"),
    (0xFF09, "Tab"),
    (0xFF0A, "Linefeed"),
    (0xFF0B, "Clear"),
    (0xFF0D, "Return"),
    (0xFF13, "Pause"),
    (0xFF14, "Scroll_Lock"),
    (0xFF15, "Sys_Req"),
    (0xFF1B, "Escape"),
    (0xFF20, "Multi_key"),

    // Japanese keyboard support
    (0xFF21, "Kanji"),
    (0xFF22, "Muhenkan"),
    (0xFF23, "Henkan_Mode"),
    (0xFF24, "Romaji"),
    (0xFF25, "Hiragana"),
    (0xFF26, "Katakana"),
    (0xFF27, "Hiragana_Katakana"),
    (0xFF28, "Zenkaku"),
    (0xFF29, "Hankaku"),
    (0xFF2A, "Zenkaku_Hankaku"),
    (0xFF2B, "Touroku"),
    (0xFF2C, "Massyo"),
    (0xFF2D, "Kana_Lock"),
    (0xFF2E, "Kana_Shift"),
    (0xFF2F, "Eisu_Shift"),
    (0xFF30, "Eisu_toggle"),

    // International and multi-key character composition
    (0xFF37, "Codeinput"),
    (0xFF3C, "SingleCandidate"),
    (0xFF3D, "MultipleCandidate"),
    (0xFF3E, "PreviousCandidate"),

    // Cursor control and motion
    (0xFF50, "Home"),
    (0xFF51, "Left"),
    (0xFF52, "Up"),
    (0xFF53, "Right"),
    (0xFF54, "Down"),
    (0xFF55, "Prior"),
    (0xFF56, "Next"),
    (0xFF57, "End"),
    (0xFF58, "Begin"),

    // Misc functions
    (0xFF60, "Select"),
    (0xFF61, "Print"),
    (0xFF62, "Execute"),
    (0xFF63, "Insert"),
    (0xFF65, "Undo"),
    (0xFF66, "Redo"),
    (0xFF67, "Menu"),
    (0xFF68, "Find"),
    (0xFF69, "Cancel"),
    (0xFF6A, "Help"),
    (0xFF6B, "Break"),
    (0xFF7E, "Mode_switch"),
    (0xFF7F, "Num_Lock"),

    // Keypad
    (0xFF80, "KP_Space"),
    (0xFF89, "KP_Tab"),
    (0xFF8D, "KP_Enter"),
    (0xFF91, "KP_F1"),
    (0xFF92, "KP_F2"),
    (0xFF93, "KP_F3"),
    (0xFF94, "KP_F4"),
    (0xFF95, "KP_Home"),
    (0xFF96, "KP_Left"),
    (0xFF97, "KP_Up"),
    (0xFF98, "KP_Right"),
    (0xFF99, "KP_Down"),
    (0xFF9A, "KP_Prior"),
    (0xFF9B, "KP_Next"),
    (0xFF9C, "KP_End"),
    (0xFF9D, "KP_Begin"),
    (0xFF9E, "KP_Insert"),
    (0xFF9F, "KP_Delete"),
    (0xFFAA, "KP_Multiply"),
    (0xFFAB, "KP_Add"),
    (0xFFAC, "KP_Separator"),
    (0xFFAD, "KP_Subtract"),
    (0xFFAE, "KP_Decimal"),
    (0xFFAF, "KP_Divide"),
    (0xFFB0, "KP_0"),
    (0xFFB1, "KP_1"),
    (0xFFB2, "KP_2"),
    (0xFFB3, "KP_3"),
    (0xFFB4, "KP_4"),
    (0xFFB5, "KP_5"),
    (0xFFB6, "KP_6"),
    (0xFFB7, "KP_7"),
    (0xFFB8, "KP_8"),
    (0xFFB9, "KP_9"),
    (0xFFBD, "KP_Equal"),

    // Function keys
    (0xFFBE, "F1"),
    (0xFFBF, "F2"),
    (0xFFC0, "F3"),
    (0xFFC1, "F4"),
    (0xFFC2, "F5"),
    (0xFFC3, "F6"),
    (0xFFC4, "F7"),
    (0xFFC5, "F8"),
    (0xFFC6, "F9"),
    (0xFFC7, "F10"),
    (0xFFC8, "F11"),
    (0xFFC9, "F12"),
    (0xFFCA, "F13"),
    (0xFFCB, "F14"),
    (0xFFCC, "F15"),
    (0xFFCD, "F16"),
    (0xFFCE, "F17"),
    (0xFFCF, "F18"),
    (0xFFD0, "F19"),
    (0xFFD1, "F20"),
    (0xFFD2, "F21"),
    (0xFFD3, "F22"),
    (0xFFD4, "F23"),
    (0xFFD5, "F24"),
    (0xFFD6, "F25"),
    (0xFFD7, "F26"),
    (0xFFD8, "F27"),
    (0xFFD9, "F28"),
    (0xFFDA, "F29"),
    (0xFFDB, "F30"),
    (0xFFDC, "F31"),
    (0xFFDD, "F32"),
    (0xFFDE, "F33"),
    (0xFFDF, "F34"),
    (0xFFE0, "F35"),

    // Modifiers
    (0xFFE1, "Shift_L"),
    (0xFFE2, "Shift_R"),
    (0xFFE3, "Control_L"),
    (0xFFE4, "Control_R"),
    (0xFFE5, "Caps_Lock"),
    (0xFFE6, "Shift_Lock"),
    (0xFFE7, "Meta_L"),
    (0xFFE8, "Meta_R"),
    (0xFFE9, "Alt_L"),
    (0xFFEA, "Alt_R"),
    (0xFFEB, "Super_L"),
    (0xFFEC, "Super_R"),
    (0xFFED, "Hyper_L"),
    (0xFFEE, "Hyper_R"),

    // Delete
    (0xFFFF, "Delete"),
];

/// Later `keysymdef.h` spellings of values already in [`KEYSYM_NAMES`].
///
/// Accepted by name lookups only. Reverse lookups return the first
/// spelling `keysymdef.h` defines, the one `XKeysymToString` reports.
pub(super) static KEYSYM_ALIASES: &[(&str, Keysym)] = &[
    ("quoteright", 0x0027),
    ("quoteleft", 0x0060),
    ("guillemetleft", 0x00AB),
    ("ordmasculine", 0x00BA),
    ("guillemetright", 0x00BB),
    ("Eth", 0x00D0),
    ("Ooblique", 0x00D8),
    ("Thorn", 0x00DE),
    ("ooblique", 0x00F8),
    ("Henkan", 0xFF23),
    ("Kanji_Bangou", 0xFF37),
    ("Zen_Koho", 0xFF3D),
    ("Mae_Koho", 0xFF3E),
    ("Page_Up", 0xFF55),
    ("Page_Down", 0xFF56),
    ("script_switch", 0xFF7E),
    ("KP_Page_Up", 0xFF9A),
    ("KP_Page_Down", 0xFF9B),
    ("L1", 0xFFC8),
    ("L2", 0xFFC9),
    ("L3", 0xFFCA),
    ("L4", 0xFFCB),
    ("L5", 0xFFCC),
    ("L6", 0xFFCD),
    ("L7", 0xFFCE),
    ("L8", 0xFFCF),
    ("L9", 0xFFD0),
    ("L10", 0xFFD1),
    ("R1", 0xFFD2),
    ("R2", 0xFFD3),
    ("R3", 0xFFD4),
    ("R4", 0xFFD5),
    ("R5", 0xFFD6),
    ("R6", 0xFFD7),
    ("R7", 0xFFD8),
    ("R8", 0xFFD9),
    ("R9", 0xFFDA),
    ("R10", 0xFFDB),
    ("R11", 0xFFDC),
    ("R12", 0xFFDD),
    ("R13", 0xFFDE),
    ("R14", 0xFFDF),
    ("R15", 0xFFE0),
];
