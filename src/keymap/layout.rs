//! Keyboard layout: hardware keycode → keysym tables
//!
//! The layout is read from `xmodmap -pke` at startup so that the resolver
//! sees the same symbols the X server does. When that fails a built-in US
//! QWERTY table (X11 keycodes, i.e. evdev + 8) is used instead.

use std::collections::HashMap;
use std::fmt;
use std::process::Command;

/// An X11 keysym value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keysym(pub u32);

/// Named keysyms outside the single-character range
const NAMED_KEYSYMS: &[(&str, u32)] = &[
    ("space", 0x20),
    ("exclam", 0x21),
    ("quotedbl", 0x22),
    ("numbersign", 0x23),
    ("dollar", 0x24),
    ("percent", 0x25),
    ("ampersand", 0x26),
    ("apostrophe", 0x27),
    ("parenleft", 0x28),
    ("parenright", 0x29),
    ("asterisk", 0x2a),
    ("plus", 0x2b),
    ("comma", 0x2c),
    ("minus", 0x2d),
    ("period", 0x2e),
    ("slash", 0x2f),
    ("colon", 0x3a),
    ("semicolon", 0x3b),
    ("less", 0x3c),
    ("equal", 0x3d),
    ("greater", 0x3e),
    ("question", 0x3f),
    ("at", 0x40),
    ("bracketleft", 0x5b),
    ("backslash", 0x5c),
    ("bracketright", 0x5d),
    ("asciicircum", 0x5e),
    ("underscore", 0x5f),
    ("grave", 0x60),
    ("braceleft", 0x7b),
    ("bar", 0x7c),
    ("braceright", 0x7d),
    ("asciitilde", 0x7e),
    ("BackSpace", 0xff08),
    ("Tab", 0xff09),
    ("ISO_Left_Tab", 0xfe20),
    ("Return", 0xff0d),
    ("Escape", 0xff1b),
    ("Home", 0xff50),
    ("Left", 0xff51),
    ("Up", 0xff52),
    ("Right", 0xff53),
    ("Down", 0xff54),
    ("Page_Up", 0xff55),
    ("Prior", 0xff55),
    ("Page_Down", 0xff56),
    ("Next", 0xff56),
    ("End", 0xff57),
    ("Insert", 0xff63),
    ("Menu", 0xff67),
    ("F1", 0xffbe),
    ("F2", 0xffbf),
    ("F3", 0xffc0),
    ("F4", 0xffc1),
    ("F5", 0xffc2),
    ("F6", 0xffc3),
    ("F7", 0xffc4),
    ("F8", 0xffc5),
    ("F9", 0xffc6),
    ("F10", 0xffc7),
    ("F11", 0xffc8),
    ("F12", 0xffc9),
    ("Shift_L", 0xffe1),
    ("Shift_R", 0xffe2),
    ("Control_L", 0xffe3),
    ("Control_R", 0xffe4),
    ("Caps_Lock", 0xffe5),
    ("Meta_L", 0xffe7),
    ("Alt_L", 0xffe9),
    ("Alt_R", 0xffea),
    ("Super_L", 0xffeb),
    ("Super_R", 0xffec),
    ("Delete", 0xffff),
];

impl Keysym {
    pub const NO_SYMBOL: Keysym = Keysym(0);
    pub const ESCAPE: Keysym = Keysym(0xff1b);

    /// Parse an X keysym name as printed by `xmodmap`
    ///
    /// Single characters, the named table above, and `0x`-prefixed hex values
    /// are understood. Anything else is `NO_SYMBOL`.
    pub fn from_name(name: &str) -> Keysym {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_graphic() {
                return Keysym(c as u32);
            }
        }

        if let Some(hex) = name.strip_prefix("0x") {
            return u32::from_str_radix(hex, 16)
                .map(Keysym)
                .unwrap_or(Keysym::NO_SYMBOL);
        }

        NAMED_KEYSYMS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, value)| Keysym(value))
            .unwrap_or(Keysym::NO_SYMBOL)
    }

    /// Canonical X name of this keysym, if it has one in our tables
    pub fn name(self) -> Option<String> {
        if let Some(c) = char::from_u32(self.0).filter(|c| c.is_ascii_alphanumeric()) {
            return Some(c.to_string());
        }
        NAMED_KEYSYMS
            .iter()
            .find(|&&(_, value)| value == self.0)
            .map(|(n, _)| n.to_string())
    }

    /// Printable character for this keysym, if any
    ///
    /// Latin-1 keysyms share their code point with the character; Unicode
    /// keysyms carry the code point below the `0x0100_0000` marker.
    pub fn to_char(self) -> Option<char> {
        match self.0 {
            0x20..=0x7e | 0xa0..=0xff => char::from_u32(self.0),
            0x0100_0100..=0x0110_ffff => char::from_u32(self.0 - 0x0100_0000),
            _ => None,
        }
    }

    pub fn is_shift(self) -> bool {
        matches!(self.0, 0xffe1 | 0xffe2)
    }

    pub fn is_control(self) -> bool {
        matches!(self.0, 0xffe3 | 0xffe4)
    }

    pub fn is_escape(self) -> bool {
        self == Keysym::ESCAPE
    }
}

impl fmt::Display for Keysym {
    /// Hex form accepted by every keysym-name parser (`0x61`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Keycode → keysym columns, one row per hardware key
#[derive(Debug, Clone, Default)]
pub struct KeyboardLayout {
    rows: HashMap<u8, Vec<Keysym>>,
}

impl KeyboardLayout {
    /// Build a layout from explicit rows
    pub fn from_rows(rows: impl IntoIterator<Item = (u8, Vec<Keysym>)>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Keysym in layout group 0, unshifted column
    ///
    /// No fallback to secondary groups or shifted columns.
    pub fn keysym(&self, keycode: u8) -> Keysym {
        self.rows
            .get(&keycode)
            .and_then(|row| row.first().copied())
            .unwrap_or(Keysym::NO_SYMBOL)
    }

    /// Number of keycodes with at least one keysym
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse the output of `xmodmap -pke`
    ///
    /// Lines look like `keycode  24 = q Q q Q`. Keycodes without symbols
    /// (`keycode 8 =`) and unparseable lines are skipped.
    pub fn from_xmodmap(text: &str) -> Self {
        let mut rows = HashMap::new();

        for line in text.lines() {
            let Some(rest) = line.trim().strip_prefix("keycode") else {
                continue;
            };
            let Some((code, syms)) = rest.split_once('=') else {
                continue;
            };
            let Ok(code) = code.trim().parse::<u8>() else {
                continue;
            };

            let row: Vec<Keysym> = syms.split_whitespace().map(Keysym::from_name).collect();
            if !row.is_empty() {
                rows.insert(code, row);
            }
        }

        Self { rows }
    }

    /// Query the running X server, falling back to the built-in US layout
    pub fn detect() -> Self {
        match Command::new("xmodmap").arg("-pke").output() {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout);
                let layout = Self::from_xmodmap(&text);
                if layout.is_empty() {
                    tracing::warn!("xmodmap returned no keycodes, using built-in US layout");
                    Self::us()
                } else {
                    tracing::info!("Loaded keyboard layout from xmodmap ({} keys)", layout.len());
                    layout
                }
            }
            Ok(output) => {
                tracing::warn!(
                    "xmodmap exited with {}, using built-in US layout",
                    output.status
                );
                Self::us()
            }
            Err(e) => {
                tracing::warn!("Failed to run xmodmap: {}, using built-in US layout", e);
                Self::us()
            }
        }
    }

    /// Built-in US QWERTY layout with X11 keycodes
    pub fn us() -> Self {
        const ROWS: &[(u8, &str, &str)] = &[
            (9, "Escape", "Escape"),
            (10, "1", "exclam"),
            (11, "2", "at"),
            (12, "3", "numbersign"),
            (13, "4", "dollar"),
            (14, "5", "percent"),
            (15, "6", "asciicircum"),
            (16, "7", "ampersand"),
            (17, "8", "asterisk"),
            (18, "9", "parenleft"),
            (19, "0", "parenright"),
            (20, "minus", "underscore"),
            (21, "equal", "plus"),
            (22, "BackSpace", "BackSpace"),
            (23, "Tab", "ISO_Left_Tab"),
            (24, "q", "Q"),
            (25, "w", "W"),
            (26, "e", "E"),
            (27, "r", "R"),
            (28, "t", "T"),
            (29, "y", "Y"),
            (30, "u", "U"),
            (31, "i", "I"),
            (32, "o", "O"),
            (33, "p", "P"),
            (34, "bracketleft", "braceleft"),
            (35, "bracketright", "braceright"),
            (36, "Return", "Return"),
            (37, "Control_L", "Control_L"),
            (38, "a", "A"),
            (39, "s", "S"),
            (40, "d", "D"),
            (41, "f", "F"),
            (42, "g", "G"),
            (43, "h", "H"),
            (44, "j", "J"),
            (45, "k", "K"),
            (46, "l", "L"),
            (47, "semicolon", "colon"),
            (48, "apostrophe", "quotedbl"),
            (49, "grave", "asciitilde"),
            (50, "Shift_L", "Shift_L"),
            (51, "backslash", "bar"),
            (52, "z", "Z"),
            (53, "x", "X"),
            (54, "c", "C"),
            (55, "v", "V"),
            (56, "b", "B"),
            (57, "n", "N"),
            (58, "m", "M"),
            (59, "comma", "less"),
            (60, "period", "greater"),
            (61, "slash", "question"),
            (62, "Shift_R", "Shift_R"),
            (64, "Alt_L", "Alt_L"),
            (65, "space", "space"),
            (66, "Caps_Lock", "Caps_Lock"),
            (105, "Control_R", "Control_R"),
            (110, "Home", "Home"),
            (111, "Up", "Up"),
            (112, "Prior", "Prior"),
            (113, "Left", "Left"),
            (114, "Right", "Right"),
            (115, "End", "End"),
            (116, "Down", "Down"),
            (117, "Next", "Next"),
            (118, "Insert", "Insert"),
            (119, "Delete", "Delete"),
            (133, "Super_L", "Super_L"),
        ];

        Self::from_rows(ROWS.iter().map(|&(code, plain, shifted)| {
            (code, vec![Keysym::from_name(plain), Keysym::from_name(shifted)])
        }))
    }

    /// First keycode producing this keysym in group 0
    pub fn keycode_for(&self, keysym: Keysym) -> Option<u8> {
        let mut codes: Vec<u8> = self
            .rows
            .iter()
            .filter(|(_, row)| row.first() == Some(&keysym))
            .map(|(&code, _)| code)
            .collect();
        codes.sort_unstable();
        codes.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keysym_from_single_char() {
        assert_eq!(Keysym::from_name("q"), Keysym(0x71));
        assert_eq!(Keysym::from_name("Q"), Keysym(0x51));
        assert_eq!(Keysym::from_name("1"), Keysym(0x31));
    }

    #[test]
    fn test_keysym_from_named() {
        assert_eq!(Keysym::from_name("grave"), Keysym(0x60));
        assert_eq!(Keysym::from_name("Return"), Keysym(0xff0d));
        assert_eq!(Keysym::from_name("0x1000101"), Keysym(0x0100_0101));
        assert_eq!(Keysym::from_name("NoSymbol"), Keysym::NO_SYMBOL);
        assert_eq!(Keysym::from_name("XF86AudioMute"), Keysym::NO_SYMBOL);
    }

    #[test]
    fn test_keysym_to_char() {
        assert_eq!(Keysym(0x60).to_char(), Some('`'));
        assert_eq!(Keysym(0xe9).to_char(), Some('é'));
        assert_eq!(Keysym(0x0100_20ac).to_char(), Some('€'));
        assert_eq!(Keysym(0xff0d).to_char(), None);
        assert_eq!(Keysym::NO_SYMBOL.to_char(), None);
    }

    #[test]
    fn test_keysym_name_round_trip() {
        assert_eq!(Keysym::from_name("percent").name().as_deref(), Some("percent"));
        assert_eq!(Keysym(0x61).name().as_deref(), Some("a"));
        assert_eq!(Keysym(0x1234_5678).name(), None);
    }

    #[test]
    fn test_parse_xmodmap() {
        let text = "keycode   8 =\n\
                    keycode  24 = q Q q Q\n\
                    keycode  36 = Return NoSymbol Return\n\
                    garbage\n";
        let layout = KeyboardLayout::from_xmodmap(text);

        assert_eq!(layout.len(), 2);
        assert_eq!(layout.keysym(24), Keysym(0x71));
        assert_eq!(layout.keysym(36), Keysym(0xff0d));
        assert_eq!(layout.keysym(8), Keysym::NO_SYMBOL);
    }

    #[test]
    fn test_us_layout_group_zero() {
        let layout = KeyboardLayout::us();
        assert_eq!(layout.keysym(38).to_char(), Some('a'));
        assert_eq!(layout.keysym(49).to_char(), Some('`'));
        assert!(layout.keysym(50).is_shift());
        assert!(layout.keysym(37).is_control());
        assert_eq!(layout.keycode_for(Keysym::from_name("z")), Some(52));
    }
}
