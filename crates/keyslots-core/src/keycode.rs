// Keyslots Virtual Key Codes
// Key codes as written in the slot store, and their physical key translation

use std::fmt;

use crate::Key;

/// A virtual-key code as stored in the `KEY_*=` lines of the slot store.
///
/// The store keeps virtual codes (`0x41` for `A`, `0xBA` for the `;`/`$`
/// key) so a store written on one machine reads the same everywhere. The
/// physical [`Key`] is only resolved when bindings are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const OEM_1: KeyCode = KeyCode(0xBA);
    pub const OEM_6: KeyCode = KeyCode(0xDD);
    pub const OEM_7: KeyCode = KeyCode(0xDE);
    pub const LETTER_C: KeyCode = KeyCode(0x43);

    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }

    /// Map a single symbolic character to its virtual code.
    ///
    /// Letters are case-insensitive. Returns `None` for characters outside
    /// the fixed table.
    pub fn from_symbol(c: char) -> Option<KeyCode> {
        let c = c.to_ascii_uppercase();
        let code = match c {
            'A'..='Z' => 0x41 + (c as u16 - 'A' as u16),
            '0'..='9' => 0x30 + (c as u16 - '0' as u16),
            ' ' => 0x20,
            '-' => 0xBD,
            '=' => 0xBB,
            '[' => 0xDB,
            ']' => 0xDD,
            '\\' => 0xDC,
            ';' => 0xBA,
            '\'' => 0xDE,
            ',' => 0xBC,
            '.' => 0xBE,
            '/' => 0xBF,
            '`' => 0xC0,
            _ => return None,
        };
        Some(KeyCode(code))
    }

    /// Translate to the physical key that produces this code.
    pub fn to_key(self) -> Option<Key> {
        const LETTERS: [u16; 26] = [
            30, 48, 46, 32, 18, 33, 34, 35, 23, 36, 37, 38, 50, 49, 24, 25, 16, 19, 31, 20, 22,
            47, 17, 45, 21, 44,
        ];
        const KEYPAD: [u16; 10] = [82, 79, 80, 81, 75, 76, 77, 71, 72, 73];
        const FUNCTION: [u16; 12] = [59, 60, 61, 62, 63, 64, 65, 66, 67, 68, 87, 88];

        let code = match self.0 {
            0x08 => 14,
            0x09 => 15,
            0x0D => 28,
            0x13 => 119,
            0x14 => 58,
            0x1B => 1,
            0x20 => 57,
            0x21 => 104,
            0x22 => 109,
            0x23 => 107,
            0x24 => 102,
            0x25 => 105,
            0x26 => 103,
            0x27 => 106,
            0x28 => 108,
            0x2D => 110,
            0x2E => 111,
            0x30 => 11,
            c @ 0x31..=0x39 => c - 0x31 + 2,
            c @ 0x41..=0x5A => LETTERS[usize::from(c - 0x41)],
            c @ 0x60..=0x69 => KEYPAD[usize::from(c - 0x60)],
            0x6A => 55,
            0x6B => 78,
            0x6D => 74,
            0x6E => 83,
            0x6F => 98,
            c @ 0x70..=0x7B => FUNCTION[usize::from(c - 0x70)],
            0x90 => 69,
            0x91 => 70,
            0xBA => 39,
            0xBB => 13,
            0xBC => 51,
            0xBD => 12,
            0xBE => 52,
            0xBF => 53,
            0xC0 => 41,
            0xDB => 26,
            0xDC => 43,
            0xDD => 27,
            0xDE => 40,
            0xDF => 86,
            0xE2 => 86,
            _ => return None,
        };
        Some(Key::from(code))
    }

    /// Hexadecimal form used when writing the store, e.g. `0xBA`.
    pub fn to_hex(self) -> String {
        format!("0x{:X}", self.0)
    }

    /// Human-readable label for the startup banner.
    pub fn describe(self) -> String {
        match self.0 {
            c @ (0x30..=0x39 | 0x41..=0x5A) => char::from(c as u8).to_string(),
            0x1B => "ESC".to_string(),
            0x20 => "SPACE".to_string(),
            0xBA => "; or $".to_string(),
            0xBB => "= or +".to_string(),
            0xBC => ",".to_string(),
            0xBD => "- or _".to_string(),
            0xBE => ". or >".to_string(),
            0xBF => "/ or ?".to_string(),
            0xC0 => "` or ~".to_string(),
            0xDB => "[ or {".to_string(),
            0xDC => "\\ or |".to_string(),
            0xDD => "] or }".to_string(),
            0xDE => "' or \"".to_string(),
            _ => self.to_hex(),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
