// Keyslots Config Parser
// Key bindings and slot labels read from the header of the slot store

use crate::KeyCode;

/// Prefixes of the configuration lines understood by the loader.
pub const KEY_SAVE1_PREFIX: &str = "KEY_SAVE1=";
pub const KEY_SAVE2_PREFIX: &str = "KEY_SAVE2=";
pub const KEY_LOAD_PREFIX: &str = "KEY_LOAD=";
pub const KEY_CLEAR_PREFIX: &str = "KEY_CLEAR=";
pub const KEY_EXIT_PREFIX: &str = "KEY_EXIT=";
pub const SLOT_CHARS_PREFIX: &str = "SLOT_CHARS=";

/// Number of primary slots, and of display labels.
pub const PRIMARY_SLOT_COUNT: usize = 10;

/// A key binding token that could not be turned into a usable key code.
///
/// Always non-fatal: the loader logs it and keeps the default binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigParseError {
    #[error("{field}: unrecognized key '{token}'")]
    UnknownToken { field: &'static str, token: String },

    #[error("{field}: key code {code} is out of range")]
    OutOfRange { field: &'static str, code: u32 },

    #[error("{field}: key code {code} has no physical key")]
    Unmapped { field: &'static str, code: KeyCode },
}

/// Parse a key binding token.
///
/// Three encodings are accepted, tried in this order:
/// 1. a single symbolic character (`A`, `;`, `[` ...)
/// 2. a hexadecimal code with a `0x`/`0X` prefix (`0xBA`)
/// 3. a decimal code (`186`)
pub fn parse_key_spec(field: &'static str, token: &str) -> Result<KeyCode, ConfigParseError> {
    let unknown = || ConfigParseError::UnknownToken {
        field,
        token: token.to_string(),
    };

    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(code) = KeyCode::from_symbol(c) {
            return Ok(code);
        }
    }

    let raw = if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|_| unknown())?
    } else if token.starts_with(|c: char| c.is_ascii_digit()) {
        token.parse::<u32>().map_err(|_| unknown())?
    } else {
        return Err(unknown());
    };

    if raw == 0 || raw > 0xFE {
        return Err(ConfigParseError::OutOfRange { field, code: raw });
    }

    let code = KeyCode(raw as u16);
    if code.to_key().is_none() {
        return Err(ConfigParseError::Unmapped { field, code });
    }
    Ok(code)
}

/// Display labels of the ten primary slots (the shifted character of each
/// top-row digit key on the user's layout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLabels([String; PRIMARY_SLOT_COUNT]);

impl SlotLabels {
    /// Label of primary slot `number` (1-based, 10 for the `0` key).
    pub fn for_slot(&self, number: usize) -> &str {
        number
            .checked_sub(1)
            .and_then(|i| self.0.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Apply a comma-separated `SLOT_CHARS` value. Extra labels are ignored;
    /// missing labels keep their current value.
    fn apply(&mut self, value: &str) {
        for (slot, label) in self.0.iter_mut().zip(value.split(',')) {
            *slot = label.to_string();
        }
    }
}

impl Default for SlotLabels {
    fn default() -> Self {
        Self(["&", "é", "\"", "'", "(", "-", "è", "_", "ç", "à"].map(String::from))
    }
}

/// Configuration loaded from the store header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub save1: KeyCode,
    pub save2: KeyCode,
    pub load: KeyCode,
    pub clear: KeyCode,
    pub exit: KeyCode,
    pub slot_labels: SlotLabels,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            save1: KeyCode::OEM_1,
            save2: KeyCode::OEM_6,
            load: KeyCode::OEM_7,
            clear: KeyCode::LETTER_C,
            exit: KeyCode::ESCAPE,
            slot_labels: SlotLabels::default(),
        }
    }
}

impl Configuration {
    /// Build a configuration from store lines.
    ///
    /// Lines that are not configuration lines are skipped. Every bad key
    /// token is returned alongside the configuration and leaves the default
    /// for its field in place.
    pub fn from_lines<'a, I>(lines: I) -> (Self, Vec<ConfigParseError>)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        for line in lines {
            let binding = if let Some(v) = line.strip_prefix(KEY_SAVE1_PREFIX) {
                Some((&mut config.save1, "KEY_SAVE1", v))
            } else if let Some(v) = line.strip_prefix(KEY_SAVE2_PREFIX) {
                Some((&mut config.save2, "KEY_SAVE2", v))
            } else if let Some(v) = line.strip_prefix(KEY_LOAD_PREFIX) {
                Some((&mut config.load, "KEY_LOAD", v))
            } else if let Some(v) = line.strip_prefix(KEY_CLEAR_PREFIX) {
                Some((&mut config.clear, "KEY_CLEAR", v))
            } else if let Some(v) = line.strip_prefix(KEY_EXIT_PREFIX) {
                Some((&mut config.exit, "KEY_EXIT", v))
            } else {
                if let Some(v) = line.strip_prefix(SLOT_CHARS_PREFIX) {
                    config.slot_labels.apply(v);
                }
                None
            };

            if let Some((slot, field, token)) = binding {
                match parse_key_spec(field, token) {
                    Ok(code) => *slot = code,
                    Err(e) => {
                        log::warn!("{}; keeping {}", e, slot);
                        errors.push(e);
                    }
                }
            }
        }

        (config, errors)
    }
}
