// Keyslots Bindings
// Physical keys resolved from the stored virtual-key configuration

use strum_macros::{AsRefStr, Display, EnumIter};

use super::parser::{ConfigParseError, Configuration};
use crate::{Key, KeyCode};

/// Role a tracked key plays in a combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum Role {
    #[strum(serialize = "SAVE1")]
    Save1,
    #[strum(serialize = "SAVE2")]
    Save2,
    #[strum(serialize = "LOAD")]
    Load,
    #[strum(serialize = "CLEAR")]
    Clear,
}

impl Role {
    /// Either of the two save keys
    pub fn is_save(self) -> bool {
        matches!(self, Role::Save1 | Role::Save2)
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Physical keys the resolver matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub save1: Key,
    pub save2: Key,
    pub load: Key,
    pub clear: Key,
    pub exit: Key,
}

impl Bindings {
    /// Resolve every configured key code to its physical key.
    pub fn from_config(config: &Configuration) -> Result<Self, ConfigParseError> {
        fn resolve(field: &'static str, code: KeyCode) -> Result<Key, ConfigParseError> {
            code.to_key()
                .ok_or(ConfigParseError::Unmapped { field, code })
        }

        let bindings = Self {
            save1: resolve("KEY_SAVE1", config.save1)?,
            save2: resolve("KEY_SAVE2", config.save2)?,
            load: resolve("KEY_LOAD", config.load)?,
            clear: resolve("KEY_CLEAR", config.clear)?,
            exit: resolve("KEY_EXIT", config.exit)?,
        };
        for (first, second) in bindings.collisions() {
            log::warn!("{} and {} are bound to the same key; {} wins", first, second, first);
        }
        Ok(bindings)
    }

    /// Pairs of fields sharing one physical key, in `role_of` precedence
    /// order.
    pub fn collisions(&self) -> Vec<(&'static str, &'static str)> {
        let fields = [
            ("KEY_SAVE1", self.save1),
            ("KEY_SAVE2", self.save2),
            ("KEY_LOAD", self.load),
            ("KEY_CLEAR", self.clear),
            ("KEY_EXIT", self.exit),
        ];
        let mut pairs = Vec::new();
        for (i, (first, key)) in fields.iter().enumerate() {
            for (second, other) in &fields[i + 1..] {
                if key == other {
                    pairs.push((*first, *second));
                }
            }
        }
        pairs
    }

    /// Role played by `key`, if it is bound. Save and load keys win over
    /// the clear key when a layout binds the same key twice.
    pub fn role_of(&self, key: Key) -> Option<Role> {
        if key == self.save1 {
            Some(Role::Save1)
        } else if key == self.save2 {
            Some(Role::Save2)
        } else if key == self.load {
            Some(Role::Load)
        } else if key == self.clear {
            Some(Role::Clear)
        } else {
            None
        }
    }

    /// Physical key bound to `role`
    pub fn key_for(&self, role: Role) -> Key {
        match role {
            Role::Save1 => self.save1,
            Role::Save2 => self.save2,
            Role::Load => self.load,
            Role::Clear => self.clear,
        }
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            save1: Key::from(39),
            save2: Key::from(27),
            load: Key::from(40),
            clear: Key::C,
            exit: Key::ESC,
        }
    }
}
