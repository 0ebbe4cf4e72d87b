// Keyslots Settings Module
// Runtime settings that are not part of the slot store format

#![cfg(feature = "runtime")]

use std::path::{Path, PathBuf};

/// File name of the slot store when no path is configured.
pub const STORE_FILE_NAME: &str = "clipboard_slots.dat";

/// Runtime settings for keyslots.
///
/// Loaded from a TOML file (default: ~/.config/keyslots/settings.toml).
/// Every field is optional; a missing file means defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Slot store location
    store_path: Option<PathBuf>,

    /// Input devices to grab instead of autodetected keyboards
    devices: Vec<String>,

    /// Start with the status console hidden
    start_hidden: bool,

    /// Pause around synthesized key events, in milliseconds
    key_delay_ms: u64,

    /// Path to the settings file
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    store: Option<StoreSettings>,

    #[serde(default)]
    devices: Option<DeviceSettings>,

    #[serde(default)]
    console: Option<ConsoleSettings>,

    #[serde(default)]
    output: Option<OutputSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct StoreSettings {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct DeviceSettings {
    #[serde(default)]
    only: Option<Vec<String>>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct ConsoleSettings {
    #[serde(default)]
    start_hidden: Option<toml::Value>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct OutputSettings {
    #[serde(default)]
    key_delay_ms: Option<i64>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(store) = toml_settings.store {
            settings.store_path = store.path;
        }

        if let Some(devices) = toml_settings.devices {
            settings.devices = devices.only.unwrap_or_default();
        }

        if let Some(value) = toml_settings.console.and_then(|c| c.start_hidden) {
            settings.start_hidden = parse_bool_value(&value)?;
        }

        if let Some(delay) = toml_settings.output.and_then(|o| o.key_delay_ms) {
            settings.key_delay_ms = u64::try_from(delay)
                .map_err(|_| SettingsError::InvalidValue(format!("key_delay_ms must not be negative, got {}", delay)))?;
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keyslots").join("settings.toml"))
    }

    /// Load from default location (~/.config/keyslots/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::new())
    }

    /// Default store location: the user data directory, else the working
    /// directory.
    pub fn default_store_path() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("keyslots").join(STORE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(STORE_FILE_NAME))
    }

    /// Store path with the command line taking precedence over this file.
    pub fn resolve_store_path(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.store_path.clone())
            .unwrap_or_else(Self::default_store_path)
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    pub fn start_hidden(&self) -> bool {
        self.start_hidden
    }

    pub fn key_delay_ms(&self) -> u64 {
        self.key_delay_ms
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!("Cannot convert '{}' to boolean", s))),
        },
        _ => Err(SettingsError::InvalidValue(format!("Cannot convert {:?} to boolean", value))),
    }
}
