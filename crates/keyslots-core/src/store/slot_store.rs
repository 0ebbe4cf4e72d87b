// Keyslots Slot Store
// File-backed slot persistence; every operation reads or rewrites the whole file

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigParseError, Configuration};

use super::document::StoreDocument;
use super::slot::{SlotId, SlotRecord};

/// Slot store failures. None of them are fatal to the running program.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result of [`SlotStore::initialize`].
#[derive(Debug)]
pub enum InitOutcome {
    /// The file did not exist and was written with the default header.
    Created,
    /// An existing file was loaded; bad key tokens are listed.
    Loaded { errors: Vec<ConfigParseError> },
}

/// Result of [`SlotStore::clear_slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Primary slot, line kept with empty content
    Emptied,
    /// Secondary slot, line removed
    Deleted,
    /// No line for the slot in the store
    NotFound,
}

/// The slot store file.
///
/// Nothing is cached between operations: each call re-reads the file, so
/// edits made by hand while the program runs are picked up. Rewrites go to
/// a sibling temporary file which is then renamed over the store.
#[derive(Debug, Clone)]
pub struct SlotStore {
    path: PathBuf,
    config: Configuration,
}

impl SlotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Configuration::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration read by the last [`initialize`](Self::initialize)
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Create the store with defaults, or load the configuration of an
    /// existing one. An existing file is never modified here.
    pub fn initialize(&mut self) -> Result<InitOutcome, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                let doc = StoreDocument::parse(&text);
                let (config, errors) = Configuration::from_lines(doc.header_lines());
                self.config = config;
                log::info!("Loaded slot store {}", self.path.display());
                Ok(InitOutcome::Loaded { errors })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
                self.save(&StoreDocument::with_default_header())?;
                self.config = Configuration::default();
                log::info!("Created slot store {}", self.path.display());
                Ok(InitOutcome::Created)
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Content of a slot; empty when the slot is empty or absent.
    pub fn read_slot(&self, id: &SlotId) -> Result<String, StoreError> {
        Ok(self.load()?.content(id).unwrap_or_default())
    }

    /// Set a slot's content, creating the slot if needed. Every other line
    /// of the file is kept as it was.
    pub fn write_slot(&self, id: &SlotId, content: &str) -> Result<(), StoreError> {
        let mut doc = self.load()?;
        doc.set(id.clone(), content);
        self.save(&doc)?;
        log::debug!("Wrote {} bytes to slot [{}]", content.len(), id);
        Ok(())
    }

    /// Empty a primary slot or delete a secondary one. A slot with no line
    /// in the file is left absent.
    pub fn clear_slot(&self, id: &SlotId) -> Result<ClearOutcome, StoreError> {
        let mut doc = self.load()?;
        if !doc.contains(id) {
            return Ok(ClearOutcome::NotFound);
        }
        let outcome = if id.is_primary() {
            doc.set(id.clone(), "");
            ClearOutcome::Emptied
        } else {
            doc.remove(id);
            ClearOutcome::Deleted
        };
        self.save(&doc)?;
        Ok(outcome)
    }

    /// Delete every secondary slot, returning how many were removed.
    pub fn clear_all_secondary(&self) -> Result<usize, StoreError> {
        let mut doc = self.load()?;
        let removed = doc.retain_primaries();
        self.save(&doc)?;
        Ok(removed)
    }

    /// All ten primaries, then secondaries in store order.
    pub fn list_slots(&self) -> Result<Vec<SlotRecord>, StoreError> {
        Ok(self.load()?.records())
    }

    fn load(&self) -> Result<StoreDocument, StoreError> {
        fs::read_to_string(&self.path)
            .map(|text| StoreDocument::parse(&text))
            .map_err(|source| StoreError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let tmp = self.temp_path();
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, doc.render()).map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(".");
        name.push(self.path.file_name().unwrap_or_else(|| OsStr::new("slots")));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
