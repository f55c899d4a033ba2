//! Favorite countries: a de-duplicated set of alpha-3 codes.
//!
//! `Favorites` is the accessor the front ends use; `FavoritesStore` is the
//! backend it reads and writes wholesale. Last writer wins. A missing or
//! malformed file counts as an empty set.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

pub type CodeSet = BTreeSet<String>;

/// Wholesale read/write of the stored codes.
pub trait FavoritesStore {
    fn load(&self) -> Result<CodeSet>;
    fn save(&mut self, codes: &CodeSet) -> Result<()>;
}

/// Non-persistent backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    codes: CodeSet,
}

impl MemoryStore {
    pub fn with_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<CodeSet> {
        Ok(self.codes.clone())
    }

    fn save(&mut self, codes: &CodeSet) -> Result<()> {
        self.codes = codes.clone();
        Ok(())
    }
}

/// JSON array of codes in a single file. A missing file is an empty set.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Result<CodeSet> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(CodeSet::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            }
        };
        if text.trim().is_empty() {
            return Ok(CodeSet::new());
        }
        // A malformed file reads as empty; the next save replaces it.
        match serde_json::from_str::<Vec<String>>(&text) {
            Ok(codes) => Ok(codes.into_iter().collect()),
            Err(e) => {
                log::warn!(
                    "ignoring malformed favorites in {}: {}",
                    self.path.display(),
                    e
                );
                Ok(CodeSet::new())
            }
        }
    }

    fn save(&mut self, codes: &CodeSet) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let s = serde_json::to_string(&codes.iter().collect::<Vec<_>>())?;
        fs::write(&self.path, s).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

/// Accessor over a backend: `get` and `toggle`.
#[derive(Debug, Clone, Default)]
pub struct Favorites<S> {
    store: S,
}

impl<S: FavoritesStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Result<CodeSet> {
        self.store.load()
    }

    pub fn contains(&self, code: &str) -> Result<bool> {
        Ok(self.get()?.contains(code))
    }

    /// Add `code` if absent, remove it if present; persist and return the new set.
    pub fn toggle(&mut self, code: &str) -> Result<CodeSet> {
        let code = code.trim();
        if code.is_empty() {
            anyhow::bail!("country code must not be empty");
        }
        let mut codes = self.get()?;
        if !codes.remove(code) {
            codes.insert(code.to_string());
        }
        self.store.save(&codes)?;
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_toggle_round_trip() {
        let mut favs = Favorites::new(MemoryStore::default());
        assert!(favs.toggle("PER").unwrap().contains("PER"));
        assert!(favs.contains("PER").unwrap());
        assert!(favs.toggle("PER").unwrap().is_empty());
    }

    #[test]
    fn file_store_dedups_on_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favs.json");
        fs::write(&path, r#"["FRA","FRA","DEU"]"#).unwrap();
        let favs = Favorites::new(JsonFileStore::new(&path));
        let got = favs.get().unwrap();
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn blank_code_is_rejected() {
        let mut favs = Favorites::new(MemoryStore::default());
        assert!(favs.toggle("  ").is_err());
    }
}
