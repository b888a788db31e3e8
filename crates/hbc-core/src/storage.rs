//! JSON file storage for the collection

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{HbcError, Result};
use crate::model::CollectionOfHumanBeings;

/// Location the collection is loaded from at startup and saved to by `save`
#[derive(Debug, Clone)]
pub struct CollectionStore {
    path: PathBuf,
}

impl CollectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection; `Ok(None)` when the file does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `Persistence` for unreadable or corrupt files, including files
    /// whose element ids are duplicated or non-positive.
    pub fn load(&self) -> Result<Option<CollectionOfHumanBeings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&self.path).map_err(|e| HbcError::Persistence {
            reason: format!("cannot read {}: {e}", self.path.display()),
        })?;
        let corrupt = |reason: String| HbcError::Persistence {
            reason: format!("corrupt collection file {}: {reason}", self.path.display()),
        };
        let collection: CollectionOfHumanBeings =
            serde_json::from_slice(&bytes).map_err(|e| corrupt(e.to_string()))?;
        collection.verify().map_err(|e| corrupt(e.to_string()))?;
        Ok(Some(collection))
    }

    /// Write the collection via temp file + rename so readers never see a
    /// partial file
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if serialization or any filesystem step fails.
    pub fn save(&self, collection: &CollectionOfHumanBeings) -> Result<()> {
        let content = serde_json::to_vec_pretty(collection).map_err(|e| HbcError::Persistence {
            reason: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| persistence("create data dir", &e))?;
        }
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).map_err(|e| persistence("write temp file", &e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| persistence("rename temp file", &e))?;
        Ok(())
    }
}

fn persistence(step: &str, err: &std::io::Error) -> HbcError {
    HbcError::Persistence {
        reason: format!("{step}: {err}"),
    }
}
