use super::backend::StorageBackend;
use crate::error::{HbnbError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Keeps the store document in a single JSON file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(HbnbError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HbnbError::Io(e)),
        }
    }

    fn save(&self, document: &str) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        // Atomic write: the target is only replaced once the tmp file is complete
        let tmp_file = dir.join(format!(".hbnb-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, document).map_err(HbnbError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(HbnbError::Io(e));
        }
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
