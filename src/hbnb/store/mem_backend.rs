use super::backend::StorageBackend;
use crate::error::{HbnbError, Result};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` since the shell is single-threaded and the trait takes
/// `&self` for writes.
#[derive(Default)]
pub struct MemBackend {
    document: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an existing document, as if a previous session wrote it.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
            simulate_write_error: RefCell::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// The last document written, if any.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.document.borrow().clone())
    }

    fn save(&self, document: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(HbnbError::Io(io::Error::other("simulated write error")));
        }
        *self.document.borrow_mut() = Some(document.to_string());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("<memory>")
    }
}
