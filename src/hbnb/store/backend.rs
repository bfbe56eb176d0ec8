use crate::error::Result;
use std::path::PathBuf;

/// Raw I/O for the serialized store document.
///
/// The backend only moves one opaque document in and out. Deciding what the
/// document contains is [`ObjectStore`](super::ObjectStore)'s job.
pub trait StorageBackend {
    /// Read the whole document. `Ok(None)` when nothing has been written yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the whole document.
    /// MUST NOT leave a half-written document behind on failure.
    fn save(&self, document: &str) -> Result<()>;

    /// Where the document lives, for messages and logs.
    fn location(&self) -> PathBuf;
}
