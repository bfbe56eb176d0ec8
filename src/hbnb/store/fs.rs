use super::fs_backend::FsBackend;
use super::object_store::ObjectStore;
use std::path::PathBuf;

pub type FileStore = ObjectStore<FsBackend>;

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ObjectStore::with_backend(FsBackend::new(path))
    }
}
