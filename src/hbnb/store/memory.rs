use super::mem_backend::MemBackend;
use super::object_store::ObjectStore;

pub type InMemoryStore = ObjectStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        ObjectStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Kind, Record};

    pub struct StoreFixture {
        pub store: InMemoryStore,
        last_id: Option<String>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                last_id: None,
            }
        }

        pub fn with_records(mut self, kind: Kind, count: usize) -> Self {
            for _ in 0..count {
                self.push(Record::new(kind));
            }
            self
        }

        fn push(&mut self, record: Record) {
            self.last_id = Some(record.id().to_string());
            self.store.register(record);
        }

        /// Id of the most recently registered record.
        pub fn last_id(&self) -> String {
            self.last_id.clone().unwrap_or_default()
        }
    }
}
