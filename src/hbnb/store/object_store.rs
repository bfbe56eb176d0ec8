use super::backend::StorageBackend;
use crate::error::{HbnbError, Result};
use crate::model::{Kind, Record, DISCRIMINATOR, LEGACY_DISCRIMINATOR};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Live records keyed by `<Kind>.<id>`, in insertion order.
///
/// Nothing here writes implicitly: callers decide when to [`persist`] and
/// call [`restore`] once at start-up.
///
/// [`persist`]: ObjectStore::persist
/// [`restore`]: ObjectStore::restore
pub struct ObjectStore<B: StorageBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    objects: IndexMap<String, Record>,
}

impl<B: StorageBackend> ObjectStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            objects: IndexMap::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The live mapping.
    pub fn all(&self) -> &IndexMap<String, Record> {
        &self.objects
    }

    /// The live mapping, mutable. Removing an entry here is how records are deleted.
    pub fn all_mut(&mut self) -> &mut IndexMap<String, Record> {
        &mut self.objects
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        self.objects.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Inserts or replaces the entry under the record's key. Does not persist.
    pub fn register(&mut self, record: Record) {
        self.objects.insert(record.key(), record);
    }

    /// Writes every record to the backend, replacing what was there.
    pub fn persist(&self) -> Result<()> {
        let document: Map<String, Value> = self
            .objects
            .iter()
            .map(|(key, record)| (key.clone(), Value::Object(record.to_mapping())))
            .collect();
        let content = serde_json::to_string_pretty(&document).map_err(HbnbError::Serialization)?;
        self.backend.save(&content)?;
        debug!(
            records = self.objects.len(),
            path = %self.backend.location().display(),
            "store persisted"
        );
        Ok(())
    }

    /// Loads records from the backend into the live mapping.
    ///
    /// A missing or unparseable document leaves the store as it is. An entry
    /// with an unknown type, or one that cannot be rebuilt, fails the whole
    /// call and nothing is loaded.
    pub fn restore(&mut self) -> Result<()> {
        let location = self.backend.location();
        let Some(content) = self.backend.load()? else {
            debug!(path = %location.display(), "no store document, starting empty");
            return Ok(());
        };
        let document: Map<String, Value> = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %location.display(), error = %e, "store document unreadable, starting empty");
                return Ok(());
            }
        };

        let mut restored = Vec::with_capacity(document.len());
        for (key, value) in &document {
            restored.push((key.clone(), rebuild(key, value)?));
        }
        debug!(records = restored.len(), path = %location.display(), "store restored");
        self.objects.extend(restored);
        Ok(())
    }
}

fn rebuild(key: &str, value: &Value) -> Result<Record> {
    let invalid = |reason: &str| HbnbError::InvalidRecord {
        key: key.to_string(),
        reason: reason.to_string(),
    };
    let mapping = value.as_object().ok_or_else(|| invalid("not an object"))?;
    let type_name = mapping
        .get(DISCRIMINATOR)
        .or_else(|| mapping.get(LEGACY_DISCRIMINATOR))
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing type_name"))?;
    let kind: Kind = type_name
        .parse()
        .map_err(|_| HbnbError::UnknownType(type_name.to_string()))?;
    Record::from_mapping(kind, mapping)
}
