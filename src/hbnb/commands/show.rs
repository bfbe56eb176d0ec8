use crate::commands::{CmdOutput, CmdResult};
use crate::error::Result;
use crate::parser::tokenize;
use crate::store::{ObjectStore, StorageBackend};

use super::helpers::require_key;

pub fn run<B: StorageBackend>(store: &ObjectStore<B>, args: &str) -> Result<CmdResult> {
    let tokens = tokenize(args);
    let key = match require_key(store, &tokens) {
        Ok(key) => key,
        Err(e) => return Ok(e.into()),
    };

    let mut result = CmdResult::default();
    if let Some(record) = store.get(&key) {
        result = result.with_output(CmdOutput::Shown(record.clone()));
    }
    Ok(result)
}
