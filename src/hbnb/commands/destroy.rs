use crate::commands::CmdResult;
use crate::error::Result;
use crate::parser::tokenize;
use crate::store::{ObjectStore, StorageBackend};

use super::helpers::require_key;

pub fn run<B: StorageBackend>(store: &mut ObjectStore<B>, args: &str) -> Result<CmdResult> {
    let tokens = tokenize(args);
    let key = match require_key(store, &tokens) {
        Ok(key) => key,
        Err(e) => return Ok(e.into()),
    };

    store.all_mut().shift_remove(&key);
    store.persist()?;

    Ok(CmdResult::default())
}
