use crate::commands::{CmdOutput, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::parser::tokenize;
use crate::store::{ObjectStore, StorageBackend};

use super::helpers::require_kind;

pub fn run<B: StorageBackend>(store: &mut ObjectStore<B>, args: &str) -> Result<CmdResult> {
    let tokens = tokenize(args);
    let kind = match require_kind(&tokens) {
        Ok(kind) => kind,
        Err(e) => return Ok(e.into()),
    };

    let record = Record::new(kind);
    let id = record.id().to_string();
    store.register(record);
    store.persist()?;

    Ok(CmdResult::default().with_output(CmdOutput::Created(id)))
}
