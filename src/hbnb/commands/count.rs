use crate::commands::{CmdOutput, CmdResult};
use crate::error::Result;
use crate::parser::tokenize;
use crate::store::{ObjectStore, StorageBackend};

use super::all::matches_kind;
use super::helpers::optional_kind;

pub fn run<B: StorageBackend>(store: &ObjectStore<B>, args: &str) -> Result<CmdResult> {
    let tokens = tokenize(args);
    let filter = match optional_kind(&tokens) {
        Ok(filter) => filter,
        Err(e) => return Ok(e.into()),
    };

    let count = store
        .all()
        .values()
        .filter(|record| matches_kind(filter, record.kind()))
        .count();
    Ok(CmdResult::default().with_output(CmdOutput::Counted(count)))
}
