use crate::commands::{CmdOutput, CmdResult};
use crate::error::Result;
use crate::model::Kind;
use crate::parser::tokenize;
use crate::store::{ObjectStore, StorageBackend};

use super::helpers::optional_kind;

pub fn run<B: StorageBackend>(store: &ObjectStore<B>, args: &str) -> Result<CmdResult> {
    let tokens = tokenize(args);
    let filter = match optional_kind(&tokens) {
        Ok(filter) => filter,
        Err(e) => return Ok(e.into()),
    };

    let listed = store
        .all()
        .values()
        .filter(|record| matches_kind(filter, record.kind()))
        .cloned()
        .collect();
    Ok(CmdResult::default().with_output(CmdOutput::Listed(listed)))
}

pub(crate) fn matches_kind(filter: Option<Kind>, kind: Kind) -> bool {
    filter.map_or(true, |wanted| wanted == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn listed(result: CmdResult) -> Vec<crate::model::Record> {
        match result.output {
            Some(CmdOutput::Listed(records)) => records,
            other => panic!("Expected Listed, got {:?}", other),
        }
    }

    #[test]
    fn lists_everything_without_filter() {
        let fixture = StoreFixture::new()
            .with_records(Kind::User, 2)
            .with_records(Kind::State, 1);
        assert_eq!(listed(run(&fixture.store, "").unwrap()).len(), 3);
    }

    #[test]
    fn filters_by_exact_kind() {
        let fixture = StoreFixture::new()
            .with_records(Kind::User, 2)
            .with_records(Kind::State, 1);
        let records = listed(run(&fixture.store, "State").unwrap());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), Kind::State);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let fixture = StoreFixture::new();
        assert!(listed(run(&fixture.store, "City").unwrap()).is_empty());
    }

    #[test]
    fn unknown_class() {
        let fixture = StoreFixture::new();
        let result = run(&fixture.store, "Planet").unwrap();
        assert!(result.output.is_none());
        assert_eq!(result.messages[0].content, "** class doesn't exist **");
    }

    #[test]
    fn listing_order_is_stable() {
        let fixture = StoreFixture::new().with_records(Kind::Review, 4);
        let first: Vec<String> = listed(run(&fixture.store, "").unwrap())
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        let second: Vec<String> = listed(run(&fixture.store, "").unwrap())
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(first, second);
    }
}
