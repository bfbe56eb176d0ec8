//! Attribute updates.
//!
//! `update <class> <id> <attribute> <value>` sets one attribute. The mapping
//! form, `update_mapping <class> <id> <k1> <v1> <k2> <v2> ...`, applies one
//! update per pair, in order, and stops at the first pair that fails. Pairs
//! applied before the failure stay applied.
//!
//! Declared fields go through [`coerce_for`] and must fit their type.
//! Any other attribute name is accepted and takes whatever [`coerce`] makes
//! of the value. Reserved names (`id`, `created_at`, `updated_at`, and the
//! type discriminator) are silently ignored.

use crate::commands::CmdResult;
use crate::error::{Result, UsageError};
use crate::model::is_reserved;
use crate::parser::{tokenize, unquote};
use crate::store::{ObjectStore, StorageBackend};
use crate::value::{coerce, coerce_for};
use tracing::debug;

use super::helpers::require_key;

pub fn run<B: StorageBackend>(store: &mut ObjectStore<B>, args: &str) -> Result<CmdResult> {
    let tokens = tokenize(args);
    let mut result = CmdResult::default();
    apply(store, &tokens, &mut result)?;
    Ok(result)
}

pub fn run_mapping<B: StorageBackend>(
    store: &mut ObjectStore<B>,
    args: &str,
) -> Result<CmdResult> {
    let tokens = tokenize(args);
    let mut result = CmdResult::default();

    if tokens.len() <= 2 {
        apply(store, &tokens, &mut result)?;
        return Ok(result);
    }

    let (target, pairs) = tokens.split_at(2);
    for pair in pairs.chunks(2) {
        let single: Vec<String> = target.iter().chain(pair).cloned().collect();
        if !apply(store, &single, &mut result)? {
            break;
        }
    }
    Ok(result)
}

/// Applies one `<class> <id> <attribute> <value>` update.
///
/// Returns `Ok(false)` when a usage error was reported on `result`.
fn apply<B: StorageBackend>(
    store: &mut ObjectStore<B>,
    tokens: &[String],
    result: &mut CmdResult,
) -> Result<bool> {
    let checked = require_key(store, tokens).and_then(|key| {
        let attribute = tokens
            .get(2)
            .map(|token| unquote(token))
            .ok_or(UsageError::AttributeNameMissing)?;
        let raw = tokens.get(3).ok_or(UsageError::ValueMissing)?;
        Ok((key, attribute, raw))
    });
    let (key, attribute, raw) = match checked {
        Ok(parts) => parts,
        Err(e) => {
            result.add_usage_error(e);
            return Ok(false);
        }
    };

    if is_reserved(&attribute) {
        debug!(%key, %attribute, "ignoring update of reserved attribute");
        return Ok(true);
    }

    let Some(record) = store.get_mut(&key) else {
        result.add_usage_error(UsageError::NoInstanceFound);
        return Ok(false);
    };
    let value = match record.kind().field_type(&attribute) {
        Some(ty) => match coerce_for(ty, raw) {
            Some(value) => value,
            None => {
                result.add_usage_error(UsageError::ValueTypeMismatch);
                return Ok(false);
            }
        },
        None => coerce(raw),
    };
    record.set(&attribute, value);
    record.touch();

    store.persist()?;
    debug!(%key, %attribute, "attribute updated");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::destroy;
    use crate::model::Kind;
    use crate::store::memory::fixtures::StoreFixture;
    use serde_json::json;

    fn fixture(kind: Kind) -> (StoreFixture, String) {
        let fixture = StoreFixture::new().with_records(kind, 1);
        let id = fixture.last_id();
        (fixture, id)
    }

    #[test]
    fn sets_attribute_and_refreshes_updated_at() {
        let (mut fx, id) = fixture(Kind::User);
        let key = format!("User.{}", id);
        let before = fx.store.get(&key).unwrap().updated_at();

        let result = run(&mut fx.store, &format!("User {} first_name NewName", id)).unwrap();
        assert!(result.is_success());

        let record = fx.store.get(&key).unwrap();
        assert_eq!(record.to_mapping()["first_name"], json!("NewName"));
        assert!(record.updated_at() >= before);
        assert!(fx.store.backend().document().unwrap().contains("NewName"));
    }

    #[test]
    fn free_form_attributes_are_coerced() {
        let (mut fx, id) = fixture(Kind::BaseModel);
        let key = format!("BaseModel.{}", id);

        run(&mut fx.store, &format!("BaseModel {} age 89", id)).unwrap();
        run(&mut fx.store, &format!("BaseModel {} ratio 3.5", id)).unwrap();
        run(&mut fx.store, &format!("BaseModel {} active True", id)).unwrap();
        run(&mut fx.store, &format!("BaseModel {} motto \"Hello world\"", id)).unwrap();

        let record = fx.store.get(&key).unwrap();
        assert_eq!(record.get("age"), Some(&json!(89)));
        assert_eq!(record.get("ratio"), Some(&json!(3.5)));
        assert_eq!(record.get("active"), Some(&json!(true)));
        assert_eq!(record.get("motto"), Some(&json!("Hello world")));
    }

    #[test]
    fn declared_fields_keep_their_type() {
        let (mut fx, id) = fixture(Kind::Place);
        let key = format!("Place.{}", id);

        run(&mut fx.store, &format!("Place {} name 1234", id)).unwrap();
        run(&mut fx.store, &format!("Place {} max_guest 4", id)).unwrap();
        let result = run(&mut fx.store, &format!("Place {} max_guest lots", id)).unwrap();
        assert_eq!(result.messages[0].content, "** value doesn't match attribute type **");

        let record = fx.store.get(&key).unwrap();
        assert_eq!(record.get("name"), Some(&json!("1234")));
        assert_eq!(record.get("max_guest"), Some(&json!(4)));
    }

    #[test]
    fn reserved_attributes_are_ignored() {
        let (mut fx, id) = fixture(Kind::State);
        let key = format!("State.{}", id);
        let before = fx.store.get(&key).unwrap().to_mapping();

        for attribute in ["id", "created_at", "updated_at", "type_name"] {
            let result = run(&mut fx.store, &format!("State {} {} changed", id, attribute)).unwrap();
            assert!(result.is_success());
            assert!(result.messages.is_empty());
        }

        assert_eq!(fx.store.get(&key).unwrap().to_mapping(), before);
        assert_eq!(fx.store.backend().document(), None);
    }

    #[test]
    fn reports_missing_pieces_in_order() {
        let (mut fx, id) = fixture(Kind::User);
        let cases = [
            (String::new(), "** class name missing **"),
            ("Ghost".to_string(), "** class doesn't exist **"),
            ("User".to_string(), "** instance id missing **"),
            ("User 404".to_string(), "** no instance found **"),
            (format!("User {}", id), "** attribute name missing **"),
            (format!("User {} email", id), "** value missing **"),
        ];
        for (args, expected) in cases {
            let result = run(&mut fx.store, &args).unwrap();
            assert_eq!(result.messages.len(), 1, "{}", args);
            assert_eq!(result.messages[0].content, expected, "{}", args);
        }
    }

    #[test]
    fn mapping_applies_every_pair() {
        let (mut fx, id) = fixture(Kind::BaseModel);
        let result = run_mapping(&mut fx.store, &format!("BaseModel {} name A age 89", id)).unwrap();
        assert!(result.is_success());

        let record = fx.store.get(&format!("BaseModel.{}", id)).unwrap();
        assert_eq!(record.get("name"), Some(&json!("A")));
        assert_eq!(record.get("age"), Some(&json!(89)));
    }

    #[test]
    fn mapping_stops_at_first_failure_without_rollback() {
        let (mut fx, id) = fixture(Kind::Place);
        let args = format!("Place {} name Loft number_rooms many max_guest 3", id);
        let result = run_mapping(&mut fx.store, &args).unwrap();

        assert!(!result.is_success());
        assert_eq!(result.messages.len(), 1);
        let record = fx.store.get(&format!("Place.{}", id)).unwrap();
        assert_eq!(record.get("name"), Some(&json!("Loft")));
        assert_eq!(record.get("number_rooms"), Some(&json!(0)));
        assert_eq!(record.get("max_guest"), Some(&json!(0)));
    }

    #[test]
    fn mapping_reports_trailing_key_without_value() {
        let (mut fx, id) = fixture(Kind::User);
        let result = run_mapping(&mut fx.store, &format!("User {} email a@b.c last_name", id)).unwrap();

        assert_eq!(result.messages[0].content, "** value missing **");
        let record = fx.store.get(&format!("User.{}", id)).unwrap();
        assert_eq!(record.get("email"), Some(&json!("a@b.c")));
    }

    #[test]
    fn mapping_on_deleted_instance_fails() {
        let (mut fx, id) = fixture(Kind::City);
        destroy::run(&mut fx.store, &format!("City {}", id)).unwrap();

        let result = run_mapping(&mut fx.store, &format!("City {} name Paris", id)).unwrap();
        assert_eq!(result.messages[0].content, "** no instance found **");
    }

    #[test]
    fn mapping_without_pairs_asks_for_attribute() {
        let (mut fx, id) = fixture(Kind::City);
        let result = run_mapping(&mut fx.store, &format!("City {}", id)).unwrap();
        assert_eq!(result.messages[0].content, "** attribute name missing **");

        let result = run_mapping(&mut fx.store, "").unwrap();
        assert_eq!(result.messages[0].content, "** class name missing **");
    }

    #[test]
    fn persist_failure_is_an_error() {
        let (mut fx, id) = fixture(Kind::Review);
        fx.store.backend().set_simulate_write_error(true);
        assert!(run(&mut fx.store, &format!("Review {} text hi", id)).is_err());
    }
}
