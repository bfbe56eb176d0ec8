//! Positional argument checks shared by the commands.
//!
//! Every check runs left to right and stops at the first missing piece, so
//! the user always sees exactly one complaint, in this order: class name,
//! class, instance id, instance.

use crate::error::UsageError;
use crate::model::{store_key, Kind};
use crate::parser::unquote;
use crate::store::{ObjectStore, StorageBackend};

pub type Checked<T> = std::result::Result<T, UsageError>;

/// The class named by the first token.
pub fn require_kind(tokens: &[String]) -> Checked<Kind> {
    let name = tokens.first().ok_or(UsageError::ClassNameMissing)?;
    unquote(name).parse()
}

/// The class named by the first token, if there is one.
pub fn optional_kind(tokens: &[String]) -> Checked<Option<Kind>> {
    match tokens.first() {
        None => Ok(None),
        Some(name) => unquote(name).parse().map(Some),
    }
}

/// The store key for `<class> <id>`, checked against the live mapping.
pub fn require_key<B: StorageBackend>(store: &ObjectStore<B>, tokens: &[String]) -> Checked<String> {
    let kind = require_kind(tokens)?;
    let id = tokens
        .get(1)
        .map(|token| unquote(token))
        .ok_or(UsageError::InstanceIdMissing)?;
    let key = store_key(kind, &id);
    if !store.all().contains_key(&key) {
        return Err(UsageError::NoInstanceFound);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn checks_run_in_order() {
        let fixture = StoreFixture::new().with_records(Kind::User, 1);
        let id = fixture.last_id();
        let store = &fixture.store;

        assert_eq!(require_key(store, &tokenize("")), Err(UsageError::ClassNameMissing));
        assert_eq!(
            require_key(store, &tokenize("Nope 123")),
            Err(UsageError::ClassDoesNotExist)
        );
        assert_eq!(require_key(store, &tokenize("User")), Err(UsageError::InstanceIdMissing));
        assert_eq!(
            require_key(store, &tokenize("User missing")),
            Err(UsageError::NoInstanceFound)
        );
        assert_eq!(
            require_key(store, &tokenize(&format!("User {}", id))),
            Ok(format!("User.{}", id))
        );
    }

    #[test]
    fn class_checked_before_id_presence() {
        let store = StoreFixture::new().store;
        assert_eq!(require_key(&store, &tokenize("Nope")), Err(UsageError::ClassDoesNotExist));
    }

    #[test]
    fn id_must_match_the_class() {
        let fixture = StoreFixture::new().with_records(Kind::User, 1);
        let id = fixture.last_id();
        assert_eq!(
            require_key(&fixture.store, &tokenize(&format!("Place {}", id))),
            Err(UsageError::NoInstanceFound)
        );
    }

    #[test]
    fn quoted_identifiers_are_unquoted() {
        let fixture = StoreFixture::new().with_records(Kind::City, 1);
        let id = fixture.last_id();
        let tokens = tokenize(&format!("\"City\" \"{}\"", id));
        assert_eq!(require_key(&fixture.store, &tokens), Ok(format!("City.{}", id)));
    }

    #[test]
    fn optional_kind_allows_absence() {
        assert_eq!(optional_kind(&[]), Ok(None));
        assert_eq!(optional_kind(&tokenize("Review")), Ok(Some(Kind::Review)));
        assert_eq!(optional_kind(&tokenize("Bogus")), Err(UsageError::ClassDoesNotExist));
    }
}
