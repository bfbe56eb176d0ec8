use thiserror::Error;

/// Faults that abort the current operation.
///
/// Mistakes in what the user typed are not faults; those are [`UsageError`]s
/// and end up as messages on the command result.
#[derive(Error, Debug)]
pub enum HbnbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown record type in store: {0}")]
    UnknownType(String),

    #[error("Invalid record {key}: {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, HbnbError>;

/// User-facing conditions reported by the dispatcher.
///
/// The display strings are the exact lines printed to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    #[error("** class name missing **")]
    ClassNameMissing,

    #[error("** class doesn't exist **")]
    ClassDoesNotExist,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    NoInstanceFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    ValueMissing,

    #[error("** value doesn't match attribute type **")]
    ValueTypeMismatch,
}
