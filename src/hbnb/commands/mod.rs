//! # Command Layer
//!
//! One module per shell command. Each `run` takes the store and the
//! normalized argument string, and returns a [`CmdResult`].
//!
//! Mistakes in the arguments are not errors here: they become a message on
//! the result (see [`UsageError`]) and the session carries on. `Err` is
//! reserved for faults such as a failed write of the backing file.

use crate::error::UsageError;
use crate::model::Record;

pub mod all;
pub mod count;
pub mod create;
pub mod destroy;
pub mod help;
pub mod helpers;
pub mod show;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command produced for the user to see.
#[derive(Debug, Clone)]
pub enum CmdOutput {
    Created(String),
    Shown(Record),
    Listed(Vec<Record>),
    Counted(usize),
    Help(String),
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub output: Option<CmdOutput>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_usage_error(&mut self, error: UsageError) {
        self.add_message(CmdMessage::error(error.to_string()));
    }

    pub fn with_output(mut self, output: CmdOutput) -> Self {
        self.output = Some(output);
        self
    }

    /// True when no error message was reported.
    pub fn is_success(&self) -> bool {
        !self
            .messages
            .iter()
            .any(|message| message.level == MessageLevel::Error)
    }
}

impl From<UsageError> for CmdResult {
    fn from(error: UsageError) -> Self {
        let mut result = CmdResult::default();
        result.add_usage_error(error);
        result
    }
}
