//! # API Facade
//!
//! The single entry point for shell operations, whatever the front end.
//! [`HbnbApi::execute`] takes one raw input line, normalizes it with the
//! parser and dispatches it to the matching command.
//!
//! Like the command layer underneath it, the facade never prints and never
//! exits. It returns [`Dispatch`]: either a [`CmdResult`] to render or a
//! request to end the session.
//!
//! `HbnbApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `HbnbApi<FsBackend>`
//! - Testing: `HbnbApi<MemBackend>`

use crate::commands::{self, CmdMessage, CmdResult};
use crate::error::Result;
use crate::parser::{parse_line, CommandName, Instruction};
use crate::store::{ObjectStore, StorageBackend};
use tracing::debug;

#[derive(Debug)]
pub enum Dispatch {
    Continue(CmdResult),
    Exit,
}

/// The main API facade for shell operations.
pub struct HbnbApi<B: StorageBackend> {
    store: ObjectStore<B>,
}

impl<B: StorageBackend> HbnbApi<B> {
    /// Wraps a store. The caller is responsible for restoring it first.
    pub fn new(store: ObjectStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ObjectStore<B> {
        &self.store
    }

    /// Parses and runs one input line.
    pub fn execute(&mut self, line: &str) -> Result<Dispatch> {
        let instruction = parse_line(line);
        debug!(%instruction, "dispatching");
        self.dispatch(&instruction)
    }

    pub fn dispatch(&mut self, instruction: &Instruction) -> Result<Dispatch> {
        let args = instruction.args.as_str();
        let result = match instruction.command {
            CommandName::Create => self.create(args)?,
            CommandName::Show => self.show(args)?,
            CommandName::Destroy => self.destroy(args)?,
            CommandName::Update => self.update(args)?,
            CommandName::UpdateMapping => self.update_mapping(args)?,
            CommandName::All => self.all(args)?,
            CommandName::Count => self.count(args)?,
            CommandName::Help => commands::help::run(args)?,
            CommandName::Quit | CommandName::Eof => return Ok(Dispatch::Exit),
            CommandName::Empty => CmdResult::default(),
            CommandName::Unknown => unknown_syntax(args),
        };
        Ok(Dispatch::Continue(result))
    }

    pub fn create(&mut self, args: &str) -> Result<CmdResult> {
        commands::create::run(&mut self.store, args)
    }

    pub fn show(&self, args: &str) -> Result<CmdResult> {
        commands::show::run(&self.store, args)
    }

    pub fn destroy(&mut self, args: &str) -> Result<CmdResult> {
        commands::destroy::run(&mut self.store, args)
    }

    pub fn update(&mut self, args: &str) -> Result<CmdResult> {
        commands::update::run(&mut self.store, args)
    }

    pub fn update_mapping(&mut self, args: &str) -> Result<CmdResult> {
        commands::update::run_mapping(&mut self.store, args)
    }

    pub fn all(&self, args: &str) -> Result<CmdResult> {
        commands::all::run(&self.store, args)
    }

    pub fn count(&self, args: &str) -> Result<CmdResult> {
        commands::count::run(&self.store, args)
    }
}

fn unknown_syntax(line: &str) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::error(format!("*** Unknown syntax: {}", line)));
    result
}

pub use crate::commands::{CmdOutput, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn api() -> HbnbApi<MemBackend> {
        HbnbApi::new(InMemoryStore::new())
    }

    fn run(api: &mut HbnbApi<MemBackend>, line: &str) -> CmdResult {
        match api.execute(line).unwrap() {
            Dispatch::Continue(result) => result,
            Dispatch::Exit => panic!("Unexpected exit for {}", line),
        }
    }

    fn create(api: &mut HbnbApi<MemBackend>, kind: &str) -> String {
        match run(api, &format!("create {}", kind)).output {
            Some(CmdOutput::Created(id)) => id,
            other => panic!("Expected Created, got {:?}", other),
        }
    }

    #[test]
    fn quit_and_eof_exit() {
        let mut api = api();
        assert!(matches!(api.execute("quit").unwrap(), Dispatch::Exit));
        assert!(matches!(api.execute("EOF").unwrap(), Dispatch::Exit));
    }

    #[test]
    fn empty_line_does_nothing() {
        let mut api = api();
        let result = run(&mut api, "");
        assert!(result.output.is_none());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn unknown_command_reports_syntax() {
        let mut api = api();
        let result = run(&mut api, "fly away");
        assert_eq!(result.messages[0].content, "*** Unknown syntax: fly away");
        assert!(api.store().is_empty());
    }

    #[test]
    fn dotted_show_matches_canonical_show() {
        let mut api = api();
        let id = create(&mut api, "User");

        let dotted = run(&mut api, &format!("User.show(\"{}\")", id));
        let canonical = run(&mut api, &format!("show User {}", id));
        match (dotted.output, canonical.output) {
            (Some(CmdOutput::Shown(a)), Some(CmdOutput::Shown(b))) => assert_eq!(a, b),
            other => panic!("Expected two Shown outputs, got {:?}", other),
        }
    }

    #[test]
    fn dotted_mapping_update() {
        let mut api = api();
        let id = create(&mut api, "BaseModel");

        let result = run(
            &mut api,
            &format!("BaseModel.update(\"{}\", {{\"name\": \"A\", \"age\": 89}})", id),
        );
        assert!(result.is_success());

        let record = api.store().get(&format!("BaseModel.{}", id)).unwrap();
        assert_eq!(record.get("name"), Some(&json!("A")));
        assert_eq!(record.get("age"), Some(&json!(89)));
    }

    #[test]
    fn mapping_update_with_embedded_quote_keeps_every_pair() {
        let mut api = api();
        let id = create(&mut api, "BaseModel");

        let result = run(
            &mut api,
            &format!(r#"BaseModel.update("{}", {{"name": "a\"b", "age": 89}})"#, id),
        );
        assert!(result.is_success());

        let record = api.store().get(&format!("BaseModel.{}", id)).unwrap();
        assert_eq!(record.get("name"), Some(&json!("a\"b")));
        assert_eq!(record.get("age"), Some(&json!(89)));
    }

    #[test]
    fn mapping_update_keeps_backslashes_and_non_ascii() {
        let mut api = api();
        let id = create(&mut api, "User");

        run(
            &mut api,
            &format!(
                r#"User.update("{}", {{"first_name": "Zoë \\o/", "last_name": "\"Q\""}})"#,
                id
            ),
        );
        let record = api.store().get(&format!("User.{}", id)).unwrap();
        assert_eq!(record.get("first_name"), Some(&json!("Zoë \\o/")));
        assert_eq!(record.get("last_name"), Some(&json!("\"Q\"")));
    }

    #[test]
    fn dotted_update_with_spaces() {
        let mut api = api();
        let id = create(&mut api, "User");

        run(
            &mut api,
            &format!("User.update(\"{}\", \"first_name\", \"Betty Holberton\")", id),
        );
        let record = api.store().get(&format!("User.{}", id)).unwrap();
        assert_eq!(record.get("first_name"), Some(&json!("Betty Holberton")));
    }

    #[test]
    fn count_matches_all() {
        let mut api = api();
        create(&mut api, "BaseModel");
        create(&mut api, "User");

        match run(&mut api, "count").output {
            Some(CmdOutput::Counted(n)) => assert_eq!(n, api.store().all().len()),
            other => panic!("Expected Counted, got {:?}", other),
        }
        match run(&mut api, "BaseModel.count()").output {
            Some(CmdOutput::Counted(n)) => assert_eq!(n, 1),
            other => panic!("Expected Counted, got {:?}", other),
        }
    }

    #[test]
    fn destroy_then_show() {
        let mut api = api();
        let id = create(&mut api, "Review");

        run(&mut api, &format!("Review.destroy(\"{}\")", id));
        assert!(!api.store().all().contains_key(&format!("Review.{}", id)));

        let result = run(&mut api, &format!("show Review {}", id));
        assert_eq!(result.messages[0].content, "** no instance found **");
    }

    #[test]
    fn malformed_mapping_is_unknown_syntax() {
        let mut api = api();
        let id = create(&mut api, "User");
        let line = format!("User.update(\"{}\", {{'name': 'x'}})", id);

        let result = run(&mut api, &line);
        assert_eq!(result.messages[0].content, format!("*** Unknown syntax: {}", line));
    }
}
