use crate::commands::{CmdMessage, CmdOutput, CmdResult};
use crate::error::Result;

const TOPICS: &[(&str, &str)] = &[
    ("EOF", "Exit the program at end of input"),
    ("all", "Prints all instances, optionally of one class\n    Usage: all [<ClassName>] or <ClassName>.all()"),
    ("count", "Prints the number of instances, optionally of one class\n    Usage: count [<ClassName>] or <ClassName>.count()"),
    ("create", "Creates a new instance, saves it and prints its id\n    Usage: create <ClassName>"),
    ("destroy", "Deletes an instance by class name and id\n    Usage: destroy <ClassName> <id> or <ClassName>.destroy(\"<id>\")"),
    ("help", "List available commands with \"help\" or detailed help with \"help <command>\""),
    ("quit", "Quit command to exit the program"),
    ("show", "Prints an instance by class name and id\n    Usage: show <ClassName> <id> or <ClassName>.show(\"<id>\")"),
    ("update", "Updates an instance attribute\n    Usage: update <ClassName> <id> <attribute> <value>\n       or: <ClassName>.update(\"<id>\", \"<attribute>\", \"<value>\")\n       or: <ClassName>.update(\"<id>\", {\"<attribute>\": <value>, ...})"),
];

const HEADER: &str = "Documented commands (type help <topic>):";

pub fn run(args: &str) -> Result<CmdResult> {
    let topic = args.split_whitespace().next();
    let result = CmdResult::default();

    let Some(topic) = topic else {
        let names: Vec<&str> = TOPICS.iter().map(|(name, _)| *name).collect();
        let text = format!("{}\n{}\n{}", HEADER, "=".repeat(HEADER.len()), names.join("  "));
        return Ok(result.with_output(CmdOutput::Help(text)));
    };

    match TOPICS.iter().find(|(name, _)| *name == topic) {
        Some((_, text)) => Ok(result.with_output(CmdOutput::Help(text.to_string()))),
        None => {
            let mut result = result;
            result.add_message(CmdMessage::warning(format!("*** No help on {}", topic)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn help_text(result: CmdResult) -> String {
        match result.output {
            Some(CmdOutput::Help(text)) => text,
            other => panic!("Expected Help, got {:?}", other),
        }
    }

    #[test]
    fn lists_topics() {
        let text = help_text(run("").unwrap());
        assert!(text.starts_with(HEADER));
        for command in ["EOF", "all", "count", "create", "destroy", "quit", "show", "update"] {
            assert!(text.contains(command), "{}", command);
        }
    }

    #[test]
    fn single_topic() {
        assert_eq!(help_text(run("quit").unwrap()), "Quit command to exit the program");
    }

    #[test]
    fn unknown_topic() {
        let result = run("fly").unwrap();
        assert!(result.output.is_none());
        assert_eq!(result.messages[0].content, "*** No help on fly");
    }
}
