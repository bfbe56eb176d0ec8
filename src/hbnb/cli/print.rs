use console::style;
use hbnb::api::{CmdOutput, MessageLevel};
use hbnb::commands::{CmdMessage, CmdResult};
use std::io::{self, Write};

/// Renders a command output the way the shell prints it.
pub(super) fn format_output(output: &CmdOutput) -> String {
    match output {
        CmdOutput::Created(id) => id.clone(),
        CmdOutput::Shown(record) => record.label(),
        CmdOutput::Listed(records) => {
            let labels: Vec<String> = records.iter().map(|record| record.label()).collect();
            format!("[{}]", labels.join(", "))
        }
        CmdOutput::Counted(count) => count.to_string(),
        CmdOutput::Help(text) => text.clone(),
    }
}

fn format_message(message: &CmdMessage, styled: bool) -> String {
    let content = style(&message.content).force_styling(styled);
    match message.level {
        MessageLevel::Warning => content.yellow().to_string(),
        MessageLevel::Error => content.red().to_string(),
    }
}

pub(super) fn write_result<W: Write>(out: &mut W, result: &CmdResult, styled: bool) -> io::Result<()> {
    if let Some(output) = &result.output {
        writeln!(out, "{}", format_output(output))?;
    }
    for message in &result.messages {
        writeln!(out, "{}", format_message(message, styled))?;
    }
    Ok(())
}
