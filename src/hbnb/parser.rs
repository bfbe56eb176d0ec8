//! # Command Line Parsing
//!
//! One input line becomes one [`Instruction`]: a command plus a single
//! argument string for the dispatcher to tokenize. Three surface syntaxes
//! normalize to the same instruction:
//!
//! ```text
//! show User abc-123                         -> show User abc-123
//! User.show("abc-123")                      -> show User abc-123
//! BaseModel.update("1", {"name": "A", "age": 89})
//!                                           -> update_mapping BaseModel 1 name A age 89
//! ```
//!
//! A dotted call that cannot be parsed is never an error for the caller: the
//! line comes back as [`CommandName::Unknown`] and the dispatcher reports
//! unknown syntax.

use crate::value::coerce;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    Create,
    Show,
    Destroy,
    Update,
    UpdateMapping,
    All,
    Count,
    Help,
    Quit,
    Eof,
    Empty,
    Unknown,
}

impl CommandName {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandName::Create => "create",
            CommandName::Show => "show",
            CommandName::Destroy => "destroy",
            CommandName::Update => "update",
            CommandName::UpdateMapping => "update_mapping",
            CommandName::All => "all",
            CommandName::Count => "count",
            CommandName::Help => "help",
            CommandName::Quit => "quit",
            CommandName::Eof => "EOF",
            CommandName::Empty => "",
            CommandName::Unknown => "",
        }
    }

    /// Commands a user may type directly. `update_mapping` is not one of them.
    fn from_word(word: &str) -> Option<Self> {
        let name = match word {
            "create" => CommandName::Create,
            "show" => CommandName::Show,
            "destroy" => CommandName::Destroy,
            "update" => CommandName::Update,
            "all" => CommandName::All,
            "count" => CommandName::Count,
            "help" | "?" => CommandName::Help,
            "quit" => CommandName::Quit,
            "EOF" => CommandName::Eof,
            _ => return None,
        };
        Some(name)
    }

    /// Methods reachable through `Type.method(...)`.
    fn from_method(method: &str) -> Option<Self> {
        match method {
            "create" => Some(CommandName::Create),
            "show" => Some(CommandName::Show),
            "destroy" => Some(CommandName::Destroy),
            "update" => Some(CommandName::Update),
            "all" => Some(CommandName::All),
            "count" => Some(CommandName::Count),
            _ => None,
        }
    }
}

/// A normalized command line.
///
/// For [`CommandName::Unknown`], `args` holds the whole original line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub command: CommandName,
    pub args: String,
}

impl Instruction {
    pub fn new(command: CommandName, args: impl Into<String>) -> Self {
        Self {
            command,
            args: args.into(),
        }
    }

    fn unknown(line: &str) -> Self {
        Self::new(CommandName::Unknown, line)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.command {
            CommandName::Unknown => f.write_str(&self.args),
            _ if self.args.is_empty() => f.write_str(self.command.as_str()),
            _ => write!(f, "{} {}", self.command.as_str(), self.args),
        }
    }
}

#[derive(Error, Debug)]
enum SyntaxError {
    #[error("unknown method `{0}`")]
    UnknownMethod(String),

    #[error("unterminated or malformed quoted argument")]
    BadQuote,

    #[error("empty argument")]
    EmptyArgument,

    #[error("expected `,` between arguments")]
    ExpectedComma,

    #[error("mapping argument is only accepted by update")]
    UnexpectedMapping,

    #[error("too many arguments before the mapping")]
    TooManyArguments,

    #[error("malformed mapping: {0}")]
    MalformedMapping(#[from] serde_json::Error),
}

enum Arg {
    Quoted(String),
    Bare(String),
}

impl Arg {
    fn text(&self) -> &str {
        match self {
            Arg::Quoted(s) | Arg::Bare(s) => s,
        }
    }
}

struct Call<'a> {
    type_name: &'a str,
    method: &'a str,
    args: &'a str,
}

pub fn parse_line(line: &str) -> Instruction {
    let line = line.trim();
    if line.is_empty() {
        return Instruction::new(CommandName::Empty, "");
    }

    if let Some(call) = split_call(line) {
        return match normalize_call(&call) {
            Ok(instruction) => instruction,
            Err(e) => {
                debug!(line, error = %e, "dotted call not understood");
                Instruction::unknown(line)
            }
        };
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match CommandName::from_word(word) {
        Some(command) => Instruction::new(command, rest),
        None => Instruction::unknown(line),
    }
}

/// Splits the argument string into tokens on whitespace outside double quotes.
///
/// Quotes stay in the token; value coercion or [`unquote`] removes them.
pub fn tokenize(args: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in args.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Strips JSON string quoting from an identifier token, if present.
pub fn unquote(token: &str) -> String {
    if token.starts_with('"') {
        if let Ok(s) = serde_json::from_str::<String>(token) {
            return s;
        }
    }
    token.to_string()
}

fn split_call(line: &str) -> Option<Call<'_>> {
    let open = line.find('(')?;
    let inner = line.strip_suffix(')')?;
    let (type_name, method) = line[..open].split_once('.')?;
    if !is_word(type_name) || !is_word(method) {
        return None;
    }
    Some(Call {
        type_name,
        method,
        args: &inner[open + 1..],
    })
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn normalize_call(call: &Call<'_>) -> Result<Instruction, SyntaxError> {
    let command = CommandName::from_method(call.method)
        .ok_or_else(|| SyntaxError::UnknownMethod(call.method.to_string()))?;
    let mut tokens = vec![call.type_name.to_string()];

    if let Some(brace) = find_unquoted(call.args, '{') {
        if command != CommandName::Update {
            return Err(SyntaxError::UnexpectedMapping);
        }
        let (head, object) = call.args.split_at(brace);
        let mapping: Map<String, Value> = serde_json::from_str(object.trim())?;

        let head = head.trim();
        if !head.is_empty() {
            let head = head.strip_suffix(',').ok_or(SyntaxError::ExpectedComma)?;
            let ids = parse_args(head)?;
            if ids.len() > 1 {
                return Err(SyntaxError::TooManyArguments);
            }
            tokens.extend(ids.iter().map(|id| render_ident(id.text())));
        }
        for (key, value) in &mapping {
            tokens.push(render_ident(key));
            tokens.push(render_value(value));
        }
        return Ok(Instruction::new(CommandName::UpdateMapping, tokens.join(" ")));
    }

    for (i, arg) in parse_args(call.args)?.iter().enumerate() {
        // update(id, attribute, value): a quoted value stays a string
        match arg {
            Arg::Quoted(s) if command == CommandName::Update && i == 2 => {
                tokens.push(render_value_str(s))
            }
            _ => tokens.push(render_ident(arg.text())),
        }
    }
    Ok(Instruction::new(command, tokens.join(" ")))
}

/// Parses `"a", 'b', c` into its arguments, quotes removed.
fn parse_args(s: &str) -> Result<Vec<Arg>, SyntaxError> {
    let mut args = Vec::new();
    let mut rest = s.trim();
    if rest.is_empty() {
        return Ok(args);
    }

    loop {
        let (arg, tail) = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let end = closing_quote(rest, q).ok_or(SyntaxError::BadQuote)?;
                let arg = if q == '"' {
                    serde_json::from_str::<String>(&rest[..=end])
                        .map_err(|_| SyntaxError::BadQuote)?
                } else {
                    rest[1..end].to_string()
                };
                (Arg::Quoted(arg), rest[end + 1..].trim_start())
            }
            _ => {
                let end = rest.find(',').unwrap_or(rest.len());
                let arg = rest[..end].trim();
                if arg.is_empty() {
                    return Err(SyntaxError::EmptyArgument);
                }
                (Arg::Bare(arg.to_string()), &rest[end..])
            }
        };
        args.push(arg);

        if tail.is_empty() {
            return Ok(args);
        }
        rest = tail
            .strip_prefix(',')
            .ok_or(SyntaxError::ExpectedComma)?
            .trim_start();
        if rest.is_empty() {
            return Err(SyntaxError::EmptyArgument);
        }
    }
}

/// Byte index of the quote closing the one at the start of `s`.
fn closing_quote(s: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        if escaped {
            escaped = false;
        } else if c == '\\' && quote == '"' {
            escaped = true;
        } else if c == quote {
            return Some(i);
        }
    }
    None
}

fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' && q == '"' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == target => return Some(i),
            None => {}
        }
    }
    None
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty() || s.contains('"') || s.chars().any(char::is_whitespace)
}

fn quoted(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn render_ident(s: &str) -> String {
    if needs_quoting(s) {
        quoted(s)
    } else {
        s.to_string()
    }
}

/// A string value, quoted whenever coercion would otherwise change its type.
fn render_value_str(s: &str) -> String {
    if needs_quoting(s) || !matches!(coerce(s), Value::String(ref c) if c == s) {
        quoted(s)
    } else {
        s.to_string()
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => render_value_str(s),
        other => other.to_string(),
    }
}
