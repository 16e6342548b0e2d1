//! Text command parsing for the line-oriented driver.

use std::fmt;
use std::path::PathBuf;

use crate::editor::index::NodeId;

/// High-level commands abstracted from raw input lines.
///
/// These represent user intentions (select a node, add a key, save) rather
/// than specific text, so the handler never deals with string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the node index as a tree
    Tree,
    /// Select a node by id
    Select(NodeId),
    /// Show the active node
    Show,
    /// Update the active leaf from text
    Set(String),
    /// Update the active boolean leaf
    Flag(bool),
    /// Append an element to the active array
    AddElement,
    /// Add a key to the active object
    AddKey(String),
    /// Delete the active node
    Delete,
    /// Toggle the structure lock
    ToggleLock,
    /// Replace the document with the sample document
    New,
    /// Load a document from disk
    Open(PathBuf),
    /// Print the serialized document
    Print,
    /// Save, optionally to a new path
    Save(Option<PathBuf>),
    /// Show command help
    Help,
    /// Leave the driver
    Quit,
}

/// Error for a line that is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError(pub String);

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CommandError {}

/// Help text listing every command.
pub const HELP_TEXT: &str = "\
Commands:
  tree               show the document with node ids
  select <id>        select a node
  show               show the selected node
  set <text>         update the selected string or number
  flag <true|false>  update the selected boolean
  add                append an element to the selected array
  add-key <key>      add a key to the selected object
  delete             delete the selected node
  lock               toggle the structure lock
  new                start a new document
  open <path>        load a document
  print              print the document as JSON
  save [path]        save the document
  help               show this help
  quit               exit";

/// Parses one input line into a `Command`.
///
/// Blank lines yield `Ok(None)`. The argument of `set` and `add-key` is
/// taken verbatim after the single separating space, so leading and trailing
/// whitespace in values survives.
///
/// # Example
///
/// ```
/// use jsonquill::input::command::{parse_command, Command};
///
/// assert_eq!(parse_command("set  two words").unwrap(), Some(Command::Set(" two words".to_string())));
/// assert_eq!(parse_command("lock").unwrap(), Some(Command::ToggleLock));
/// assert!(parse_command("select abc").is_err());
/// ```
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let trimmed = line.trim_start();
    let (name, arg) = match trimmed.split_once(' ') {
        Some((name, arg)) => (name, Some(arg)),
        None => (trimmed, None),
    };

    let command = match (name, arg) {
        ("tree", None) => Command::Tree,
        ("select", Some(id)) => {
            let raw = id
                .trim()
                .parse::<u64>()
                .map_err(|_| CommandError(format!("Invalid node id: '{}'", id.trim())))?;
            Command::Select(NodeId::new(raw))
        }
        ("show", None) => Command::Show,
        ("set", Some(text)) => Command::Set(text.to_string()),
        ("set", None) => Command::Set(String::new()),
        ("flag", Some(value)) => match value.trim() {
            "true" => Command::Flag(true),
            "false" => Command::Flag(false),
            other => return Err(CommandError(format!("Expected true or false, got '{}'", other))),
        },
        ("add", None) => Command::AddElement,
        ("add-key", Some(key)) if !key.is_empty() => Command::AddKey(key.to_string()),
        ("delete", None) => Command::Delete,
        ("lock", None) => Command::ToggleLock,
        ("new", None) => Command::New,
        ("open", Some(path)) if !path.trim().is_empty() => {
            Command::Open(PathBuf::from(path.trim()))
        }
        ("print", None) => Command::Print,
        ("save", None) => Command::Save(None),
        ("save", Some(path)) if !path.trim().is_empty() => {
            Command::Save(Some(PathBuf::from(path.trim())))
        }
        ("help", None) => Command::Help,
        ("quit", None) | ("q", None) => Command::Quit,
        _ => return Err(CommandError(format!("Unknown command: '{}'", trimmed))),
    };

    Ok(Some(command))
}
