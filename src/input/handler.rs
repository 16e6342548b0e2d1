//! Command dispatch for the line-oriented driver.
//!
//! `CommandHandler` applies one `Command` to an `EditSession` and writes
//! everything the user should see (tree listings, values, status messages)
//! to an output stream. After every structural command it prints the freshly
//! rebuilt tree, since node ids from any earlier listing are no longer valid.

use std::io::{BufRead, Write};

use anyhow::Result;

use super::command::{parse_command, Command, HELP_TEXT};
use crate::config::Config;
use crate::document::format::format_value;
use crate::editor::index::NodeIndex;
use crate::editor::session::{EditSession, LeafInput, MessageLevel};

/// Renders the index as an indented tree, one node per line.
///
/// # Example
///
/// ```
/// use jsonquill::document::parser::parse_json;
/// use jsonquill::editor::index::NodeIndex;
/// use jsonquill::input::handler::render_tree;
///
/// let index = NodeIndex::build(&parse_json(r#"{"a": [true]}"#).unwrap());
/// let first = index.entries()[0].id.raw();
/// let expected = format!(
///     "{:>4}  $: {{ 1 field }}\n{:>4}    a: [ 1 item ]\n{:>4}      [0]: true\n",
///     first, first + 1, first + 2
/// );
/// assert_eq!(render_tree(&index), expected);
/// ```
pub fn render_tree(index: &NodeIndex) -> String {
    let mut out = String::new();
    for entry in index.entries() {
        out.push_str(&format!(
            "{:>4}  {}{}: {}\n",
            entry.id,
            "  ".repeat(entry.depth),
            entry.label,
            entry.preview
        ));
    }
    out
}

/// Applies commands to a session.
pub struct CommandHandler {
    config: Config,
}

impl CommandHandler {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads commands from `input` until EOF or `quit`.
    ///
    /// Parse errors and failed operations are reported and the loop goes on;
    /// only I/O errors on the streams end it early.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &self,
        session: &mut EditSession,
        input: R,
        out: &mut W,
        err: &mut E,
    ) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if !self.execute(command, session, out, err)? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(parse_err) => writeln!(err, "{}", parse_err)?,
            }
        }
        Ok(())
    }

    /// Executes one command. Returns `false` when the driver should stop.
    pub fn execute<W: Write, E: Write>(
        &self,
        command: Command,
        session: &mut EditSession,
        out: &mut W,
        err: &mut E,
    ) -> Result<bool> {
        let mut structural = false;

        match command {
            Command::Quit => return Ok(false),
            Command::Help => {
                writeln!(out, "{}", HELP_TEXT)?;
                return Ok(true);
            }
            Command::Tree => {
                write!(out, "{}", render_tree(session.index()))?;
                return Ok(true);
            }
            Command::Show => {
                match (session.active_path(), session.active_value()) {
                    (Some(path), Ok(Some(value))) => writeln!(
                        out,
                        "{} ({}): {}",
                        path.to_display_path(),
                        value.type_name(),
                        format_value(value)
                    )?,
                    (_, Err(e)) => writeln!(err, "Error: {}", e)?,
                    _ => writeln!(out, "Select an item from the tree to edit.")?,
                }
                return Ok(true);
            }
            Command::Print => {
                match session.serialize(self.config.indent_size) {
                    Some(text) => writeln!(out, "{}", text)?,
                    None => writeln!(err, "No data to print.")?,
                }
                return Ok(true);
            }
            Command::Select(id) => {
                let _ = session.select(id);
            }
            Command::Set(text) => {
                let _ = session.update_active_leaf(LeafInput::Text(text));
            }
            Command::Flag(value) => {
                let _ = session.update_active_leaf(LeafInput::Flag(value));
            }
            Command::AddElement => {
                structural = session.insert_array_element().is_ok_and(|p| p.is_some());
            }
            Command::AddKey(key) => {
                structural = session.insert_object_member(&key).is_ok_and(|p| p.is_some());
            }
            Command::Delete => {
                structural = session.delete_active().is_ok_and(|v| v.is_some());
            }
            Command::ToggleLock => {
                session.toggle_lock();
            }
            Command::New => {
                session.new_document();
                structural = true;
            }
            Command::Open(path) => {
                structural = session.load_file(&path).is_ok();
            }
            Command::Save(path) => {
                let _ = session.save(path.as_deref(), &self.config);
            }
        }

        if let Some(message) = session.message() {
            match message.level {
                MessageLevel::Info => writeln!(out, "{}", message.text)?,
                MessageLevel::Warning | MessageLevel::Error => writeln!(err, "{}", message.text)?,
            }
        }
        if structural {
            write!(out, "{}", render_tree(session.index()))?;
        }
        Ok(true)
    }
}
