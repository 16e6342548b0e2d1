use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use jsonquill::config::Config;
use jsonquill::editor::lock::LockPolicy;
use jsonquill::editor::session::EditSession;
use jsonquill::input::command::HELP_TEXT;
use jsonquill::input::handler::render_tree;
use jsonquill::input::CommandHandler;

/// JSONQuill - A structural JSON editor
#[derive(Parser)]
#[command(name = "jsonquill")]
#[command(version)]
#[command(about = "A structural JSON editor driven by text commands", long_about = None)]
struct Cli {
    /// JSON file to edit (omit to start a new document)
    file: Option<PathBuf>,

    /// Start with the structure locked
    #[arg(short, long)]
    locked: bool,

    /// Spaces per indentation level when printing and saving
    #[arg(short, long)]
    indent: Option<usize>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI flags override config
    let mut config = Config::load();
    if let Some(indent) = cli.indent {
        config.indent_size = indent;
    }
    let lock = LockPolicy::from_flag(cli.locked || config.start_locked);

    let mut session = match &cli.file {
        Some(path) => {
            let mut session = EditSession::empty();
            // A failed load leaves the session empty; the message says why.
            let _ = session.load_file(path);
            session
        }
        None if cli.script.is_some() && !io::stdin().is_terminal() => {
            // Document on stdin, commands from the script. A bad document
            // leaves the session empty, like a bad file argument.
            let mut session = EditSession::empty();
            let _ = session.load_reader(io::stdin().lock());
            session
        }
        None => {
            let mut session = EditSession::empty();
            session.new_document();
            session
        }
    }
    .with_lock(lock);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    if let Some(message) = session.message() {
        writeln!(err, "{}", message.text)?;
    }
    if io::stdin().is_terminal() && cli.script.is_none() {
        writeln!(err, "{}", HELP_TEXT)?;
    }
    write!(out, "{}", render_tree(session.index()))?;

    let handler = CommandHandler::new(config);
    match &cli.script {
        Some(script) => {
            let file = std::fs::File::open(script)?;
            handler.run(&mut session, io::BufReader::new(file), &mut out, &mut err)
        }
        None => handler.run(&mut session, io::stdin().lock(), &mut out, &mut err),
    }
}
