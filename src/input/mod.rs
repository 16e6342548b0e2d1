//! Text command input for the line-oriented driver.

pub mod command;
pub mod handler;

pub use command::{parse_command, Command};
pub use handler::CommandHandler;
