//! Presentation layer for showrunner
//!
//! This crate contains the CLI definition, the console command parser,
//! outcome formatting, and the console announcer adapter.

pub mod announcer;
pub mod cli;
pub mod command;
pub mod output;

// Re-export commonly used types
pub use announcer::ConsoleAnnouncer;
pub use cli::commands::{Cli, OutputFormat};
pub use command::parser::{CommandLine, ParseError, USAGE, parse_line};
pub use output::console::ConsoleFormatter;
