//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for command outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One colored line per outcome
    #[default]
    Text,
    /// One JSON object per outcome
    Json,
}

/// CLI arguments for showrunner
#[derive(Parser, Debug)]
#[command(name = "showrunner")]
#[command(author, version, about = "Season orchestration for elimination competitions played over chat")]
#[command(long_about = r#"
Showrunner runs an elimination season: head-of-round competitions,
nominations, the veto, eviction votes, timed mini-competitions and a jury
finale.

Each input line is `<actor> !<command> [args]`, for example:
  host !start_season
  alice !nominate bob
  carol !vote bob
  dave !answer paris

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./showrunner.toml        Project-level config
3. ~/.config/showrunner/config.toml   Global config

Example:
  showrunner --config season.toml
  showrunner --script replay.txt --json
"#)]
pub struct Cli {
    /// Read command lines from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Shorthand for `--output json`
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write a daily rolling log file into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.output
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_overrides_output() {
        let cli = Cli::parse_from(["showrunner", "--json"]);
        assert_eq!(cli.output_format(), OutputFormat::Json);

        let cli = Cli::parse_from(["showrunner", "-vv", "--script", "replay.txt"]);
        assert_eq!(cli.output_format(), OutputFormat::Text);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.script, Some(PathBuf::from("replay.txt")));
    }
}
