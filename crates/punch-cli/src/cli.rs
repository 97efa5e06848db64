//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::log::LogArgs;
use crate::commands::session::{InterruptArgs, NoteArgs, StartArgs, StopArgs, TagArgs};

/// Personal time tracker with nested interrupts.
///
/// Start and stop named activities, push interruptions on a stack and resume
/// where you left off, and summarize where the time went.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start working on something.
    Start(StartArgs),

    /// Stop the current entry and resume the last interrupted one.
    Stop(StopArgs),

    /// Show what is being worked on and for how long.
    Status,

    /// Add tags to the current entry.
    Tag(TagArgs),

    /// Attach a note to the current entry.
    Note(NoteArgs),

    /// Suspend the current entry and work on something else.
    Interrupt(InterruptArgs),

    /// Summarize tracked time.
    Log(LogArgs),

    /// Edit the whole tracked state in $EDITOR.
    Edit,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn multi_word_arguments_are_collected() {
        let cli = Cli::try_parse_from(["punch", "start", "fix", "the", "bug", "--at", "10 mins ago"])
            .unwrap();
        let Some(Commands::Start(args)) = cli.command else {
            panic!("expected start");
        };
        assert_eq!(args.name(), "fix the bug");
        assert_eq!(args.at.as_deref(), Some("10 mins ago"));
    }

    #[test]
    fn start_requires_a_name() {
        assert!(Cli::try_parse_from(["punch", "start"]).is_err());
        assert!(Cli::try_parse_from(["punch", "interrupt"]).is_err());
        assert!(Cli::try_parse_from(["punch", "tag"]).is_err());
        assert!(Cli::try_parse_from(["punch", "note"]).is_err());
    }

    #[test]
    fn unknown_subcommands_are_rejected() {
        assert!(Cli::try_parse_from(["punch", "pause"]).is_err());
    }

    #[test]
    fn log_period_is_optional() {
        let cli = Cli::try_parse_from(["punch", "log"]).unwrap();
        let Some(Commands::Log(args)) = cli.command else {
            panic!("expected log");
        };
        assert_eq!(args.period(), None);

        let cli = Cli::try_parse_from(["punch", "log", "last", "week", "--json"]).unwrap();
        let Some(Commands::Log(args)) = cli.command else {
            panic!("expected log");
        };
        assert_eq!(args.period().as_deref(), Some("last week"));
        assert!(args.json);
    }

    #[test]
    fn stop_flags() {
        let cli = Cli::try_parse_from(["punch", "stop", "--no-resume", "--at", "now"]).unwrap();
        let Some(Commands::Stop(args)) = cli.command else {
            panic!("expected stop");
        };
        assert!(args.no_resume);
        assert_eq!(args.at.as_deref(), Some("now"));
    }
}
