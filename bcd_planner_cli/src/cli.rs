use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bcd-plan",
    about = "Plan boustrophedon coverage trajectories for a disk-shaped robot",
    version,
    after_help = "\
Typical workflow:
  bcd-plan demo -o scenario.json     # dump the built-in two-obstacle scene
  bcd-plan plan --demo               # plan it and print a summary
  bcd-plan plan scenario.json -o plan.json

Use `bcd-plan <command> --help` for detailed usage."
)]
pub struct Cli {
    /// Output file path (implies JSON output)
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,

    /// Suppress informational messages on stderr
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a coverage trajectory for a scenario
    Plan {
        /// Path to a scenario JSON file. Omit with --demo to use the
        /// built-in two-diamond example instead.
        scenario: Option<PathBuf>,

        /// Use the built-in demo scenario instead of a file
        #[arg(long, conflicts_with = "scenario")]
        demo: bool,
    },
    /// Print the built-in demo scenario as JSON
    Demo,
    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Option<clap_complete::Shell>,
    },
}
