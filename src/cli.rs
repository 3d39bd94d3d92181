//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for the persona quiz.

use clap::{Args, Parser, Subcommand};

/// Persona Quiz - Discover your investor persona
///
/// Walks through a four-step questionnaire, sends the answers to the persona
/// generation service and shows the resulting persona with a profile matrix.
#[derive(Parser, Debug)]
#[command(name = "persona-quiz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection options shared by commands that talk to the service
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceArgs {
    /// Path to configuration file
    #[arg(short, long, env = "PERSONA_QUIZ_CONFIG")]
    pub config: Option<String>,

    /// Override the persona service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the submission timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take the quiz interactively and generate a persona
    Run {
        #[command(flatten)]
        service: ServiceArgs,

        /// Save the resulting profile as JSON
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Submit a saved answers file without prompting
    Submit {
        /// Answers JSON keyed by question id
        #[arg(short, long)]
        answers: String,

        #[command(flatten)]
        service: ServiceArgs,

        /// Save the resulting profile as JSON
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the profile matrix for an answers file
    Score {
        /// Answers JSON keyed by question id
        #[arg(short, long)]
        answers: String,

        /// Print the scores as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every question with its options
    Catalog,

    /// Check whether the persona service is reachable
    Health {
        #[command(flatten)]
        service: ServiceArgs,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}
