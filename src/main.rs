//! Persona Quiz - Discover your investor persona
//!
//! Entry point for the `persona-quiz` binary. The interactive quiz, the
//! non-interactive `submit` and `score` commands and the health check all
//! share one configuration and logging setup.

mod app;
mod cli;
mod config;
mod error;
mod frontend;
mod logging;
mod persona;
mod quiz;
mod version;

use std::path::Path;

use clap::Parser;
use tracing::{debug, error, info, warn};

use crate::app::App;
use crate::cli::{Cli, Commands, ServiceArgs};
use crate::config::QuizConfig;
use crate::error::{Error, Result};
use crate::frontend::terminal::TerminalSurface;
use crate::logging::LogGuards;
use crate::persona::{
    render::render_radar, HttpPersonaClient, PersonaGenerator, ResultView, SavedProfile,
};
use crate::quiz::{Advance, AnswerStore, Catalog, Question, QuizSession, ScoreProfile};

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    // Commands that need neither the service nor full logging
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone());
        }
        Commands::Catalog => {
            print_catalog(&Catalog::investor());
            return Ok(());
        }
        _ => {}
    }

    let service = match &cli.command {
        Commands::Run { service, .. }
        | Commands::Submit { service, .. }
        | Commands::Health { service } => service.clone(),
        _ => ServiceArgs::default(),
    };

    let config = match load_config(&service) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprint!("{}", e.format_for_terminal());
            std::process::exit(e.exit_code());
        }
    };

    // The guards must be kept alive for the lifetime of the program
    let interactive = matches!(cli.command, Commands::Run { .. });
    let _log_guards = init_logging_from_config(&config, cli.verbose, cli.quiet, interactive)?;

    let build = version::build_info();
    debug!(
        version = %build.full_version(),
        target = %build.target,
        profile = %build.profile,
        "Starting persona quiz"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Internal(format!("Failed to create async runtime: {}", e)))?;

    let outcome = match cli.command {
        Commands::Run { output, .. } => runtime.block_on(run_quiz(&config, output.as_deref())),
        Commands::Submit {
            answers, output, ..
        } => runtime.block_on(submit_answers(&config, &answers, output.as_deref())),
        Commands::Score { answers, json } => print_score(&answers, json),
        Commands::Health { .. } => runtime.block_on(check_health(&config)),
        Commands::Version | Commands::Config { .. } | Commands::Catalog => {
            // Already handled above
            unreachable!();
        }
    };

    if let Err(e) = outcome {
        error!(error = %e.format_for_log(), "Command failed");
        if e.is_submission_failure() {
            eprintln!("{}", e.user_message());
        }
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

/// Load configuration and apply the command's overrides
fn load_config(service: &ServiceArgs) -> Result<QuizConfig> {
    let mut config = QuizConfig::load(service.config.as_deref())?;
    config.apply_cli_overrides(service.base_url.as_deref(), service.timeout)?;
    Ok(config)
}

/// Initialize logging from configuration
fn init_logging_from_config(
    config: &QuizConfig,
    verbose: u8,
    quiet: bool,
    interactive: bool,
) -> Result<LogGuards> {
    logging::init_logging(&config.logging, verbose, quiet, interactive)
}

// ─────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────

/// Take the quiz interactively
async fn run_quiz(config: &QuizConfig, output: Option<&str>) -> Result<()> {
    let client = HttpPersonaClient::new(&config.service)?;
    info!(
        base_url = %client.endpoint(),
        timeout_secs = config.service.timeout_secs,
        "Persona service configured"
    );

    let mut app = App::new(config.service.timeout());
    let mut surface = TerminalSurface::new();

    let completed = frontend::run_interactive(&mut app, &mut surface, &client).await?;

    match (completed, output) {
        (Some(completed), Some(path)) => {
            save_profile(&completed.view, &completed.answers, Path::new(path))?;
        }
        (None, Some(_)) => {
            warn!("Quiz ended without a persona, nothing saved");
        }
        _ => {}
    }

    Ok(())
}

/// Submit an answers file and print the resulting persona
async fn submit_answers(config: &QuizConfig, answers_path: &str, output: Option<&str>) -> Result<()> {
    let catalog = Catalog::investor();
    let answers = read_answers(&catalog, Path::new(answers_path))?;

    let client = HttpPersonaClient::new(&config.service)?;
    let mut session = QuizSession::new(catalog).with_submit_timeout(config.service.timeout());
    session.load_answers(answers);
    info!(session_id = %session.id(), base_url = %client.endpoint(), "Submitting answers file");

    let submission = loop {
        match session.advance(&client).await? {
            Advance::Completed(submission) => break submission,
            Advance::Moved { to } => debug!(step = to, "Skipping to last step"),
            Advance::Ignored => {
                return Err(Error::SubmissionInFlight);
            }
        }
    };

    let view = ResultView::compose(submission.result, &submission.answers);
    print!("{}", view.render_text());

    if let Some(path) = output {
        save_profile(&view, &submission.answers, Path::new(path))?;
    }

    Ok(())
}

/// Print the profile matrix for an answers file
fn print_score(answers_path: &str, json: bool) -> Result<()> {
    let catalog = Catalog::investor();
    let answers = read_answers(&catalog, Path::new(answers_path))?;
    let profile = ScoreProfile::project(&answers);

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Profile Matrix");
        print!("{}", render_radar(&profile.radar_points()));
    }

    Ok(())
}

/// Check the persona service
async fn check_health(config: &QuizConfig) -> Result<()> {
    let client = HttpPersonaClient::new(&config.service)?;
    let health = client.health_check().await?;

    if health.operational {
        println!("Persona service at {} is operational", health.endpoint);
    } else {
        println!(
            "Persona service at {} is unavailable: {}",
            health.endpoint,
            health.error.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

/// List every step and question with its options
fn print_catalog(catalog: &Catalog) {
    for (index, step) in catalog.steps().iter().enumerate() {
        println!("Step {}: {}", index + 1, step.title);
        println!("  {}", step.description);
        for question in step.questions {
            println!();
            println!("  {} ({})", question.id(), question.kind());
            println!("    {}", question.label());
            match question {
                Question::SingleSelect { options, .. } | Question::MultiSelect { options, .. } => {
                    for option in options.iter() {
                        println!("    - {}", option);
                    }
                }
                Question::Slider { min, max, .. } => {
                    println!("    range {}..={}", min, max);
                }
                Question::FreeText { .. } => {}
            }
        }
        println!();
    }
}

// ─────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────

fn read_answers(catalog: &Catalog, path: &Path) -> Result<AnswerStore> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| Error::answers_malformed(format!("{}: {}", path.display(), e)))?;
    AnswerStore::from_json(catalog, &value)
}

fn save_profile(view: &ResultView, answers: &AnswerStore, path: &Path) -> Result<()> {
    SavedProfile::new(view, answers).save(path)?;
    println!("Profile saved to {}", path.display());
    Ok(())
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: cli::ConfigSubcommand) -> Result<()> {
    use cli::ConfigSubcommand;

    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = QuizConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => match config::init_config(path.as_deref(), force) {
            Ok(written) => println!("Configuration written to {}", written.display()),
            Err(e) => {
                eprint!("{}", e.format_for_terminal());
                std::process::exit(e.exit_code());
            }
        },
        ConfigSubcommand::Validate { config } => match QuizConfig::load(config.as_deref()) {
            Ok(_) => {
                println!("Configuration is valid.");
            }
            Err(e) => {
                eprint!("{}", e.format_for_terminal());
                std::process::exit(e.exit_code());
            }
        },
    }

    Ok(())
}
