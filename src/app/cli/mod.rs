//! CLI Adapter.

mod activity;
mod quiz;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::app::api::{self, RunOptions};
use crate::app::commands::run::read_input;
use crate::app::logging;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "eduspark")]
#[command(version)]
#[command(about = "Run EduSpark learning tasks against a generative model", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./eduspark.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// User the command acts for
    #[arg(long, global = true, default_value = "local")]
    user: String,
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in tasks
    #[clap(visible_alias = "ls")]
    Tasks,
    /// Show a task's input and output schemas
    Describe {
        /// Task name
        task: String,
    },
    /// Run a task and print its outcome as JSON
    #[clap(visible_alias = "r")]
    Run {
        /// Task name
        task: String,
        /// Input record as inline JSON
        #[arg(short, long, conflicts_with = "input_file")]
        input: Option<String>,
        /// Read the input record from a JSON file
        #[arg(short = 'f', long)]
        input_file: Option<PathBuf>,
        /// Print the rendered prompt without calling the backend
        #[arg(long)]
        prompt_preview: bool,
    },
    /// Quiz utilities
    Quiz {
        #[command(subcommand)]
        command: quiz::QuizCommands,
    },
    /// Study activity log
    Activity {
        #[command(subcommand)]
        command: activity::ActivityCommands,
    },
    /// Show unlocked achievements
    Achievements,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Tasks => run_tasks().map(|_| 0),
        Commands::Describe { task } => run_describe(&task).map(|_| 0),
        Commands::Run { task, input, input_file, prompt_preview } => run_task(
            cli.config.as_deref(),
            &cli.user,
            task,
            input.as_deref(),
            input_file.as_deref(),
            prompt_preview,
        ),
        Commands::Quiz { command } => quiz::run_quiz(cli.config.as_deref(), &cli.user, command),
        Commands::Activity { command } => {
            activity::run_activity(cli.config.as_deref(), &cli.user, command)
        }
        Commands::Achievements => run_achievements(cli.config.as_deref(), &cli.user).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|err| AppError::ParseError {
        what: "command output".to_string(),
        details: err.to_string(),
    })?;
    println!("{}", rendered);
    Ok(())
}

fn run_tasks() -> Result<(), AppError> {
    let tasks = api::list_tasks()?;
    println!("Available tasks:");
    for task in tasks {
        println!("  {} - {}", task.name, task.description);
    }
    Ok(())
}

fn run_describe(task: &str) -> Result<(), AppError> {
    print_json(&api::describe_task(task)?)
}

fn run_task(
    config: Option<&std::path::Path>,
    user: &str,
    task: String,
    input: Option<&str>,
    input_file: Option<&std::path::Path>,
    prompt_preview: bool,
) -> Result<i32, AppError> {
    let options = RunOptions { task, input: read_input(input, input_file)? };

    if prompt_preview {
        let rendered = api::preview_task(&options)?;
        if let Some(system) = &rendered.system {
            println!("--- system ---\n{}\n", system.trim());
        }
        println!("--- prompt ---\n{}", rendered.text);
        if let Some(media) = &rendered.media {
            println!("\n[inline image: {}]", media.mime_type);
        }
        return Ok(0);
    }

    let config = api::config(config)?;
    let result = api::run_task(&config, user, &options)?;
    print_json(&result.outcome)?;
    for achievement in &result.unlocked {
        eprintln!("🏆 Achievement unlocked: {}", achievement.title);
    }

    Ok(if result.outcome.is_success() { 0 } else { 1 })
}

fn run_achievements(config: Option<&std::path::Path>, user: &str) -> Result<(), AppError> {
    let config = api::config(config)?;
    let summary = api::achievement_summary(&config, user)?;

    println!(
        "Unlocked {}/{} achievements ({} points)",
        summary.unlocked_count(),
        summary.total(),
        summary.points
    );
    for achievement in &summary.unlocked {
        println!("  ✅ {} - {}", achievement.title, achievement.description);
    }
    for achievement in &summary.locked {
        println!("  🔒 {} - {}", achievement.title, achievement.description);
    }
    Ok(())
}
