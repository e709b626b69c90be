use std::path::Path;

use clap::Subcommand;

use crate::app::api;
use crate::app::commands::activity::RECENT_LIMIT;
use crate::domain::AppError;

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Record a study activity
    Log {
        #[arg(long)]
        title: String,
        #[arg(long)]
        subject: String,
    },
    /// Show recent activities, newest first
    #[clap(visible_alias = "ls")]
    List {
        /// Maximum number of entries
        #[arg(long, default_value_t = RECENT_LIMIT)]
        limit: usize,
        /// Show every entry
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
}

pub fn run_activity(
    config: Option<&Path>,
    user: &str,
    command: ActivityCommands,
) -> Result<i32, AppError> {
    let config = api::config(config)?;
    match command {
        ActivityCommands::Log { title, subject } => {
            let outcome = api::log_activity(&config, user, &title, &subject);
            super::print_json(&outcome)?;
            Ok(if outcome.is_success() { 0 } else { 1 })
        }
        ActivityCommands::List { limit, all } => {
            let records = api::list_activities(&config, user, (!all).then_some(limit))?;
            if records.is_empty() {
                println!("No activities logged yet.");
            }
            for record in records {
                println!(
                    "{}  {} ({})",
                    record.timestamp.format("%Y-%m-%d %H:%M"),
                    record.title,
                    record.subject
                );
            }
            Ok(0)
        }
    }
}
