use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::app::api;
use crate::app::commands::quiz::{load_quiz, parse_answers};
use crate::domain::AppError;

#[derive(Subcommand)]
pub enum QuizCommands {
    /// Grade answers to a generated quiz
    Grade {
        /// Quiz JSON produced by `run generate-quiz`
        #[arg(short, long)]
        quiz: PathBuf,
        /// Comma-separated option indices, `-` for unanswered (e.g. 0,2,-,1)
        #[arg(short, long, allow_hyphen_values = true)]
        answers: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run_quiz(config: Option<&Path>, user: &str, command: QuizCommands) -> Result<i32, AppError> {
    match command {
        QuizCommands::Grade { quiz, answers, json } => {
            let quiz = load_quiz(&quiz)?;
            let answers = parse_answers(&answers)?;
            let config = api::config(config)?;
            let report = api::grade_quiz(&config, user, &quiz, &answers)?;

            if json {
                super::print_json(&report)?;
            } else {
                println!("{}", quiz.quiz_title);
                println!(
                    "Score: {}/{} ({})",
                    report.grade.score,
                    report.grade.total,
                    report.grade.source.label()
                );
                if let Some(error) = &report.verification_error {
                    println!("⚠️  {}", error);
                }
                for (index, review) in report.grade.reviews.iter().enumerate() {
                    let mark = if review.is_correct { "✅" } else { "❌" };
                    let choice = review
                        .user_choice
                        .map(|choice| choice.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!("{}. {} {}", index + 1, mark, review.question);
                    println!(
                        "   your answer: {}, correct: {} ({})",
                        choice,
                        review.correct_index,
                        review.source.label()
                    );
                    println!("   {}", review.explanation);
                }
            }
            for achievement in &report.unlocked {
                eprintln!("🏆 Achievement unlocked: {}", achievement.title);
            }
            Ok(0)
        }
    }
}
