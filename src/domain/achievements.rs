//! Achievement catalog and unlock tracking.

use serde::Serialize;

use super::AppError;
use crate::ports::KeyValueStore;

/// Namespace prefix for achievement flags in the key/value store.
pub const ACHIEVEMENT_KEY_PREFIX: &str = "eduspark_achievement_";

const UNLOCKED: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub points: u32,
}

const fn achievement(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    points: u32,
) -> Achievement {
    Achievement { id, title, description, points }
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    achievement("firstLogin", "First Steps Login!", "Logged in for the first time. Welcome aboard!", 10),
    achievement("courseCadet", "Course Cadet Graduate", "Completed your first course module.", 20),
    achievement(
        "quizNovice",
        "Quiz Novice Ace",
        "Attempted your first quiz and learned something new!",
        15,
    ),
    achievement("perfectTen", "Perfect Ten Scorer", "Scored 100% on a quiz. Flawless victory!", 50),
    achievement(
        "studyStreak",
        "Study Streak Master",
        "Logged in 7 days in a row. Consistency is key!",
        100,
    ),
    achievement(
        "contentExplorer",
        "Content Explorer Pro",
        "Viewed 10 different learning materials. Curious mind!",
        25,
    ),
    achievement("aiCompanion", "AI Companion User", "Asked the AI Chatbot your first question.", 20),
    achievement(
        "plannerPro",
        "Planner Pro Strategist",
        "Generated your first personalized study plan.",
        30,
    ),
    achievement(
        "quizWhiz",
        "Quiz Whiz Kid",
        "Generated your first quiz using the AI Quiz Generator.",
        25,
    ),
    achievement(
        "masterSummarizer",
        "Master Summarizer",
        "Summarized your first text with the AI Summarizer.",
        25,
    ),
    achievement("buddingAuthor", "Budding Author", "Crafted your first story with the Story Weaver.", 20),
    achievement(
        "conceptConnoisseur",
        "Concept Connoisseur",
        "Visualized your first concept using the AI Concept Visualizer.",
        30,
    ),
    achievement(
        "mathSolver",
        "Math Problem Solver",
        "Solved your first problem with the Homework Helper.",
        15,
    ),
    achievement("codeApprentice", "Code Apprentice", "Generated code for a programming task.", 25),
    achievement(
        "flashcardFanatic",
        "Flashcard Fanatic",
        "Created a set of flashcards from your notes.",
        20,
    ),
];

pub fn find_achievement(id: &str) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|achievement| achievement.id == id)
}

pub fn achievement_key(id: &str) -> String {
    format!("{}{}", ACHIEVEMENT_KEY_PREFIX, id)
}

/// Unlock state across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementSummary {
    pub unlocked: Vec<Achievement>,
    pub locked: Vec<Achievement>,
    pub points: u32,
}

impl AchievementSummary {
    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn total(&self) -> usize {
        self.unlocked.len() + self.locked.len()
    }
}

/// Reads and sets achievement flags in a key/value store.
pub struct AchievementTracker<K> {
    store: K,
}

impl<K: KeyValueStore> AchievementTracker<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Set the flag for `id`. Returns `true` only when this call unlocked it.
    pub fn award(&self, id: &str) -> Result<bool, AppError> {
        let achievement = find_achievement(id)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown achievement '{}'", id)))?;

        if self.is_unlocked(achievement.id)? {
            return Ok(false);
        }
        self.store.set(&achievement_key(achievement.id), UNLOCKED)?;
        tracing::info!(achievement = achievement.id, "achievement unlocked");
        Ok(true)
    }

    pub fn is_unlocked(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.store.get(&achievement_key(id))?.as_deref() == Some(UNLOCKED))
    }

    pub fn summary(&self) -> Result<AchievementSummary, AppError> {
        let mut summary = AchievementSummary { unlocked: Vec::new(), locked: Vec::new(), points: 0 };
        for achievement in ACHIEVEMENTS {
            if self.is_unlocked(achievement.id)? {
                summary.points += achievement.points;
                summary.unlocked.push(*achievement);
            } else {
                summary.locked.push(*achievement);
            }
        }
        Ok(summary)
    }
}
