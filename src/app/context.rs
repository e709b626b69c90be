use crate::domain::achievements::{Achievement, AchievementTracker, find_achievement};
use crate::domain::ActionRunner;
use crate::ports::{GenerativeBackend, KeyValueStore};

/// Dependencies for commands that call the generative backend.
pub struct AppContext<B: GenerativeBackend, K: KeyValueStore> {
    runner: ActionRunner<B>,
    achievements: AchievementTracker<K>,
}

impl<B: GenerativeBackend, K: KeyValueStore> AppContext<B, K> {
    pub fn new(runner: ActionRunner<B>, achievements: AchievementTracker<K>) -> Self {
        Self { runner, achievements }
    }

    pub fn runner(&self) -> &ActionRunner<B> {
        &self.runner
    }

    pub fn achievements(&self) -> &AchievementTracker<K> {
        &self.achievements
    }

    /// Award `id`, returning it when newly unlocked.
    ///
    /// Store failures are logged and never fail the surrounding command.
    pub fn unlock(&self, id: &str) -> Option<&'static Achievement> {
        match self.achievements.award(id) {
            Ok(true) => find_achievement(id),
            Ok(false) => None,
            Err(err) => {
                tracing::warn!(achievement = id, error = %err, "could not record achievement");
                None
            }
        }
    }
}
