//! Study activity logging and listing for the signed-in user.

use crate::domain::activity::{self, ActivityRecord, StudyActivity};
use crate::domain::flow::FailureKind;
use crate::domain::{ActionOutcome, AppError, UserId};
use crate::ports::ActivityStore;

const ACTION_NAME: &str = "log-activity";

/// Number of entries shown on the dashboard.
pub const RECENT_LIMIT: usize = 5;

/// Log an activity. Blank title or subject is rejected before touching the store.
pub fn log<S: ActivityStore>(
    store: &S,
    user_id: &str,
    title: &str,
    subject: &str,
) -> ActionOutcome<()> {
    let title = title.trim();
    let subject = subject.trim();
    if title.is_empty() || subject.is_empty() {
        return ActionOutcome::failure(
            ACTION_NAME,
            FailureKind::InputValidation,
            "Missing Information: title and subject are required.",
        );
    }

    activity::log_activity(
        store,
        user_id,
        StudyActivity { title: title.to_string(), subject: subject.to_string() },
    )
}

pub fn list<S: ActivityStore>(
    store: &S,
    user_id: &str,
    limit: Option<usize>,
) -> Result<Vec<ActivityRecord>, AppError> {
    let user = UserId::new(user_id)?;
    activity::recent_activities(store, &user, limit)
}
