//! Free-text study activity log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::ActionOutcome;
use super::flow::FailureKind;
use super::identities::UserId;
use crate::ports::ActivityStore;

const ACTION_NAME: &str = "log-activity";

/// Caller-supplied part of an activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyActivity {
    pub title: String,
    pub subject: String,
}

/// Stored activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub title: String,
    pub subject: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(activity: StudyActivity, timestamp: DateTime<Utc>) -> Self {
        Self { title: activity.title, subject: activity.subject, timestamp }
    }
}

/// Append a timestamped activity to the user's collection.
pub fn log_activity<S: ActivityStore>(
    store: &S,
    user_id: &str,
    activity: StudyActivity,
) -> ActionOutcome<()> {
    if user_id.is_empty() {
        return ActionOutcome::failure(
            ACTION_NAME,
            FailureKind::Unauthenticated,
            "User is not authenticated.",
        );
    }

    let result = UserId::new(user_id)
        .and_then(|user| store.append(&user, &ActivityRecord::new(activity, Utc::now())));

    match result {
        Ok(()) => ActionOutcome::Success(()),
        Err(err) => {
            tracing::error!(user = user_id, error = %err, "failed to log activity");
            ActionOutcome::failure(
                ACTION_NAME,
                FailureKind::Storage,
                format!("Failed to log activity: {}", err),
            )
        }
    }
}

/// The user's activities, newest first, optionally truncated to `limit`.
pub fn recent_activities<S: ActivityStore>(
    store: &S,
    user: &UserId,
    limit: Option<usize>,
) -> Result<Vec<ActivityRecord>, super::AppError> {
    let mut records = store.list(user)?;
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::testing::MemoryActivityStore;

    fn algebra() -> StudyActivity {
        StudyActivity { title: "Linear equations".into(), subject: "Mathematics".into() }
    }

    #[test]
    fn empty_user_is_not_authenticated() {
        let store = MemoryActivityStore::new();
        let outcome = log_activity(&store, "", algebra());
        assert_eq!(outcome.error().unwrap().message, "User is not authenticated.");
    }

    #[test]
    fn store_failure_is_reported() {
        let store = MemoryActivityStore::failing("disk full");
        let outcome = log_activity(&store, "student-1", algebra());
        let detail = outcome.error().unwrap();
        assert_eq!(detail.kind, FailureKind::Storage);
        assert_eq!(detail.message, "Failed to log activity: Storage error: disk full");
    }

    #[test]
    fn logged_activity_is_listed() {
        let store = MemoryActivityStore::new();
        assert!(log_activity(&store, "student-1", algebra()).is_success());

        let user = UserId::new("student-1").unwrap();
        let records = recent_activities(&store, &user, None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Linear equations");
        assert_eq!(records[0].subject, "Mathematics");
    }

    #[test]
    fn recent_activities_are_newest_first_and_limited() {
        let store = MemoryActivityStore::new();
        let user = UserId::new("student-1").unwrap();
        for day in 1..=3 {
            let at = Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
            let activity = StudyActivity { title: format!("Day {}", day), subject: "History".into() };
            store.append(&user, &ActivityRecord::new(activity, at)).unwrap();
        }

        let records = recent_activities(&store, &user, Some(2)).unwrap();
        let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Day 3", "Day 2"]);
    }
}
