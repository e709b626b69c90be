//! Study activity persistence port.

use crate::domain::AppError;
use crate::domain::activity::ActivityRecord;
use crate::domain::identities::UserId;

/// Append-only per-user activity collection.
pub trait ActivityStore {
    fn append(&self, user: &UserId, record: &ActivityRecord) -> Result<(), AppError>;

    /// Records for `user` in insertion order.
    fn list(&self, user: &UserId) -> Result<Vec<ActivityRecord>, AppError>;
}
