//! Per-user persistence under the configured data directory.
//!
//! Layout:
//! ```text
//! <data_dir>/users/<user>/achievements.json
//! <data_dir>/users/<user>/study_activities.jsonl
//! ```

mod activity_filesystem;
mod key_value_file;

use std::path::{Path, PathBuf};

use crate::domain::UserId;

pub use activity_filesystem::FilesystemActivityStore;
pub use key_value_file::FileKeyValueStore;

const USERS_DIR: &str = "users";
pub const ACHIEVEMENTS_FILE: &str = "achievements.json";
pub const ACTIVITIES_FILE: &str = "study_activities.jsonl";

pub fn user_dir(data_dir: &Path, user: &UserId) -> PathBuf {
    data_dir.join(USERS_DIR).join(user.as_str())
}
