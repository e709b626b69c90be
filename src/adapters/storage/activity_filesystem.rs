use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use super::{ACTIVITIES_FILE, user_dir};
use crate::domain::activity::ActivityRecord;
use crate::domain::{AppError, UserId};
use crate::ports::ActivityStore;

/// Activity records stored one JSON document per line, per user.
#[derive(Debug, Clone)]
pub struct FilesystemActivityStore {
    data_dir: PathBuf,
}

impl FilesystemActivityStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn log_path(&self, user: &UserId) -> PathBuf {
        user_dir(&self.data_dir, user).join(ACTIVITIES_FILE)
    }
}

impl ActivityStore for FilesystemActivityStore {
    fn append(&self, user: &UserId, record: &ActivityRecord) -> Result<(), AppError> {
        let path = self.log_path(user);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let line =
            serde_json::to_string(record).map_err(|err| AppError::Storage(err.to_string()))?;
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    fn list(&self, user: &UserId) -> Result<Vec<ActivityRecord>, AppError> {
        let path = self.log_path(user);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&path)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|err| AppError::ParseError {
                what: format!("{} line {}", path.display(), index + 1),
                details: err.to_string(),
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    use super::*;
    use crate::domain::activity::StudyActivity;

    fn record(title: &str, minute: u32) -> ActivityRecord {
        ActivityRecord::new(
            StudyActivity { title: title.to_string(), subject: "Math".to_string() },
            Utc.with_ymd_and_hms(2026, 3, 1, 10, minute, 0).unwrap(),
        )
    }

    #[test]
    fn appends_and_lists_in_insertion_order() {
        let dir = tempdir().unwrap();
        let store = FilesystemActivityStore::new(dir.path().to_path_buf());
        let user = UserId::new("student-1").unwrap();

        store.append(&user, &record("Algebra", 1)).unwrap();
        store.append(&user, &record("Geometry", 2)).unwrap();

        let listed = store.list(&user).unwrap();
        assert_eq!(listed, vec![record("Algebra", 1), record("Geometry", 2)]);
        assert!(dir.path().join("users/student-1/study_activities.jsonl").is_file());
    }

    #[test]
    fn unknown_user_has_no_records() {
        let dir = tempdir().unwrap();
        let store = FilesystemActivityStore::new(dir.path().to_path_buf());
        assert!(store.list(&UserId::new("nobody").unwrap()).unwrap().is_empty());
    }

    #[test]
    fn corrupt_line_reports_its_position() {
        let dir = tempdir().unwrap();
        let store = FilesystemActivityStore::new(dir.path().to_path_buf());
        let user = UserId::new("student-1").unwrap();
        store.append(&user, &record("Algebra", 1)).unwrap();

        let path = dir.path().join("users/student-1/study_activities.jsonl");
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("{broken\n");
        fs::write(&path, content).unwrap();

        let err = store.list(&user).unwrap_err();
        assert!(matches!(err, AppError::ParseError { what, .. } if what.ends_with("line 2")));
    }
}
