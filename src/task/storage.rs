//! Task storage - CSV file persistence

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use super::model::{format_date, parse_date, Priority, Task, TaskId};

/// First line of every task file.
pub const HEADER_LINE: &str = "Title, Description, Date, Priority, ID";

const FIELD_COUNT: usize = 5;
const FIELD_INDEX_ID: usize = 4;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A data row that could not be turned into a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file
    pub line: u64,
    /// ID column of the row, when it held a number
    pub id: Option<TaskId>,
    pub reason: String,
}

/// Result of a best-effort load.
///
/// `tasks` holds every row that parsed. Rows that did not are listed in
/// `skipped`; a file that could not be read at all leaves `read_error` set.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    pub skipped: Vec<SkippedRow>,
    pub read_error: Option<StorageError>,
}

impl LoadOutcome {
    fn skip(&mut self, path: &Path, line: u64, id: Option<TaskId>, reason: String) {
        warn!("Skipping line {} of {}: {}", line, path.display(), reason);
        self.skipped.push(SkippedRow { line, id, reason });
    }

    /// Largest ID seen in the file, including IDs of skipped rows
    pub fn highest_id(&self) -> Option<TaskId> {
        self.tasks
            .iter()
            .map(|t| t.id)
            .chain(self.skipped.iter().filter_map(|row| row.id))
            .max()
    }

    /// True when the file existed but was only partially (or not at all) recovered
    pub fn is_degraded(&self) -> bool {
        self.read_error.is_some() || !self.skipped.is_empty()
    }

    /// Human-readable diagnostics, one per problem
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(err) = &self.read_error {
            warnings.push(format!("Could not read task file: {}", err));
        }
        for row in &self.skipped {
            warnings.push(format!("Skipped line {}: {}", row.line, row.reason));
        }
        warnings
    }
}

pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LoadOutcome {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No task file at {}, starting empty", self.path.display());
                return LoadOutcome::default();
            }
            Err(e) => {
                warn!("Failed to read {}: {}", self.path.display(), e);
                return LoadOutcome {
                    read_error: Some(e.into()),
                    ..LoadOutcome::default()
                };
            }
        };

        // Byte records, so one row with invalid UTF-8 is skipped on its own
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut outcome = LoadOutcome::default();
        let mut seen_ids = HashSet::new();

        for result in reader.byte_records() {
            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => {
                    warn!("Failed to read {}: {}", self.path.display(), e);
                    outcome.read_error = Some(e.into());
                    break;
                }
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    outcome.skip(&self.path, line, None, e.to_string());
                    continue;
                }
            };

            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let id_hint = record
                .get(FIELD_INDEX_ID)
                .and_then(|raw| std::str::from_utf8(raw).ok())
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(TaskId);

            let parsed = csv::StringRecord::from_byte_record(record)
                .map_err(|e| format!("invalid UTF-8 in field {}", e.utf8_error().field() + 1))
                .and_then(|record| parse_record(&record))
                .and_then(|task| {
                    if seen_ids.insert(task.id) {
                        Ok(task)
                    } else {
                        Err(format!("duplicate ID {}", task.id))
                    }
                });

            match parsed {
                Ok(task) => outcome.tasks.push(task),
                Err(reason) => outcome.skip(&self.path, line, id_hint, reason),
            }
        }

        outcome
    }

    /// Replace the file with a snapshot of `tasks`
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Create backup
        if self.path.exists() {
            if let Err(e) = fs::copy(&self.path, self.backup_path()) {
                warn!("Failed to create backup: {}", e);
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        for task in tasks {
            let date = format_date(task.date);
            let priority = task.priority.to_string();
            let id = task.id.to_string();
            writer.write_record([
                task.title.as_str(),
                task.description.as_str(),
                date.as_str(),
                priority.as_str(),
                id.as_str(),
            ])?;
        }
        let rows = writer.into_inner().map_err(|e| e.into_error())?;

        let mut content = Vec::with_capacity(HEADER_LINE.len() + 1 + rows.len());
        content.extend_from_slice(HEADER_LINE.as_bytes());
        content.push(b'\n');
        content.extend_from_slice(&rows);
        fs::write(&self.path, content)?;

        debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }
}

fn parse_record(record: &csv::StringRecord) -> Result<Task, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        ));
    }

    let title = &record[0];
    if title.is_empty() {
        return Err("empty title".to_string());
    }
    let date = parse_date(&record[2]).ok_or_else(|| format!("invalid date '{}'", &record[2]))?;
    let priority =
        Priority::parse(&record[3]).ok_or_else(|| format!("invalid priority '{}'", &record[3]))?;
    let id = record[FIELD_INDEX_ID]
        .parse::<u64>()
        .map(TaskId)
        .map_err(|_| format!("invalid ID '{}'", &record[FIELD_INDEX_ID]))?;

    Ok(Task::new(id, title, &record[1], date, priority))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn task(id: u64, title: &str, description: &str, date: &str, priority: u8) -> Task {
        Task::new(
            TaskId(id),
            title,
            description,
            parse_date(date).unwrap(),
            Priority::new(priority).unwrap(),
        )
    }

    #[test]
    fn test_storage_roundtrip() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));

        let tasks = vec![
            task(1, "Meeting", "weekly sync", "2024-11-10", 3),
            task(4, "Shopping", "milk, eggs", "2024-11-12", 2),
            task(9, "Quote \"this\"", "line one\nline two", "2025-01-01", 5),
        ];

        storage.save(&tasks)?;
        let loaded = storage.load();

        assert!(!loaded.is_degraded());
        assert_eq!(loaded.tasks.len(), 3);
        for (orig, back) in tasks.iter().zip(&loaded.tasks) {
            assert_eq!(orig.id, back.id);
            assert_eq!(orig.title, back.title);
            assert_eq!(orig.description, back.description);
            assert_eq!(orig.date, back.date);
            assert_eq!(orig.priority, back.priority);
        }
        Ok(())
    }

    #[test]
    fn test_storage_writes_header_and_column_order() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));

        storage.save(&[task(7, "Dentist", "checkup", "2024-03-05", 1)])?;

        let content = fs::read_to_string(storage.path())?;
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some(HEADER_LINE));
        assert_eq!(lines.next(), Some("Dentist,checkup,2024-03-05,1,7"));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn test_storage_save_empty_writes_header_only() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));

        storage.save(&[])?;

        let content = fs::read_to_string(storage.path())?;
        assert_eq!(content.trim(), HEADER_LINE);
        assert!(storage.load().tasks.is_empty());
        Ok(())
    }

    #[test]
    fn test_storage_save_overwrites() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));

        storage.save(&[task(1, "first", "", "2024-01-01", 1)])?;
        storage.save(&[task(2, "second", "", "2024-01-02", 2)])?;

        let loaded = storage.load();
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].title, "second");
        Ok(())
    }

    #[test]
    fn test_storage_save_creates_backup() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));

        storage.save(&[task(1, "test1", "", "2024-01-01", 1)])?;
        storage.save(&[task(2, "test2", "", "2024-01-01", 1)])?;

        let backup = fs::read_to_string(temp.path().join("tasks.csv.bak"))?;
        assert!(backup.contains("test1"));
        assert!(!backup.contains("test2"));
        Ok(())
    }

    #[test]
    fn test_storage_save_creates_parent_dirs() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("nested").join("dir").join("tasks.csv"));

        storage.save(&[task(1, "deep", "", "2024-01-01", 1)])?;
        assert_eq!(storage.load().tasks.len(), 1);
        Ok(())
    }

    #[test]
    fn test_storage_load_nonexistent_file() {
        let temp = tempdir().unwrap();
        let storage = Storage::new(temp.path().join("missing.csv"));

        let loaded = storage.load();
        assert!(loaded.tasks.is_empty());
        assert!(!loaded.is_degraded());
        assert!(loaded.warnings().is_empty());
    }

    #[test]
    fn test_storage_load_empty_file() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));
        fs::write(storage.path(), "")?;

        let loaded = storage.load();
        assert!(loaded.tasks.is_empty());
        assert!(!loaded.is_degraded());
        Ok(())
    }

    #[test]
    fn test_storage_load_skips_bad_rows() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));
        let content = [
            HEADER_LINE,
            "Good,desc,2024-01-01,2,1",
            "Bad date,desc,2024-13-01,2,2",
            "Bad priority,desc,2024-01-03,high,3",
            "Out of range,desc,2024-01-04,9,4",
            "Bad id,desc,2024-01-05,1,abc",
            "Short row,2024-01-06,1",
            ",no title,2024-01-07,1,7",
            "Duplicate,desc,2024-01-08,1,1",
            "Also good, spaced , 2024-01-09 , 4 , 9",
        ]
        .join("\n");
        fs::write(storage.path(), content)?;

        let loaded = storage.load();

        let titles: Vec<&str> = loaded.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", "Also good"]);
        assert_eq!(loaded.tasks[1].description, "spaced");
        assert_eq!(loaded.tasks[1].date, NaiveDate::from_ymd_opt(2024, 1, 9).unwrap());

        assert_eq!(loaded.skipped.len(), 7);
        assert_eq!(loaded.skipped[0].line, 3);
        assert!(loaded.skipped[0].reason.contains("invalid date"));
        assert!(loaded.skipped[1].reason.contains("invalid priority"));
        assert!(loaded.skipped[2].reason.contains("invalid priority"));
        assert!(loaded.skipped[3].reason.contains("invalid ID"));
        assert!(loaded.skipped[4].reason.contains("expected 5 fields"));
        assert!(loaded.skipped[5].reason.contains("empty title"));
        assert!(loaded.skipped[6].reason.contains("duplicate ID 1"));
        assert!(loaded.is_degraded());
        assert_eq!(loaded.warnings().len(), 7);
        Ok(())
    }

    #[test]
    fn test_storage_load_skips_row_with_invalid_utf8() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));
        let mut content = format!("{}\nA,,2024-01-01,3,1\nB,", HEADER_LINE).into_bytes();
        content.push(0xff);
        content.extend_from_slice(b",2024-01-02,3,7\nC,,2024-01-03,3,3\n");
        fs::write(storage.path(), content)?;

        let loaded = storage.load();
        let titles: Vec<&str> = loaded.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert!(loaded.read_error.is_none());

        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].line, 3);
        assert_eq!(loaded.skipped[0].id, Some(TaskId(7)));
        assert!(loaded.skipped[0].reason.contains("invalid UTF-8 in field 2"));
        assert_eq!(loaded.highest_id(), Some(TaskId(7)));
        Ok(())
    }

    #[test]
    fn test_storage_load_ignores_blank_lines() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::new(temp.path().join("tasks.csv"));
        fs::write(
            storage.path(),
            format!("{}\n\nA,,2024-01-01,1,1\n\n", HEADER_LINE),
        )?;

        let loaded = storage.load();
        assert_eq!(loaded.tasks.len(), 1);
        assert!(loaded.skipped.is_empty());
        Ok(())
    }

    #[test]
    fn test_storage_load_unreadable_path_is_degraded() -> anyhow::Result<()> {
        let temp = tempdir()?;
        // A directory cannot be read as a file
        let storage = Storage::new(temp.path());

        let loaded = storage.load();
        assert!(loaded.tasks.is_empty());
        assert!(loaded.read_error.is_some());
        assert!(loaded.is_degraded());
        Ok(())
    }
}
