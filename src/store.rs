//! Task storage and date utility functions.
//!
//! This module provides the `Store` struct that owns the in-memory task
//! list together with its persistence path, plus helpers for parsing and
//! formatting due dates.
//!
//! The persisted form is a JSON array of task records. Loading degrades
//! to an empty store when the file is absent or unreadable; saving is an
//! atomic temp-file-plus-rename overwrite of the whole array.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use tracing::warn;

use crate::fields::Priority;
use crate::task::Task;

/// Field edits applied to an existing task.
///
/// `id`, `completed` and `created_at` are never part of a patch.
#[derive(Debug, Clone)]
pub struct TaskPatch {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

/// In-memory task list mirrored to a JSON file.
#[derive(Debug)]
pub struct Store {
    tasks: Vec<Task>,
    path: PathBuf,
}

impl Store {
    /// Load the store from a JSON file, starting empty if the file is
    /// missing or cannot be parsed.
    pub fn load(path: &Path) -> Self {
        let tasks = if path.exists() {
            let mut buf = String::new();
            match File::open(path).and_then(|mut f| f.read_to_string(&mut buf)) {
                Ok(_) => match serde_json::from_str(&buf) {
                    Ok(tasks) => tasks,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to parse task file, starting fresh");
                        Vec::new()
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read task file, starting fresh");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        Store {
            tasks,
            path: path.to_path_buf(),
        }
    }

    /// Save the task list using an atomic write (temp file + rename).
    pub fn save(&self) -> std::io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(&self.tasks)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }

    /// The full task sequence, in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of stored tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the store holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Generate the next available task id.
    ///
    /// Ids are epoch-millisecond strings; the value is bumped while it
    /// collides with an existing id.
    pub fn next_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        while self.tasks.iter().any(|t| t.id == millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }

    /// Get a task by id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a task to the end of the list.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Apply a patch to the task with the given id.
    ///
    /// Returns false when no task has that id.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.title = patch.title;
                task.description = patch.description;
                task.priority = patch.priority;
                task.due_date = patch.due_date;
                true
            }
            None => false,
        }
    }

    /// Remove the task with the given id. Returns false if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Flip the completion flag of a task, returning its new value.
    pub fn toggle_completed(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Remove every task matching the predicate, returning how many went.
    pub fn remove_where<F>(&mut self, pred: F) -> usize
    where
        F: Fn(&Task) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|t| !pred(t));
        before - self.tasks.len()
    }

    /// Populate three example tasks when the store is empty.
    ///
    /// Returns whether seeding occurred; the caller is expected to save.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.tasks.is_empty() {
            return false;
        }
        let today = Local::now().date_naive();
        let now = Utc::now();
        self.tasks = vec![
            Task {
                id: "1".to_string(),
                title: "Welcome to Taskman".to_string(),
                description: "This is your first task. Try marking it as complete!".to_string(),
                priority: Priority::High,
                due_date: Some(today),
                completed: false,
                created_at: now,
            },
            Task {
                id: "2".to_string(),
                title: "Add more tasks".to_string(),
                description: "Press 'a' on the list screen to open the form".to_string(),
                priority: Priority::Medium,
                due_date: None,
                completed: false,
                created_at: now,
            },
            Task {
                id: "3".to_string(),
                title: "Explore the filters".to_string(),
                description: "Switch between the all, active and completed views".to_string(),
                priority: Priority::High,
                due_date: Some(today + Duration::days(7)),
                completed: true,
                created_at: now,
            },
        ];
        true
    }
}

/// Parse human-readable due date input.
///
/// Supports:
/// - "today", "tomorrow"
/// - bare weekday names ("monday", "fri")
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    // "in X" patterns
    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    // Weekday patterns: this week's occurrence, today counts as today.
    let weekdays = [
        ("monday", 0),
        ("tuesday", 1),
        ("wednesday", 2),
        ("thursday", 3),
        ("friday", 4),
        ("saturday", 5),
        ("sunday", 6),
        ("mon", 0),
        ("tue", 1),
        ("wed", 2),
        ("thu", 3),
        ("fri", 4),
        ("sat", 5),
        ("sun", 6),
    ];
    for (day_name, target_day) in weekdays {
        if s == day_name {
            let current_day = today.weekday().num_days_from_monday() as i32;
            let days_ahead = (target_day + 7 - current_day) % 7;
            return Some(today + Duration::days(days_ahead as i64));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a due date for the task row ("Due: 10 Aug 2026" / "No due date").
pub fn format_due_date(due: Option<NaiveDate>) -> String {
    match due {
        Some(d) => format!("Due: {}", d.format("%-d %b %Y")),
        None => "No due date".to_string(),
    }
}
