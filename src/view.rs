//! Pure projection of the task list for rendering.
//!
//! Everything here is terminal-free: filtering, the per-task `TaskRow`
//! snapshot and the count line are plain functions over the task slice,
//! so the whole module is unit-testable without a backend. The TUI layer
//! only materialises these values into widgets.

use chrono::NaiveDate;

use crate::fields::{Filter, Priority};
use crate::store::format_due_date;
use crate::task::Task;

impl Filter {
    /// Select the visible tasks, preserving store order.
    pub fn apply<'a>(self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|t| match self {
                Filter::All => true,
                Filter::Active => !t.completed,
                Filter::Completed => t.completed,
            })
            .collect()
    }
}

/// Display-ready snapshot of one visible task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_line: String,
    pub overdue: bool,
    pub completed: bool,
}

impl TaskRow {
    /// Build the row for a task as of the given date.
    ///
    /// A completed task is never overdue, whatever its due date.
    pub fn project(task: &Task, today: NaiveDate) -> Self {
        let description = if task.description.trim().is_empty() {
            None
        } else {
            Some(task.description.clone())
        };
        let overdue = !task.completed && task.due_date.is_some_and(|d| d < today);
        TaskRow {
            id: task.id.clone(),
            title: task.title.clone(),
            description,
            priority: task.priority,
            due_line: format_due_date(task.due_date),
            overdue,
            completed: task.completed,
        }
    }
}

/// The count line under the filter selector.
pub fn count_text(tasks: &[Task], filter: Filter) -> String {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let active = total - completed;

    match filter {
        Filter::All => {
            let mut text = format!("{} task{}", total, plural(total));
            if completed > 0 {
                text.push_str(&format!(" ({} completed)", completed));
            }
            text
        }
        Filter::Active => format!("{} active task{}", active, plural(active)),
        Filter::Completed => format!("{} completed task{}", completed, plural(completed)),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            description: String::new(),
            priority: Priority::Low,
            due_date: None,
            completed,
            created_at: Utc::now(),
        }
    }

    fn sample_set() -> Vec<Task> {
        vec![task("1", false), task("2", true), task("3", false)]
    }

    #[test]
    fn active_and_completed_partition_all() {
        let tasks = sample_set();
        let all = Filter::All.apply(&tasks);
        let active = Filter::Active.apply(&tasks);
        let completed = Filter::Completed.apply(&tasks);

        assert_eq!(all.len(), active.len() + completed.len());
        for t in &active {
            assert!(!completed.iter().any(|c| c.id == t.id));
        }
    }

    #[test]
    fn filtering_preserves_order_and_is_idempotent() {
        let tasks = sample_set();
        let active: Vec<String> = Filter::Active
            .apply(&tasks)
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(active, vec!["1", "3"]);

        let once: Vec<Task> = Filter::Active.apply(&tasks).into_iter().cloned().collect();
        let twice: Vec<String> = Filter::Active
            .apply(&once)
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(active, twice);
    }

    #[test]
    fn count_text_all_variants() {
        let tasks = sample_set();
        assert_eq!(count_text(&tasks, Filter::All), "3 tasks (1 completed)");
        assert_eq!(count_text(&tasks, Filter::Active), "2 active tasks");
        assert_eq!(count_text(&tasks, Filter::Completed), "1 completed task");
    }

    #[test]
    fn count_text_singular_and_no_completed_suffix() {
        let tasks = vec![task("1", false)];
        assert_eq!(count_text(&tasks, Filter::All), "1 task");
        assert_eq!(count_text(&[], Filter::All), "0 tasks");
        assert_eq!(count_text(&[], Filter::Completed), "0 completed tasks");
    }

    #[test]
    fn overdue_only_when_past_due_and_active() {
        let today = Utc::now().date_naive();
        let yesterday = today - Duration::days(1);

        let mut active = task("1", false);
        active.due_date = Some(yesterday);
        assert!(TaskRow::project(&active, today).overdue);

        let mut done = task("2", true);
        done.due_date = Some(yesterday);
        assert!(!TaskRow::project(&done, today).overdue);

        let mut due_today = task("3", false);
        due_today.due_date = Some(today);
        assert!(!TaskRow::project(&due_today, today).overdue);
    }

    #[test]
    fn blank_description_projects_to_none() {
        let today = Utc::now().date_naive();
        let mut t = task("1", false);
        assert_eq!(TaskRow::project(&t, today).description, None);

        t.description = "   ".to_string();
        assert_eq!(TaskRow::project(&t, today).description, None);

        t.description = "real text".to_string();
        assert_eq!(
            TaskRow::project(&t, today).description.as_deref(),
            Some("real text")
        );
    }

    #[test]
    fn due_line_text() {
        let today = Utc::now().date_naive();
        let mut t = task("1", false);
        assert_eq!(TaskRow::project(&t, today).due_line, "No due date");

        t.due_date = NaiveDate::from_ymd_opt(2026, 8, 10);
        assert_eq!(TaskRow::project(&t, today).due_line, "Due: 10 Aug 2026");
    }
}
