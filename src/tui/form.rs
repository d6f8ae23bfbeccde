//! Task form handling for the terminal user interface.
//!
//! This module provides the `TaskForm` structure used by both the add and
//! edit screens, including field ordering and form state management. The
//! same form serves both flows; `editing_id` decides which one a submit
//! performs.

use chrono::NaiveDate;

use crate::fields::Priority;
use crate::store::parse_due_input;
use crate::task::Task;
use crate::tui::input::InputField;

/// Global order constants for the form fields.
pub const TITLE_GLOBAL_ORDER: usize = 0;
pub const DESCRIPTION_GLOBAL_ORDER: usize = 1;
pub const PRIORITY_GLOBAL_ORDER: usize = 2;
pub const DUE_GLOBAL_ORDER: usize = 3;

/// Task form for creating and editing tasks.
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub priority: usize,
    pub current_field: usize,
    pub priorities: Vec<Priority>,
    pub editing_id: Option<String>,
}

impl TaskForm {
    /// Create a blank form defaulting to medium priority.
    pub fn new() -> Self {
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            due: InputField::new(),
            priority: 1, // Medium
            current_field: 0,
            priorities: vec![Priority::Low, Priority::Medium, Priority::High],
            editing_id: None,
        };
        form.update_active_field();
        form
    }

    /// Create a form populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new();
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(&task.description);
        form.due = InputField::with_value(
            &task
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        );
        form.priority = form
            .priorities
            .iter()
            .position(|&p| p == task.priority)
            .unwrap_or(1);
        form.editing_id = Some(task.id.clone());
        form.update_active_field();
        form
    }

    /// Whether a submit will patch an existing task.
    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Get the total number of fields (input fields + priority selector).
    pub fn field_count(&self) -> usize {
        4
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_GLOBAL_ORDER;
        self.description.active = self.current_field == DESCRIPTION_GLOBAL_ORDER;
        self.due.active = self.current_field == DUE_GLOBAL_ORDER;
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            TITLE_GLOBAL_ORDER => self.title.handle_char(c),
            DESCRIPTION_GLOBAL_ORDER => self.description.handle_char(c),
            DUE_GLOBAL_ORDER => self.due.handle_char(c),
            _ => {}
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            TITLE_GLOBAL_ORDER => self.title.handle_backspace(),
            DESCRIPTION_GLOBAL_ORDER => self.description.handle_backspace(),
            DUE_GLOBAL_ORDER => self.due.handle_backspace(),
            _ => {}
        }
    }

    /// Handle delete input for the currently active field.
    pub fn handle_delete(&mut self) {
        match self.current_field {
            TITLE_GLOBAL_ORDER => self.title.handle_delete(),
            DESCRIPTION_GLOBAL_ORDER => self.description.handle_delete(),
            DUE_GLOBAL_ORDER => self.due.handle_delete(),
            _ => {}
        }
    }

    /// Handle left/right arrow keys for cursor movement or the priority
    /// selector.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            TITLE_GLOBAL_ORDER => {
                if right {
                    self.title.move_cursor_right()
                } else {
                    self.title.move_cursor_left()
                }
            }
            DESCRIPTION_GLOBAL_ORDER => {
                if right {
                    self.description.move_cursor_right()
                } else {
                    self.description.move_cursor_left()
                }
            }
            PRIORITY_GLOBAL_ORDER => {
                if right {
                    self.priority = (self.priority + 1) % self.priorities.len();
                } else {
                    self.priority = if self.priority == 0 {
                        self.priorities.len() - 1
                    } else {
                        self.priority - 1
                    };
                }
            }
            DUE_GLOBAL_ORDER => {
                if right {
                    self.due.move_cursor_right()
                } else {
                    self.due.move_cursor_left()
                }
            }
            _ => {}
        }
    }

    /// The currently selected priority.
    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    /// Due date as entered, interpreted relative to today. Unparseable
    /// input means no due date.
    pub fn due_date(&self) -> Option<NaiveDate> {
        parse_due_input(&self.due.value)
    }

    /// Reset to a blank add form.
    pub fn reset(&mut self) {
        *self = TaskForm::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn field_cycling_wraps() {
        let mut form = TaskForm::new();
        assert_eq!(form.current_field, TITLE_GLOBAL_ORDER);
        assert!(form.title.active);

        for _ in 0..form.field_count() {
            form.next_field();
        }
        assert_eq!(form.current_field, TITLE_GLOBAL_ORDER);

        form.prev_field();
        assert_eq!(form.current_field, DUE_GLOBAL_ORDER);
        assert!(form.due.active);
        assert!(!form.title.active);
    }

    #[test]
    fn priority_selector_cycles() {
        let mut form = TaskForm::new();
        form.current_field = PRIORITY_GLOBAL_ORDER;
        assert_eq!(form.selected_priority(), Priority::Medium);

        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::High);
        form.handle_left_right(true);
        assert_eq!(form.selected_priority(), Priority::Low);
        form.handle_left_right(false);
        assert_eq!(form.selected_priority(), Priority::High);
    }

    #[test]
    fn from_task_prefills_and_marks_edit() {
        let task = Task {
            id: "42".to_string(),
            title: "Water plants".to_string(),
            description: "Both windowsills".to_string(),
            priority: Priority::Low,
            due_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 9),
            completed: false,
            created_at: Utc::now(),
        };
        let form = TaskForm::from_task(&task);
        assert!(form.is_edit());
        assert_eq!(form.editing_id.as_deref(), Some("42"));
        assert_eq!(form.title.value, "Water plants");
        assert_eq!(form.description.value, "Both windowsills");
        assert_eq!(form.due.value, "2026-08-09");
        assert_eq!(form.selected_priority(), Priority::Low);
    }

    #[test]
    fn reset_returns_to_blank_add_form() {
        let mut form = TaskForm::new();
        form.title = InputField::with_value("something");
        form.editing_id = Some("1".to_string());
        form.reset();
        assert!(form.title.value.is_empty());
        assert!(!form.is_edit());
        assert_eq!(form.selected_priority(), Priority::Medium);
    }

    #[test]
    fn unparseable_due_input_means_no_date() {
        let mut form = TaskForm::new();
        form.due = InputField::with_value("next sometime");
        assert_eq!(form.due_date(), None);
    }
}
