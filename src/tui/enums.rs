//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    TaskList,
    AddTask,
    EditTask,
    Help,
    Confirm,
}
