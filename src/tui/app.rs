//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the TUI state,
//! handles user input, renders the interface, and coordinates between
//! the list screen, the add/edit form and the dialogs.

use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{debug, error, info};

use crate::fields::{Filter, Priority};
use crate::notify::{Notice, NoticeKind};
use crate::store::{Store, TaskPatch};
use crate::task::Task;
use crate::tui::colors::{DARK_GREEN, DARK_RED, GOLD, STEEL_BLUE};
use crate::tui::enums::AppState;
use crate::tui::form::{TaskForm, PRIORITY_GLOBAL_ORDER};
use crate::tui::utils::centered_rect;
use crate::validate::{description_level, validate_title, DescLevel, DESC_DANGER_LEN};
use crate::view::{count_text, TaskRow};

/// How long a deleted row stays dimmed before the store mutation fires.
const DELETE_FADE: Duration = Duration::from_millis(300);

/// Main application state for the terminal user interface.
///
/// Owns the store, the current filter, the shared add/edit form, the
/// notice slot and the pending-delete timers. All store mutation happens
/// in the input handlers; rendering only reads.
pub struct App {
    state: AppState,
    store: Store,
    filter: Filter,
    list_state: ListState,
    form: TaskForm,
    notice: Option<Notice>,
    pending_deletes: Vec<(String, Instant)>,
    confirm_clear: usize,
}

impl App {
    /// Create a new App over an already-loaded store.
    pub fn new(store: Store, filter: Filter) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            store,
            filter,
            list_state: ListState::default(),
            form: TaskForm::new(),
            notice: None,
            pending_deletes: Vec::new(),
            confirm_clear: 0,
        };
        app.clamp_selection();
        app
    }

    /// Save the store to disk, propagating the error.
    pub fn save_store(&self) -> io::Result<()> {
        self.store.save()
    }

    /// Save the store, surfacing a failure as an error notice.
    ///
    /// Returns whether the save succeeded so callers can skip their own
    /// success notice when it did not.
    fn persist(&mut self) -> bool {
        match self.store.save() {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to save tasks");
                self.notice = Some(Notice::new(
                    format!("Error saving tasks: {e}"),
                    NoticeKind::Error,
                ));
                false
            }
        }
    }

    fn notify(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notice = Some(Notice::new(message, kind));
    }

    /// Ids of the tasks the current filter shows, in store order.
    fn visible_ids(&self) -> Vec<String> {
        self.filter
            .apply(self.store.tasks())
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    fn visible_len(&self) -> usize {
        self.filter.apply(self.store.tasks()).len()
    }

    fn selected_id(&self) -> Option<String> {
        let idx = self.list_state.selected()?;
        self.visible_ids().get(idx).cloned()
    }

    fn is_pending_delete(&self, id: &str) -> bool {
        self.pending_deletes.iter().any(|(pid, _)| pid == id)
    }

    /// Keep the selection inside the visible list after any mutation.
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None if len > 0 => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.list_state
            .select(if self.visible_len() == 0 { None } else { Some(0) });
    }

    /// Per-tick upkeep: expire the notice and commit elapsed delete fades.
    fn tick(&mut self) {
        if self.notice.as_ref().is_some_and(Notice::is_expired) {
            self.notice = None;
        }

        let now = Instant::now();
        let due: Vec<String> = self
            .pending_deletes
            .iter()
            .filter(|(_, deadline)| *deadline <= now)
            .map(|(id, _)| id.clone())
            .collect();
        if due.is_empty() {
            return;
        }
        self.pending_deletes.retain(|(_, deadline)| *deadline > now);

        let mut removed_any = false;
        for id in due {
            if self.store.remove(&id) {
                debug!(id = %id, "task deleted");
                removed_any = true;
            }
        }
        if removed_any {
            if self.persist() {
                self.notify("Task deleted successfully!", NoticeKind::Error);
            }
            self.clamp_selection();
        }
    }

    /// Open the edit form for the selected task, if it still exists.
    fn begin_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.is_pending_delete(&id) {
            return;
        }
        if let Some(task) = self.store.get(&id) {
            self.form = TaskForm::from_task(task);
            self.state = AppState::EditTask;
            self.notify(
                "Editing task... Press Enter to save changes.",
                NoticeKind::Info,
            );
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(completed) = self.store.toggle_completed(&id) {
            if self.persist() {
                let status = if completed { "completed" } else { "active" };
                self.notify(format!("Task marked as {status}!"), NoticeKind::Success);
            }
            self.clamp_selection();
        }
    }

    /// Schedule the selected task for removal after the fade interval.
    ///
    /// A second delete of the same task while its fade is pending is a
    /// no-op; the timer never blocks input.
    fn schedule_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.is_pending_delete(&id) {
            return;
        }
        debug!(id = %id, "delete scheduled");
        self.pending_deletes.push((id, Instant::now() + DELETE_FADE));
    }

    fn request_clear_completed(&mut self) {
        let completed = self.store.tasks().iter().filter(|t| t.completed).count();
        if completed == 0 {
            self.notify("No completed tasks to clear!", NoticeKind::Info);
        } else {
            self.confirm_clear = completed;
            self.state = AppState::Confirm;
        }
    }

    /// Validate and apply the form as either a create or an update.
    fn submit_form(&mut self) {
        if let Err(e) = validate_title(&self.form.title.value) {
            self.notify(e.to_string(), NoticeKind::Error);
            return;
        }

        let title = self.form.title.value.trim().to_string();
        let description = self.form.description.value.trim().to_string();
        let priority = self.form.selected_priority();
        let due_date = self.form.due_date();
        let is_edit = self.form.is_edit();

        if let Some(id) = self.form.editing_id.clone() {
            let patch = TaskPatch {
                title,
                description,
                priority,
                due_date,
            };
            if !self.store.update(&id, patch) {
                self.notify("Task no longer exists", NoticeKind::Error);
                self.form.reset();
                self.state = AppState::TaskList;
                return;
            }
            info!(id = %id, "task updated");
        } else {
            let id = self.store.next_id();
            info!(id = %id, "task created");
            self.store.add(Task {
                id,
                title,
                description,
                priority,
                due_date,
                completed: false,
                created_at: Utc::now(),
            });
        }

        if self.persist() {
            self.notify(
                if is_edit {
                    "Task updated successfully!"
                } else {
                    "Task added successfully!"
                },
                NoticeKind::Success,
            );
        }
        self.form.reset();
        self.state = AppState::TaskList;
        self.clamp_selection();
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Char('a') => {
                self.form = TaskForm::new();
                self.state = AppState::AddTask;
            }
            KeyCode::Char('e') | KeyCode::Enter => self.begin_edit(),
            KeyCode::Char(' ') | KeyCode::Char('c') => self.toggle_selected(),
            KeyCode::Char('d') => self.schedule_delete(),
            KeyCode::Char('x') => self.request_clear_completed(),
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Active),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Char('f') => self.set_filter(self.filter.next()),
            KeyCode::Char('h') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_form_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.form.reset();
                self.state = AppState::TaskList;
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Enter => {
                let removed = self.store.remove_where(|t| t.completed);
                self.state = AppState::TaskList;
                self.confirm_clear = 0;
                if removed > 0 && self.persist() {
                    let plural = if removed == 1 { "" } else { "s" };
                    self.notify(
                        format!("Cleared {removed} completed task{plural}!"),
                        NoticeKind::Success,
                    );
                }
                self.clamp_selection();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.confirm_clear = 0;
            }
            _ => {}
        }
    }

    fn handle_help_input(&mut self, key: KeyCode) {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('h')
        ) {
            self.state = AppState::TaskList;
        }
    }

    /// Poll for and handle keyboard events based on current state.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(false);
                }
                let should_quit = match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code),
                    AppState::AddTask | AppState::EditTask => {
                        self.handle_form_input(key.code);
                        false
                    }
                    AppState::Help => {
                        self.handle_help_input(key.code);
                        false
                    }
                    AppState::Confirm => {
                        self.handle_confirm_input(key.code);
                        false
                    }
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Render the main task list with the header and the filtered rows.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let header_text = vec![Line::from(vec![
            Span::styled("TASKMAN", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!(
                    "View: {}  {}",
                    self.filter.label(),
                    count_text(self.store.tasks(), self.filter)
                ),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])];
        let header_block = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header_block, chunks[0]);

        let rows: Vec<TaskRow> = self
            .filter
            .apply(self.store.tasks())
            .into_iter()
            .map(|t| TaskRow::project(t, today))
            .collect();

        let list_block = Block::default().borders(Borders::ALL).title(format!(
            "Tasks ({}/{}) - Press 'h' for help",
            rows.len(),
            self.store.len()
        ));

        if rows.is_empty() {
            let placeholder = Paragraph::new("No tasks to show")
                .block(list_block)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(placeholder, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let title_style = if row.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                };
                let priority_color = match row.priority {
                    Priority::Low => DARK_GREEN,
                    Priority::Medium => GOLD,
                    Priority::High => DARK_RED,
                };

                let mut lines = vec![Line::from(vec![
                    Span::styled(row.title.clone(), title_style),
                    Span::raw("  "),
                    Span::styled(
                        format!("[{}]", row.priority.label()),
                        Style::default().fg(priority_color),
                    ),
                ])];
                if let Some(desc) = &row.description {
                    lines.push(Line::from(Span::styled(
                        format!("  {desc}"),
                        Style::default().fg(Color::Gray),
                    )));
                }
                let (due_text, due_style) = if row.overdue {
                    (
                        format!("  {} (overdue)", row.due_line),
                        Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD),
                    )
                } else {
                    (
                        format!("  {}", row.due_line),
                        Style::default().fg(Color::DarkGray),
                    )
                };
                lines.push(Line::from(Span::styled(due_text, due_style)));

                let mut item = ListItem::new(lines);
                if self.is_pending_delete(&row.id) {
                    item = item.style(Style::default().add_modifier(Modifier::DIM));
                }
                item
            })
            .collect();

        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    /// Render the shared add/edit form with live title validation and the
    /// description character counter.
    fn render_task_form(&mut self, f: &mut Frame, area: Rect) {
        let is_edit = self.form.is_edit();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Description
                Constraint::Length(3), // Priority
                Constraint::Length(3), // Due
                Constraint::Length(2), // Validation feedback
                Constraint::Min(1),    // Instructions
            ])
            .split(area);

        // Title: gold border while active, red once invalid input exists.
        let title_error = validate_title(&self.form.title.value).err();
        let title_typed = !self.form.title.value.is_empty();
        let title_style = if title_error.is_some() && title_typed {
            Style::default().fg(DARK_RED)
        } else if self.form.title.active {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let title_input = Paragraph::new(self.form.title.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title *")
                .border_style(title_style),
        );
        f.render_widget(title_input, chunks[0]);

        let desc_len = self.form.description.value.chars().count();
        let desc_counter_color = match description_level(desc_len) {
            DescLevel::Normal => Color::Reset,
            DescLevel::Warning => GOLD,
            DescLevel::Danger => DARK_RED,
        };
        let desc_style = if self.form.description.active {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let desc_input = Paragraph::new(self.form.description.value.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Line::from(vec![
                        Span::raw("Description "),
                        Span::styled(
                            format!("({desc_len}/{DESC_DANGER_LEN})"),
                            Style::default().fg(desc_counter_color),
                        ),
                    ]))
                    .border_style(desc_style),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(desc_input, chunks[1]);

        let priority_style = if self.form.current_field == PRIORITY_GLOBAL_ORDER {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let priority_selector =
            Paragraph::new(format!("< {} >", self.form.selected_priority().label())).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Priority")
                    .border_style(priority_style),
            );
        f.render_widget(priority_selector, chunks[2]);

        let due_style = if self.form.due.active {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let due_input = Paragraph::new(self.form.due.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Due (YYYY-MM-DD, today, tomorrow, in Nd)")
                .border_style(due_style),
        );
        f.render_widget(due_input, chunks[3]);

        if let (Some(err), true) = (title_error, title_typed) {
            let feedback = Paragraph::new(err.to_string())
                .style(Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD));
            f.render_widget(feedback, chunks[4]);
        }

        let submit_label = if is_edit { "Update Task" } else { "Add Task" };
        let instructions = Paragraph::new(format!(
            "Tab/Down next field  Shift+Tab/Up previous  Left/Right move or cycle priority  Enter {submit_label}  Esc cancel"
        ))
        .block(Block::default().borders(Borders::ALL).title("Instructions"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(instructions, chunks[5]);
    }

    /// Render the key binding reference.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Task list",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  Up/Down or k/j   move selection"),
            Line::from("  a                add a task"),
            Line::from("  e or Enter       edit the selected task"),
            Line::from("  Space or c       toggle complete"),
            Line::from("  d                delete the selected task"),
            Line::from("  x                clear all completed tasks"),
            Line::from("  1 / 2 / 3        show all / active / completed"),
            Line::from("  f                cycle the filter"),
            Line::from("  q or Esc         quit"),
            Line::from(""),
            Line::from(Span::styled(
                "Form",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  Tab/Down, Shift+Tab/Up   change field"),
            Line::from("  Left/Right               move cursor or cycle priority"),
            Line::from("  Enter                    submit"),
            Line::from("  Esc                      cancel"),
            Line::from(""),
            Line::from("Press Esc to return."),
        ];
        let help = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }

    /// Render the confirmation dialog for clearing completed tasks.
    fn render_confirm(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let count = self.confirm_clear;
        let plural = if count == 1 { "" } else { "s" };
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(format!("Clear {count} completed task{plural}")),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let (status_text, style) = if let Some(notice) = &self.notice {
            let bg = match notice.kind {
                NoticeKind::Success => DARK_GREEN,
                NoticeKind::Error => DARK_RED,
                NoticeKind::Info => STEEL_BLUE,
            };
            (
                notice.message.clone(),
                Style::default().bg(bg).fg(Color::White),
            )
        } else {
            let text = match self.state {
                AppState::TaskList => {
                    "a add  e edit  Space toggle  d delete  x clear  f filter  h help  q quit"
                        .to_string()
                }
                AppState::AddTask => "Add New Task".to_string(),
                AppState::EditTask => "Edit Task".to_string(),
                AppState::Help => "Help".to_string(),
                AppState::Confirm => "Confirm Action".to_string(),
            };
            (text, Style::default().bg(Color::DarkGray).fg(Color::White))
        };

        let status = Paragraph::new(status_text)
            .style(style)
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the screen renderers.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::TaskList => self.render_task_list(f, chunks[0]),
            AppState::AddTask | AppState::EditTask => self.render_task_form(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::Confirm => {
                self.render_task_list(f, chunks[0]);
                self.render_confirm(f, chunks[0]);
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering, timers and input processing until the user
    /// exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;
            self.tick();

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use tempfile::tempdir;

    fn app_with_tasks(tasks: Vec<(&str, bool)>) -> (App, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let mut store = Store::load(&dir.path().join("tasks.json"));
        for (title, completed) in tasks {
            let id = store.next_id();
            store.add(Task {
                id,
                title: title.to_string(),
                description: String::new(),
                priority: Priority::Medium,
                due_date: None,
                completed,
                created_at: Utc::now(),
            });
        }
        (App::new(store, Filter::All), dir)
    }

    #[test]
    fn new_app_selects_first_visible_task() {
        let (app, _dir) = app_with_tasks(vec![("one", false), ("two", false)]);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn toggle_emits_status_notice_and_saves() {
        let (mut app, _dir) = app_with_tasks(vec![("one", false)]);
        app.toggle_selected();

        assert!(app.store.tasks()[0].completed);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.message, "Task marked as completed!");
        assert_eq!(notice.kind, NoticeKind::Success);

        app.toggle_selected();
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Task marked as active!"
        );
    }

    #[test]
    fn repeat_delete_while_pending_is_noop() {
        let (mut app, _dir) = app_with_tasks(vec![("one", false)]);
        app.schedule_delete();
        app.schedule_delete();
        assert_eq!(app.pending_deletes.len(), 1);
        // Nothing removed until the fade elapses.
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn elapsed_fade_commits_the_delete() {
        let (mut app, _dir) = app_with_tasks(vec![("one", false), ("two", false)]);
        app.schedule_delete();
        app.pending_deletes[0].1 = Instant::now() - Duration::from_millis(1);
        app.tick();

        assert_eq!(app.store.len(), 1);
        assert!(app.pending_deletes.is_empty());
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.message, "Task deleted successfully!");
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test]
    fn clear_completed_with_none_is_informational() {
        let (mut app, _dir) = app_with_tasks(vec![("one", false)]);
        app.request_clear_completed();
        assert_eq!(app.state, AppState::TaskList);
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.message, "No completed tasks to clear!");
        assert_eq!(notice.kind, NoticeKind::Info);
    }

    #[test]
    fn clear_completed_goes_through_confirm() {
        let (mut app, _dir) = app_with_tasks(vec![("one", true), ("two", false), ("three", true)]);
        app.request_clear_completed();
        assert_eq!(app.state, AppState::Confirm);
        assert_eq!(app.confirm_clear, 2);

        app.handle_confirm_input(KeyCode::Char('y'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.store.len(), 1);
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Cleared 2 completed tasks!"
        );
    }

    #[test]
    fn confirm_cancel_leaves_store_untouched() {
        let (mut app, _dir) = app_with_tasks(vec![("one", true)]);
        app.request_clear_completed();
        app.handle_confirm_input(KeyCode::Char('n'));
        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn submit_with_invalid_title_is_rejected() {
        let (mut app, _dir) = app_with_tasks(vec![]);
        app.handle_task_list_input(KeyCode::Char('a'));
        app.form.handle_char('a');
        app.form.handle_char('b');
        app.submit_form();

        assert_eq!(app.state, AppState::AddTask);
        assert_eq!(app.store.len(), 0);
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Title must be at least 3 characters"
        );
    }

    #[test]
    fn submit_creates_then_edits() {
        let (mut app, _dir) = app_with_tasks(vec![]);
        app.handle_task_list_input(KeyCode::Char('a'));
        for c in "Buy milk".chars() {
            app.form.handle_char(c);
        }
        app.submit_form();

        assert_eq!(app.state, AppState::TaskList);
        assert_eq!(app.store.len(), 1);
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Task added successfully!"
        );

        app.begin_edit();
        assert_eq!(app.state, AppState::EditTask);
        app.form.title = crate::tui::input::InputField::with_value("Buy oat milk");
        app.submit_form();

        assert_eq!(app.store.len(), 1);
        assert_eq!(app.store.tasks()[0].title, "Buy oat milk");
        assert_eq!(
            app.notice.as_ref().unwrap().message,
            "Task updated successfully!"
        );
    }

    #[test]
    fn filter_keys_switch_views() {
        let (mut app, _dir) = app_with_tasks(vec![("one", true), ("two", false)]);
        app.handle_task_list_input(KeyCode::Char('2'));
        assert_eq!(app.filter, Filter::Active);
        assert_eq!(app.visible_len(), 1);

        app.handle_task_list_input(KeyCode::Char('f'));
        assert_eq!(app.filter, Filter::Completed);
    }

    #[test]
    fn render_smoke_test() {
        let (mut app, _dir) = app_with_tasks(vec![("one", false), ("two", true)]);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        app.state = AppState::Help;
        terminal.draw(|f| app.render(f)).unwrap();

        app.state = AppState::AddTask;
        terminal.draw(|f| app.render(f)).unwrap();
    }
}
