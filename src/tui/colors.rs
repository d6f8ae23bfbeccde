//! Color constants for the terminal user interface.

use ratatui::style::Color;

// These brand the priority badges, the notice bar and form feedback.

/// Used for the active form field border and medium priority
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for success notices and low priority
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for error notices, overdue due lines and high priority
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Used for info notices
pub const STEEL_BLUE: Color = Color::Rgb(70, 130, 180);
