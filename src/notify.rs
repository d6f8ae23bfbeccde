//! Ephemeral status notices.
//!
//! The app holds at most one notice at a time; setting a new one replaces
//! the current one. A notice auto-dismisses three seconds after it was
//! shown, checked on every event-loop tick. Dismissal is cosmetic only.

use std::time::{Duration, Instant};

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A single status-bar message with its display deadline.
#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

impl Notice {
    /// Create a notice stamped with the current instant.
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Notice {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    /// Whether the notice has outlived its TTL.
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTICE_TTL
    }
}
