//! Form input validation.
//!
//! Title validation runs both per keystroke (for inline feedback) and as
//! the submit gate, with identical rules. The description is never
//! rejected; its length only drives the character-counter styling.

use thiserror::Error;

/// Minimum trimmed title length.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum trimmed title length.
pub const TITLE_MAX_LEN: usize = 50;
/// Description length above which the counter shows a warning.
pub const DESC_WARN_LEN: usize = 150;
/// Description length above which the counter shows danger.
pub const DESC_DANGER_LEN: usize = 180;

/// Why a title was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    Empty,
    #[error("Title must be at least {TITLE_MIN_LEN} characters")]
    TooShort,
    #[error("Title cannot exceed {TITLE_MAX_LEN} characters")]
    TooLong,
}

/// Severity bucket for the description character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescLevel {
    Normal,
    Warning,
    Danger,
}

/// Validate a raw title. Whitespace is trimmed before the length check.
pub fn validate_title(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = trimmed.chars().count();
    if len < TITLE_MIN_LEN {
        return Err(ValidationError::TooShort);
    }
    if len > TITLE_MAX_LEN {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}

/// Classify a description length for the live counter.
pub fn description_level(len: usize) -> DescLevel {
    if len > DESC_DANGER_LEN {
        DescLevel::Danger
    } else if len > DESC_WARN_LEN {
        DescLevel::Warning
    } else {
        DescLevel::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_required() {
        assert_eq!(validate_title(""), Err(ValidationError::Empty));
        assert_eq!(validate_title("   "), Err(ValidationError::Empty));
    }

    #[test]
    fn short_title_rejected() {
        assert_eq!(validate_title("ab"), Err(ValidationError::TooShort));
        assert_eq!(validate_title("  ab  "), Err(ValidationError::TooShort));
    }

    #[test]
    fn boundary_lengths() {
        assert_eq!(validate_title("abc"), Ok(()));
        assert_eq!(validate_title(&"x".repeat(50)), Ok(()));
        assert_eq!(validate_title(&"x".repeat(51)), Err(ValidationError::TooLong));
    }

    #[test]
    fn trimming_applies_before_length_check() {
        // 50 characters plus surrounding whitespace still passes.
        let padded = format!("  {}  ", "x".repeat(50));
        assert_eq!(validate_title(&padded), Ok(()));
    }

    #[test]
    fn error_messages_match_ui_copy() {
        assert_eq!(ValidationError::Empty.to_string(), "Title is required");
        assert_eq!(
            ValidationError::TooShort.to_string(),
            "Title must be at least 3 characters"
        );
        assert_eq!(
            ValidationError::TooLong.to_string(),
            "Title cannot exceed 50 characters"
        );
    }

    #[test]
    fn description_levels() {
        assert_eq!(description_level(0), DescLevel::Normal);
        assert_eq!(description_level(150), DescLevel::Normal);
        assert_eq!(description_level(151), DescLevel::Warning);
        assert_eq!(description_level(180), DescLevel::Warning);
        assert_eq!(description_level(181), DescLevel::Danger);
    }
}
