//! Title rule shared by the create and update inputs.
//!
//! The rule looks at the trimmed title, because that is what the service
//! stores. A title of spaces alone is empty, not three characters long.

use std::borrow::Cow;

use validator::ValidationError;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 200;

/// Check a raw title against the length rule. Lengths count characters, not
/// bytes.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(error("required", "title must not be empty"));
    }
    let chars = trimmed.chars().count();
    if chars < TITLE_MIN_CHARS {
        return Err(error("length", "title must be at least 3 characters"));
    }
    if chars > TITLE_MAX_CHARS {
        return Err(error("length", "title must be at most 200 characters"));
    }
    Ok(())
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
