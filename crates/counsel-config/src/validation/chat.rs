//! Validation for the `[chat]` section.

use crate::schema::CounselConfig;

use super::helpers::{validate_non_blank, validate_range};

pub(crate) fn validate_chat(errors: &mut Vec<String>, config: &CounselConfig) {
    validate_range(errors, "chat.page_size", config.chat.page_size, 1, 200);
    validate_non_blank(
        errors,
        "chat.default_session_title",
        &config.chat.default_session_title,
    );
}
