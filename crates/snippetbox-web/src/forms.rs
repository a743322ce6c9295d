//! Form payloads decoded from `application/x-www-form-urlencoded` bodies.

use serde::Deserialize;

use crate::validator::{Validator, max_chars, not_blank, permitted_value};

/// Expiry periods, in days, a snippet may be created with.
pub const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];

/// Expiry preselected on an empty create form.
pub const DEFAULT_EXPIRY_DAYS: i32 = 365;

pub const TITLE_MAX_CHARS: usize = 100;

/// The create-snippet form, both as submitted and as re-rendered.
///
/// Missing fields decode as empty values (`expires` as 0) so they surface
/// as field errors rather than a rejected request.
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetCreateForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub expires: i32,
    #[serde(skip)]
    pub validator: Validator,
}

impl Default for SnippetCreateForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            expires: DEFAULT_EXPIRY_DAYS,
            validator: Validator::new(),
        }
    }
}

impl SnippetCreateForm {
    /// Run every field check. Returns true when the form may be persisted.
    pub fn validate(&mut self) -> bool {
        let v = &mut self.validator;
        v.check_field(
            not_blank(&self.title),
            "title",
            "This field cannot be blank",
        );
        v.check_field(
            max_chars(&self.title, TITLE_MAX_CHARS),
            "title",
            "This field cannot be more than 100 characters long",
        );
        v.check_field(
            not_blank(&self.content),
            "content",
            "This field cannot be blank",
        );
        v.check_field(
            permitted_value(&self.expires, &PERMITTED_EXPIRY_DAYS),
            "expires",
            "This field must be 1, 7 or 365",
        );
        v.valid()
    }

    /// Error message for `field`, or an empty string. Used by templates.
    pub fn error(&self, field: &str) -> &str {
        self.validator.field_error(field).unwrap_or_default()
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.validator.field_error(field).is_some()
    }
}
