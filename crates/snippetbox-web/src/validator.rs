//! Field-level validation for form submissions.
//!
//! A [`Validator`] lives for exactly one submission. Checks record at most
//! one message per field: once a field has an error, later failures for the
//! same field are dropped.

use std::collections::HashMap;

/// Accumulator of per-field validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    pub field_errors: HashMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no field has a recorded error.
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Record `message` for `field` unless it already has one.
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check_field(
        &mut self,
        ok: bool,
        field: impl Into<String>,
        message: impl Into<String>,
    ) {
        if !ok {
            self.add_field_error(field, message);
        }
    }

    /// The recorded error for `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }
}

/// True iff `value` contains something other than whitespace.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True iff `value` is at most `n` characters long (not bytes).
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// True iff `value` equals one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_per_field_wins() {
        let mut v = Validator::new();

        v.add_field_error("key1", "message1");
        v.add_field_error("key1", "message2");
        v.add_field_error("key2", "message3");

        assert_eq!(v.field_error("key1"), Some("message1"));
        assert_eq!(v.field_error("key2"), Some("message3"));
    }

    #[test]
    fn check_field_only_records_failures() {
        let mut v = Validator::new();

        v.check_field(true, "k", "m");
        assert!(v.valid());

        v.check_field(false, "k", "m");
        v.check_field(false, "k", "m2");
        assert!(!v.valid());
        assert_eq!(v.field_errors.len(), 1);
        assert_eq!(v.field_error("k"), Some("m"));
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(!not_blank(""));
        assert!(!not_blank("  "));
        assert!(!not_blank("\t\n"));
        assert!(not_blank("a"));
        assert!(not_blank(" a "));
    }

    #[test]
    fn max_chars_counts_characters() {
        assert!(max_chars("", 0));
        assert!(max_chars("abc", 3));
        assert!(!max_chars("abcd", 3));
        // Four bytes, one character.
        assert!(max_chars("🦀", 1));
        assert!(max_chars(&"é".repeat(100), 100));
        assert!(!max_chars(&"a".repeat(101), 100));
    }

    #[test]
    fn permitted_value_is_exact_match() {
        assert!(!permitted_value(&"3", &["1", "7", "365"]));
        assert!(permitted_value(&"7", &["1", "7", "365"]));
        assert!(permitted_value(&365, &[1, 7, 365]));
        assert!(!permitted_value(&0, &[1, 7, 365]));
    }
}
