//! Form validation on top of `garde`.
//!
//! A submission is sanitized first (trimmed, repeated fields coerced to
//! lists), then validated by deriving [`garde::Validate`] on the form
//! struct. The rules in this module are `custom` validators carrying the
//! exact user-facing message, since garde's built-in rules have fixed ones:
//!
//! ```ignore
//! #[derive(garde::Validate)]
//! struct GenreForm {
//!     #[garde(custom(required("Genre name required")), custom(chars_between(3, 100, "...")))]
//!     name: String,
//! }
//! let errors = validation::validate(&form);
//! ```
//!
//! garde runs every rule of every field, so all failures are reported
//! together, in field order. Escaping for storage happens after validation;
//! [`unescape_html`] recovers the submitted text from a stored value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered list of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Failures recorded against one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<&garde::Report> for ValidationErrors {
    fn from(report: &garde::Report) -> Self {
        let mut errors = ValidationErrors::new();
        for (path, error) in report.iter() {
            let field = path.to_string();
            let field = if field.is_empty() { "value".to_string() } else { field };
            errors.push(&field, error.message());
        }
        errors
    }
}

/// Run the derived rules of `input`; an empty result means it passed.
pub fn validate<T>(input: &T) -> ValidationErrors
where
    T: garde::Validate,
    T::Context: Default,
{
    match input.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(report) => ValidationErrors::from(&report),
    }
}

fn rule(ok: bool, message: &'static str) -> garde::Result {
    if ok {
        Ok(())
    } else {
        Err(garde::Error::new(message))
    }
}

pub fn required(message: &'static str) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value, _| rule(!value.is_empty(), message)
}

pub fn max_chars(max: usize, message: &'static str) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value, _| rule(value.chars().count() <= max, message)
}

/// Character-count bounds, both inclusive. Empty values pass; pair with
/// [`required`] when the field is mandatory.
pub fn chars_between(
    min: usize,
    max: usize,
    message: &'static str,
) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value, _| {
        let n = value.chars().count();
        rule(value.is_empty() || (min..=max).contains(&n), message)
    }
}

/// Unicode letters and digits only.
pub fn alphanumeric(message: &'static str) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value, _| rule(value.chars().all(char::is_alphanumeric), message)
}

/// An ISO-8601 date or date-time. Empty values pass.
pub fn iso8601(message: &'static str) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value, _| rule(value.is_empty() || parse_iso8601_date(value).is_some(), message)
}

pub fn one_of(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value, _| rule(allowed.contains(&value), message)
}

/// Every element of a list field satisfies `ok`.
pub fn each(
    ok: fn(&str) -> bool,
    message: &'static str,
) -> impl FnOnce(&[String], &()) -> garde::Result {
    move |values, _| rule(values.iter().all(|v| ok(v)), message)
}

/// Length bounds on escaped stored text, counted in characters of the text
/// as submitted so that form limits and store limits agree.
pub fn stored_chars(min: usize, max: usize) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value, _| {
        let n = unescape_html(value).chars().count();
        if (min..=max).contains(&n) {
            Ok(())
        } else {
            Err(garde::Error::new(format!(
                "length is {n}, expected between {min} and {max} characters"
            )))
        }
    }
}

const ENTITIES: [(char, &str); 8] = [
    ('&', "&amp;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('/', "&#x2F;"),
    ('\\', "&#x5C;"),
    ('`', "&#96;"),
];

/// Escape markup-significant characters the way HTML form sanitizers do.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match ENTITIES.iter().find(|(ch, _)| *ch == c) {
            Some((_, entity)) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// Inverse of [`escape_html`]. Decodes in a single left-to-right pass, so
/// `unescape_html(&escape_html(s)) == s` for every `s`.
pub fn unescape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(_, entity)| rest.starts_with(entity)) {
            Some((c, entity)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Accepts calendar dates (`2020-06-01`) and date-times with or without an
/// offset (`2020-06-01T10:00:00Z`, `2020-06-01T10:00`). Returns the date part.
pub fn parse_iso8601_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
}
