use catalog_core::validation::{
    self, alphanumeric, escape_html, iso8601, max_chars, parse_iso8601_date, required,
    unescape_html,
};
use catalog_core::FormData;
use catalog_data::ObjectId;
use garde::Validate;
use serde::Serialize;

use super::Submission;
use crate::models::{format_input_date, Author};

/// Author fields as submitted, trimmed but not yet escaped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AuthorForm {
    #[garde(
        custom(required("First name must be specified.")),
        custom(max_chars(100, "First name must not exceed 100 characters.")),
        custom(alphanumeric("First name has non-alphanumeric characters."))
    )]
    pub first_name: String,
    #[garde(
        custom(required("Family name must be specified.")),
        custom(max_chars(100, "Family name must not exceed 100 characters.")),
        custom(alphanumeric("Family name has non-alphanumeric characters."))
    )]
    pub family_name: String,
    #[garde(custom(iso8601("Invalid date of birth")))]
    pub date_of_birth: String,
    #[garde(custom(iso8601("Invalid date of death")))]
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn parse(data: &FormData) -> Submission<Self> {
        let values = Self {
            first_name: data.text("first_name"),
            family_name: data.text("family_name"),
            date_of_birth: data.text("date_of_birth"),
            date_of_death: data.text("date_of_death"),
        };
        let errors = validation::validate(&values);
        Submission { values, errors }
    }

    /// Build a new author from values that passed validation.
    pub fn into_author(self) -> Author {
        Author {
            id: ObjectId::new(),
            first_name: escape_html(&self.first_name),
            family_name: escape_html(&self.family_name),
            date_of_birth: parse_iso8601_date(&self.date_of_birth),
            date_of_death: parse_iso8601_date(&self.date_of_death),
        }
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: unescape_html(&author.first_name),
            family_name: unescape_html(&author.family_name),
            date_of_birth: format_input_date(author.date_of_birth),
            date_of_death: format_input_date(author.date_of_death),
        }
    }
}
