use catalog_core::validation::{
    self, escape_html, iso8601, one_of, parse_iso8601_date, required, unescape_html,
};
use catalog_core::{FormData, HttpError, ValidationErrors};
use catalog_data::{ObjectId, Repository};
use garde::Validate;
use serde::Serialize;

use super::Submission;
use crate::models::{format_input_date, today, BookInstance, BookStatus};
use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct BookInstanceForm {
    #[garde(custom(required("Book must be specified.")))]
    pub book: String,
    #[garde(custom(required("Imprint must be specified.")))]
    pub imprint: String,
    #[garde(custom(one_of(&BookStatus::NAMES, "Invalid status.")))]
    pub status: String,
    #[garde(custom(iso8601("Invalid date.")))]
    pub due_back: String,
}

impl BookInstanceForm {
    pub fn parse(data: &FormData) -> Submission<Self> {
        let mut status = data.text("status");
        if status.is_empty() {
            status = BookStatus::default().to_string();
        }
        let values = Self {
            book: data.text("book"),
            imprint: data.text("imprint"),
            status,
            due_back: data.text("due_back"),
        };
        let errors = validation::validate(&values);
        Submission { values, errors }
    }

    /// Look up the referenced book. A dangling reference is recorded in
    /// `errors` and yields `None`.
    pub async fn resolve(
        &self,
        state: &AppState,
        errors: &mut ValidationErrors,
    ) -> Result<Option<BookInstance>, HttpError> {
        let book = match ObjectId::parse(&self.book) {
            Ok(id) => state.books.find_by_id(&id).await?,
            Err(_) => None,
        };
        let Some(book) = book else {
            errors.push("book", "Book not found.");
            return Ok(None);
        };

        Ok(Some(BookInstance {
            id: ObjectId::new(),
            book: book.id,
            imprint: escape_html(&self.imprint),
            status: self.status.parse().unwrap_or_default(),
            due_back: parse_iso8601_date(&self.due_back).unwrap_or_else(today),
        }))
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: instance.book.to_string(),
            imprint: unescape_html(&instance.imprint),
            status: instance.status.to_string(),
            due_back: format_input_date(Some(instance.due_back)),
        }
    }
}
