//! Per-entity form pipelines.
//!
//! Each form type sanitizes and validates one submitted [`FormData`]
//! into echo-able values plus the collected failures. Forms whose entity
//! holds references also `resolve` them against the store once field
//! validation has passed.
//!
//! [`FormData`]: catalog_core::FormData

mod author;
mod book;
mod book_instance;
mod genre;

pub use author::AuthorForm;
pub use book::BookForm;
pub use book_instance::BookInstanceForm;
pub use genre::GenreForm;

use catalog_core::ValidationErrors;

/// Sanitized values of one submission plus every rule that failed.
#[derive(Debug, Clone)]
pub struct Submission<F> {
    pub values: F,
    pub errors: ValidationErrors,
}

impl<F> Submission<F> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
