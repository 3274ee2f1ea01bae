//! Request handlers, one module per entity.
//!
//! Every entity exposes the same eight states: `list`, `detail`,
//! `create_form`, `create_submit`, `delete_confirm`, `delete_submit`,
//! `update_form` and `update_submit`. Reads that need more than one query
//! go through [`QuerySet`](catalog_core::QuerySet).

pub mod author;
pub mod book;
pub mod book_instance;
pub mod catalog;
pub mod genre;

use catalog_core::HttpError;
use catalog_data::ObjectId;

/// Parse a path segment; a malformed id is a bad request.
pub(crate) fn parse_id(raw: &str) -> Result<ObjectId, HttpError> {
    Ok(ObjectId::parse(raw)?)
}
