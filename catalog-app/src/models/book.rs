use catalog_data::{Document, ObjectId};
use garde::Validate;
use serde::{Deserialize, Serialize};

use super::{AuthorView, GenreView, CATALOG_ROOT};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Book {
    #[serde(rename = "_id")]
    #[garde(skip)]
    pub id: ObjectId,
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub author: ObjectId,
    #[garde(length(min = 1))]
    pub summary: String,
    #[garde(length(min = 1))]
    pub isbn: String,
    #[serde(default)]
    #[garde(skip)]
    pub genre: Vec<ObjectId>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("{CATALOG_ROOT}/book/{}", self.id)
    }

    pub fn link(&self) -> BookLink {
        BookLink {
            id: self.id,
            title: self.title.clone(),
            summary: self.summary.clone(),
            url: self.url(),
        }
    }
}

impl Document for Book {
    const COLLECTION: &'static str = "books";

    fn id(&self) -> ObjectId {
        self.id
    }

    fn set_id(&mut self, id: ObjectId) {
        self.id = id;
    }
}

/// A book with its author and genres resolved.
///
/// `author` is `None` when the referenced author no longer exists; dangling
/// genre references are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    pub author: Option<AuthorView>,
    pub genre: Vec<GenreView>,
}

/// Unpopulated reference to a book, for lists and select options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookLink {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub summary: String,
    pub url: String,
}
