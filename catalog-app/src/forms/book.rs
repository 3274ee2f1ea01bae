use catalog_core::validation::{self, each, escape_html, required, unescape_html};
use catalog_core::{FormData, HttpError, QuerySet, ValidationErrors};
use catalog_data::{ObjectId, Repository};
use garde::Validate;
use serde::Serialize;

use super::Submission;
use crate::models::{Author, Book, Genre};
use crate::populate::unique_ids;
use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct BookForm {
    #[garde(custom(required("Title must not be empty.")))]
    pub title: String,
    #[garde(custom(required("Author must not be empty.")))]
    pub author: String,
    #[garde(custom(required("Summary must not be empty.")))]
    pub summary: String,
    #[garde(custom(required("ISBN must not be empty.")))]
    pub isbn: String,
    #[garde(custom(each(ObjectId::is_valid, "Invalid genre.")))]
    pub genre: Vec<String>,
}

impl BookForm {
    pub fn parse(data: &FormData) -> Submission<Self> {
        let values = Self {
            title: data.text("title"),
            author: data.text("author"),
            summary: data.text("summary"),
            isbn: data.text("isbn"),
            genre: data.texts("genre"),
        };
        let errors = validation::validate(&values);
        Submission { values, errors }
    }

    /// Whether `id` is among the submitted genres.
    pub fn has_genre(&self, id: &ObjectId) -> bool {
        self.genre
            .iter()
            .any(|g| ObjectId::parse(g).is_ok_and(|parsed| parsed == *id))
    }

    /// Look up the referenced author and genres. Dangling references are
    /// recorded in `errors` and yield `None`.
    pub async fn resolve(
        &self,
        state: &AppState,
        errors: &mut ValidationErrors,
    ) -> Result<Option<Book>, HttpError> {
        let author_id = ObjectId::parse(&self.author).ok();
        let genre_ids = unique_ids(self.genre.iter().filter_map(|g| ObjectId::parse(g).ok()));

        let mut results = QuerySet::new()
            .add("author", async move {
                match author_id {
                    Some(id) => state.authors.find_by_id(&id).await,
                    None => Ok(None),
                }
            })
            .add("genres", state.genres.find_many(&genre_ids))
            .run()
            .await?;
        let author: Option<Author> = results.take("author")?;
        let genres: Vec<Genre> = results.take("genres")?;

        if author.is_none() {
            errors.push("author", "Author not found.");
        }
        for raw in &self.genre {
            let known = ObjectId::parse(raw).is_ok_and(|id| genres.iter().any(|g| g.id == id));
            if !known {
                errors.push("genre", "Genre not found.");
            }
        }

        Ok(match author {
            Some(author) if errors.is_empty() => Some(Book {
                id: ObjectId::new(),
                title: escape_html(&self.title),
                author: author.id,
                summary: escape_html(&self.summary),
                isbn: escape_html(&self.isbn),
                genre: genre_ids,
            }),
            _ => None,
        })
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: unescape_html(&book.title),
            author: book.author.to_string(),
            summary: unescape_html(&book.summary),
            isbn: unescape_html(&book.isbn),
            genre: book.genre.iter().map(ToString::to_string).collect(),
        }
    }
}
