//! Reference resolution for display.
//!
//! Stored documents hold bare ids; these helpers batch-load the referenced
//! documents and build the view types templates consume.

use std::collections::HashMap;

use catalog_core::{HttpError, QuerySet};
use catalog_data::{ObjectId, Repository};

use crate::models::{Author, Book, BookInstance, BookInstanceView, BookLink, BookView, Genre};
use crate::state::AppState;

pub(crate) fn unique_ids(ids: impl IntoIterator<Item = ObjectId>) -> Vec<ObjectId> {
    let mut out: Vec<ObjectId> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Resolve author and genre references of each book, keeping input order.
pub async fn books(state: &AppState, books: Vec<Book>) -> Result<Vec<BookView>, HttpError> {
    let author_ids = unique_ids(books.iter().map(|b| b.author));
    let genre_ids = unique_ids(books.iter().flat_map(|b| b.genre.iter().copied()));

    let mut results = QuerySet::new()
        .add("authors", state.authors.find_many(&author_ids))
        .add("genres", state.genres.find_many(&genre_ids))
        .run()
        .await?;
    let authors: HashMap<ObjectId, Author> = results
        .take::<Vec<Author>>("authors")?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();
    let genres: HashMap<ObjectId, Genre> = results
        .take::<Vec<Genre>>("genres")?
        .into_iter()
        .map(|g| (g.id, g))
        .collect();

    Ok(books
        .into_iter()
        .map(|book| BookView {
            id: book.id,
            url: book.url(),
            author: authors.get(&book.author).map(Author::view),
            genre: book
                .genre
                .iter()
                .filter_map(|id| genres.get(id))
                .map(Genre::view)
                .collect(),
            title: book.title,
            summary: book.summary,
            isbn: book.isbn,
        })
        .collect())
}

pub async fn book(state: &AppState, book: Book) -> Result<BookView, HttpError> {
    let mut views = books(state, vec![book]).await?;
    views
        .pop()
        .ok_or_else(|| HttpError::Internal("book view was not built".into()))
}

/// Resolve the book reference of each copy, keeping input order.
pub async fn book_instances(
    state: &AppState,
    instances: Vec<BookInstance>,
) -> Result<Vec<BookInstanceView>, HttpError> {
    let book_ids = unique_ids(instances.iter().map(|bi| bi.book));
    let books: HashMap<ObjectId, BookLink> = state
        .books
        .find_many(&book_ids)
        .await?
        .iter()
        .map(|b| (b.id, b.link()))
        .collect();

    Ok(instances
        .iter()
        .map(|bi| bi.view(books.get(&bi.book).cloned()))
        .collect())
}

pub async fn book_instance(
    state: &AppState,
    instance: BookInstance,
) -> Result<BookInstanceView, HttpError> {
    let mut views = book_instances(state, vec![instance]).await?;
    views
        .pop()
        .ok_or_else(|| HttpError::Internal("book instance view was not built".into()))
}
