use catalog_data::{Collection, DocumentStore};

use crate::models::{Author, Book, BookInstance, Genre};

/// Shared handler state: the store plus a typed handle per collection.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub authors: Collection<Author>,
    pub genres: Collection<Genre>,
    pub books: Collection<Book>,
    pub book_instances: Collection<BookInstance>,
}

impl AppState {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            authors: store.collection(),
            genres: store.collection(),
            books: store.collection(),
            book_instances: store.collection(),
            store,
        }
    }
}
