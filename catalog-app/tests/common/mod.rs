#![allow(dead_code)]

use catalog_app::models::{Author, Book, BookInstance, BookStatus, Genre};
use catalog_app::{router, AppState};
use catalog_data::{DocumentStore, ObjectId, Repository};
use catalog_test::TestApp;
use chrono::NaiveDate;

pub struct Fixture {
    pub app: TestApp,
    pub state: AppState,
}

pub fn fixture() -> Fixture {
    let state = AppState::new(DocumentStore::new());
    Fixture {
        app: TestApp::new(router(state.clone())),
        state,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn seed_author(state: &AppState, first: &str, family: &str) -> Author {
    let author = Author {
        id: ObjectId::new(),
        first_name: first.into(),
        family_name: family.into(),
        date_of_birth: None,
        date_of_death: None,
    };
    state.authors.insert(&author).await.unwrap()
}

pub async fn seed_genre(state: &AppState, name: &str) -> Genre {
    let genre = Genre {
        id: ObjectId::new(),
        name: name.into(),
    };
    state.genres.insert(&genre).await.unwrap()
}

pub async fn seed_book(state: &AppState, title: &str, author: &Author, genres: &[&Genre]) -> Book {
    let book = Book {
        id: ObjectId::new(),
        title: title.into(),
        author: author.id,
        summary: format!("Summary of {title}"),
        isbn: "9781473211896".into(),
        genre: genres.iter().map(|g| g.id).collect(),
    };
    state.books.insert(&book).await.unwrap()
}

pub async fn seed_instance(state: &AppState, book: &Book, status: BookStatus) -> BookInstance {
    let instance = BookInstance {
        id: ObjectId::new(),
        book: book.id,
        imprint: "Gollancz, 2011.".into(),
        status,
        due_back: date(2026, 1, 15),
    };
    state.book_instances.insert(&instance).await.unwrap()
}
