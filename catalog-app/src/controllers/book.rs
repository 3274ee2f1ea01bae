use axum::extract::{Path, State};
use catalog_core::{FormData, HttpError, Outcome, QueryResults, QuerySet, ValidationErrors, View};
use catalog_data::{DataError, ObjectId, Repository};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use super::parse_id;
use crate::forms::{BookForm, Submission};
use crate::models::{Author, Book, BookInstance, Genre, GenreView, CATALOG_ROOT};
use crate::populate;
use crate::state::AppState;

fn list_url() -> String {
    format!("{CATALOG_ROOT}/books")
}

fn not_found() -> HttpError {
    HttpError::NotFound("Book not found".into())
}

/// A genre checkbox on the book form.
#[derive(Serialize)]
struct GenreOption {
    #[serde(flatten)]
    genre: GenreView,
    checked: bool,
}

/// Reference lists every book form needs.
fn choice_queries(state: &AppState) -> QuerySet<'_, DataError> {
    QuerySet::new()
        .add("authors", state.authors.find_all())
        .add("genres", state.genres.find_all())
}

fn form_view(
    title: &str,
    book: &BookForm,
    errors: &ValidationErrors,
    results: &mut QueryResults,
) -> Result<View, HttpError> {
    let mut authors: Vec<Author> = results.take("authors")?;
    authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
    let mut genres: Vec<Genre> = results.take("genres")?;
    genres.sort_by(|a, b| a.name.cmp(&b.name));

    let authors: Vec<_> = authors.iter().map(Author::view).collect();
    let genres: Vec<_> = genres
        .iter()
        .map(|g| GenreOption {
            checked: book.has_genre(&g.id),
            genre: g.view(),
        })
        .collect();

    Ok(View::new(
        "book_form",
        json!({
            "title": title,
            "authors": authors,
            "genres": genres,
            "book": book,
            "errors": errors,
        }),
    ))
}

/// Book plus the copies that block its deletion.
fn book_with_instances<'a>(state: &'a AppState, id: &'a ObjectId) -> QuerySet<'a, DataError> {
    let book_id = *id;
    QuerySet::new()
        .add("book", state.books.find_by_id(id))
        .add(
            "book_instances",
            state
                .book_instances
                .find_where(move |bi: &BookInstance| bi.book == book_id),
        )
}

async fn delete_view(
    state: &AppState,
    book: Book,
    instances: Vec<BookInstance>,
) -> Result<View, HttpError> {
    let link = book.link();
    let book = populate::book(state, book).await?;
    let instances: Vec<_> = instances
        .iter()
        .map(|bi| bi.view(Some(link.clone())))
        .collect();
    Ok(View::new(
        "book_delete",
        json!({ "title": "Delete Book", "book": book, "book_instances": instances }),
    ))
}

pub async fn list(State(state): State<AppState>) -> Result<View, HttpError> {
    let mut books = state.books.find_all().await?;
    books.sort_by(|a, b| a.title.cmp(&b.title));
    let books = populate::books(&state, books).await?;
    Ok(View::new(
        "book_list",
        json!({ "title": "Book List", "book_list": books }),
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let mut results = book_with_instances(&state, &id).run().await?;
    let book: Book = results.take::<Option<Book>>("book")?.ok_or_else(not_found)?;
    let instances: Vec<BookInstance> = results.take("book_instances")?;

    let link = book.link();
    let book = populate::book(&state, book).await?;
    let instances: Vec<_> = instances
        .iter()
        .map(|bi| bi.view(Some(link.clone())))
        .collect();
    Ok(View::new(
        "book_detail",
        json!({ "title": book.title, "book": book, "book_instances": instances }),
    ))
}

pub async fn create_form(State(state): State<AppState>) -> Result<View, HttpError> {
    let mut results = choice_queries(&state).run().await?;
    form_view(
        "Create Book",
        &BookForm::default(),
        &ValidationErrors::new(),
        &mut results,
    )
}

pub async fn create_submit(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Outcome, HttpError> {
    let Submission { values, mut errors } = BookForm::parse(&form);
    let book = if errors.is_empty() {
        values.resolve(&state, &mut errors).await?
    } else {
        None
    };

    match book {
        Some(book) => {
            let book = state.books.insert(&book).await?;
            info!(id = %book.id, title = %book.title, "book created");
            Ok(Outcome::redirect(book.url()))
        }
        None => {
            debug!(errors = errors.len(), "book form rejected");
            let mut results = choice_queries(&state).run().await?;
            Ok(form_view("Create Book", &values, &errors, &mut results)?.into())
        }
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let mut results = book_with_instances(&state, &id).run().await?;
    let Some(book) = results.take::<Option<Book>>("book")? else {
        return Ok(Outcome::redirect(list_url()));
    };
    let instances: Vec<BookInstance> = results.take("book_instances")?;
    Ok(delete_view(&state, book, instances).await?.into())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let mut results = book_with_instances(&state, &id).run().await?;
    let Some(book) = results.take::<Option<Book>>("book")? else {
        return Ok(Outcome::redirect(list_url()));
    };
    let instances: Vec<BookInstance> = results.take("book_instances")?;

    if !instances.is_empty() {
        debug!(%id, copies = instances.len(), "book delete blocked by copies");
        return Ok(delete_view(&state, book, instances).await?.into());
    }

    state.books.delete(&id).await?;
    info!(%id, "book deleted");
    Ok(Outcome::redirect(list_url()))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let mut results = choice_queries(&state)
        .add("book", state.books.find_by_id(&id))
        .run()
        .await?;
    let book: Book = results.take::<Option<Book>>("book")?.ok_or_else(not_found)?;
    form_view(
        "Update Book",
        &BookForm::from(&book),
        &ValidationErrors::new(),
        &mut results,
    )
}

pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormData,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let Submission { values, mut errors } = BookForm::parse(&form);
    let book = if errors.is_empty() {
        values.resolve(&state, &mut errors).await?
    } else {
        None
    };

    match book {
        Some(book) => {
            let book = state.books.update(&id, book).await?.ok_or_else(not_found)?;
            info!(%id, title = %book.title, "book updated");
            Ok(Outcome::redirect(book.url()))
        }
        None => {
            let mut results = choice_queries(&state)
                .add("book", state.books.find_by_id(&id))
                .run()
                .await?;
            results.take::<Option<Book>>("book")?.ok_or_else(not_found)?;
            Ok(form_view("Update Book", &values, &errors, &mut results)?.into())
        }
    }
}
