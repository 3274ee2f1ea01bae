use axum::extract::{Path, State};
use catalog_core::{FormData, HttpError, Outcome, QuerySet, ValidationErrors, View};
use catalog_data::{DataError, ObjectId, Repository};
use serde_json::json;
use tracing::{debug, info};

use super::parse_id;
use crate::forms::{AuthorForm, Submission};
use crate::models::{Author, Book, BookLink, CATALOG_ROOT};
use crate::state::AppState;

fn list_url() -> String {
    format!("{CATALOG_ROOT}/authors")
}

fn not_found() -> HttpError {
    HttpError::NotFound("Author not found".into())
}

fn form_view(title: &str, author: &AuthorForm, errors: &ValidationErrors) -> View {
    View::new(
        "author_form",
        json!({ "title": title, "author": author, "errors": errors }),
    )
}

/// Author plus the books that block its deletion.
fn author_with_books<'a>(state: &'a AppState, id: &'a ObjectId) -> QuerySet<'a, DataError> {
    let author_id = *id;
    QuerySet::new()
        .add("author", state.authors.find_by_id(id))
        .add(
            "author_books",
            state.books.find_where(move |b: &Book| b.author == author_id),
        )
}

fn links(books: &[Book]) -> Vec<BookLink> {
    books.iter().map(Book::link).collect()
}

fn delete_view(author: &Author, books: &[Book]) -> View {
    View::new(
        "author_delete",
        json!({
            "title": "Delete Author",
            "author": author.view(),
            "author_books": links(books),
        }),
    )
}

pub async fn list(State(state): State<AppState>) -> Result<View, HttpError> {
    let mut authors = state.authors.find_all().await?;
    authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
    let authors: Vec<_> = authors.iter().map(Author::view).collect();
    Ok(View::new(
        "author_list",
        json!({ "title": "Author List", "author_list": authors }),
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let mut results = author_with_books(&state, &id).run().await?;
    let author: Author = results.take::<Option<Author>>("author")?.ok_or_else(not_found)?;
    let books: Vec<Book> = results.take("author_books")?;
    Ok(View::new(
        "author_detail",
        json!({
            "title": "Author Detail",
            "author": author.view(),
            "author_books": links(&books),
        }),
    ))
}

pub async fn create_form() -> View {
    form_view("Create Author", &AuthorForm::default(), &ValidationErrors::new())
}

pub async fn create_submit(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Outcome, HttpError> {
    let submission = AuthorForm::parse(&form);
    if !submission.is_valid() {
        debug!(errors = submission.errors.len(), "author form rejected");
        return Ok(form_view("Create Author", &submission.values, &submission.errors).into());
    }

    let author = state.authors.insert(&submission.values.into_author()).await?;
    info!(id = %author.id, name = %author.name(), "author created");
    Ok(Outcome::redirect(author.url()))
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let mut results = author_with_books(&state, &id).run().await?;
    let Some(author) = results.take::<Option<Author>>("author")? else {
        return Ok(Outcome::redirect(list_url()));
    };
    let books: Vec<Book> = results.take("author_books")?;
    Ok(delete_view(&author, &books).into())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let mut results = author_with_books(&state, &id).run().await?;
    let Some(author) = results.take::<Option<Author>>("author")? else {
        return Ok(Outcome::redirect(list_url()));
    };
    let books: Vec<Book> = results.take("author_books")?;

    if !books.is_empty() {
        debug!(%id, books = books.len(), "author delete blocked by books");
        return Ok(delete_view(&author, &books).into());
    }

    state.authors.delete(&id).await?;
    info!(%id, "author deleted");
    Ok(Outcome::redirect(list_url()))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let author = state.authors.find_by_id(&id).await?.ok_or_else(not_found)?;
    Ok(form_view(
        "Update Author",
        &AuthorForm::from(&author),
        &ValidationErrors::new(),
    ))
}

pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormData,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let Submission { values, errors } = AuthorForm::parse(&form);
    if !errors.is_empty() {
        state.authors.find_by_id(&id).await?.ok_or_else(not_found)?;
        return Ok(form_view("Update Author", &values, &errors).into());
    }

    let author = state
        .authors
        .update(&id, values.into_author())
        .await?
        .ok_or_else(not_found)?;
    info!(%id, name = %author.name(), "author updated");
    Ok(Outcome::redirect(author.url()))
}
