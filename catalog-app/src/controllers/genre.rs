use axum::extract::{Path, State};
use catalog_core::{FormData, HttpError, Outcome, QuerySet, ValidationErrors, View};
use catalog_data::{DataError, ObjectId, Repository};
use serde_json::json;
use tracing::{debug, info};

use super::parse_id;
use crate::forms::{GenreForm, Submission};
use crate::models::{Book, BookLink, Genre, CATALOG_ROOT};
use crate::state::AppState;

fn list_url() -> String {
    format!("{CATALOG_ROOT}/genres")
}

fn not_found() -> HttpError {
    HttpError::NotFound("Genre not found".into())
}

fn form_view(title: &str, genre: &GenreForm, errors: &ValidationErrors) -> View {
    View::new(
        "genre_form",
        json!({ "title": title, "genre": genre, "errors": errors }),
    )
}

fn genre_with_books<'a>(state: &'a AppState, id: &'a ObjectId) -> QuerySet<'a, DataError> {
    let genre_id = *id;
    QuerySet::new()
        .add("genre", state.genres.find_by_id(id))
        .add(
            "genre_books",
            state
                .books
                .find_where(move |b: &Book| b.genre.contains(&genre_id)),
        )
}

fn links(books: &[Book]) -> Vec<BookLink> {
    books.iter().map(Book::link).collect()
}

fn delete_view(genre: &Genre, books: &[Book]) -> View {
    View::new(
        "genre_delete",
        json!({
            "title": "Delete Genre",
            "genre": genre.view(),
            "genre_books": links(books),
        }),
    )
}

pub async fn list(State(state): State<AppState>) -> Result<View, HttpError> {
    let mut genres = state.genres.find_all().await?;
    genres.sort_by(|a, b| a.name.cmp(&b.name));
    let genres: Vec<_> = genres.iter().map(Genre::view).collect();
    Ok(View::new(
        "genre_list",
        json!({ "title": "Genre List", "genre_list": genres }),
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let mut results = genre_with_books(&state, &id).run().await?;
    let genre: Genre = results.take::<Option<Genre>>("genre")?.ok_or_else(not_found)?;
    let books: Vec<Book> = results.take("genre_books")?;
    Ok(View::new(
        "genre_detail",
        json!({
            "title": "Genre Detail",
            "genre": genre.view(),
            "genre_books": links(&books),
        }),
    ))
}

pub async fn create_form() -> View {
    form_view("Create Genre", &GenreForm::default(), &ValidationErrors::new())
}

pub async fn create_submit(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Outcome, HttpError> {
    let submission = GenreForm::parse(&form);
    if !submission.is_valid() {
        debug!(errors = submission.errors.len(), "genre form rejected");
        return Ok(form_view("Create Genre", &submission.values, &submission.errors).into());
    }

    let genre = submission.values.into_genre();
    let wanted = genre.name.to_lowercase();
    let existing = state
        .genres
        .find_where(move |g: &Genre| g.name.to_lowercase() == wanted)
        .await?;
    if let Some(found) = existing.first() {
        debug!(id = %found.id, "genre already exists");
        return Ok(Outcome::redirect(found.url()));
    }

    let genre = state.genres.insert(&genre).await?;
    info!(id = %genre.id, name = %genre.name, "genre created");
    Ok(Outcome::redirect(genre.url()))
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let mut results = genre_with_books(&state, &id).run().await?;
    let Some(genre) = results.take::<Option<Genre>>("genre")? else {
        return Ok(Outcome::redirect(list_url()));
    };
    let books: Vec<Book> = results.take("genre_books")?;
    Ok(delete_view(&genre, &books).into())
}

pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let mut results = genre_with_books(&state, &id).run().await?;
    let Some(genre) = results.take::<Option<Genre>>("genre")? else {
        return Ok(Outcome::redirect(list_url()));
    };
    let books: Vec<Book> = results.take("genre_books")?;

    if !books.is_empty() {
        debug!(%id, books = books.len(), "genre delete blocked by books");
        return Ok(delete_view(&genre, &books).into());
    }

    state.genres.delete(&id).await?;
    info!(%id, "genre deleted");
    Ok(Outcome::redirect(list_url()))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let genre = state.genres.find_by_id(&id).await?.ok_or_else(not_found)?;
    Ok(form_view(
        "Update Genre",
        &GenreForm::from(&genre),
        &ValidationErrors::new(),
    ))
}

pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: FormData,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let Submission { values, errors } = GenreForm::parse(&form);
    if !errors.is_empty() {
        state.genres.find_by_id(&id).await?.ok_or_else(not_found)?;
        return Ok(form_view("Update Genre", &values, &errors).into());
    }

    let genre = state
        .genres
        .update(&id, values.into_genre())
        .await?
        .ok_or_else(not_found)?;
    info!(%id, name = %genre.name, "genre updated");
    Ok(Outcome::redirect(genre.url()))
}
