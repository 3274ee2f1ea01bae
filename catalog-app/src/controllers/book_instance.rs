use axum::extract::{Path, State};
use catalog_core::{FormData, HttpError, Outcome, QueryResults, QuerySet, ValidationErrors, View};
use catalog_data::{DataError, Repository};
use serde_json::json;
use tracing::{debug, info};

use super::parse_id;
use crate::forms::{BookInstanceForm, Submission};
use crate::models::{Book, BookInstance, BookInstanceView, BookStatus, CATALOG_ROOT};
use crate::populate;
use crate::state::AppState;

fn list_url() -> String {
    format!("{CATALOG_ROOT}/bookinstances")
}

fn not_found() -> HttpError {
    HttpError::NotFound("Book copy not found".into())
}

fn choice_queries(state: &AppState) -> QuerySet<'_, DataError> {
    QuerySet::new().add("book_list", state.books.find_all())
}

fn form_view(
    title: &str,
    instance: &BookInstanceForm,
    errors: &ValidationErrors,
    results: &mut QueryResults,
) -> Result<View, HttpError> {
    let mut books: Vec<Book> = results.take("book_list")?;
    books.sort_by(|a, b| a.title.cmp(&b.title));
    let book_list: Vec<_> = books.iter().map(Book::link).collect();

    Ok(View::new(
        "bookinstance_form",
        json!({
            "title": title,
            "book_list": book_list,
            "selected_book": instance.book,
            "statuses": BookStatus::NAMES,
            "bookinstance": instance,
            "errors": errors,
        }),
    ))
}

fn copy_title(view: &BookInstanceView) -> String {
    match &view.book {
        Some(book) => format!("Copy: {}", book.title),
        None => format!("Copy: {}", view.imprint),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<View, HttpError> {
    let instances = state.book_instances.find_all().await?;
    let instances = populate::book_instances(&state, instances).await?;
    Ok(View::new(
        "bookinstance_list",
        json!({ "title": "Book Instance List", "bookinstance_list": instances }),
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let instance = state
        .book_instances
        .find_by_id(&id)
        .await?
        .ok_or_else(not_found)?;
    let instance = populate::book_instance(&state, instance).await?;
    Ok(View::new(
        "bookinstance_detail",
        json!({ "title": copy_title(&instance), "bookinstance": instance }),
    ))
}

pub async fn create_form(State(state): State<AppState>) -> Result<View, HttpError> {
    let mut results = choice_queries(&state).run().await?;
    form_view(
        "Create BookInstance",
        &BookInstanceForm::default(),
        &ValidationErrors::new(),
        &mut results,
    )
}

pub async fn create_submit(
    State(state): State<AppState>,
    form: FormData,
) -> Result<Outcome, HttpError> {
    let Submission { values, mut errors } = BookInstanceForm::parse(&form);
    let instance = if errors.is_empty() {
        values.resolve(&state, &mut errors).await?
    } else {
        None
    };

    match instance {
        Some(instance) => {
            let instance = state.book_instances.insert(&instance).await?;
            info!(id = %instance.id, book = %instance.book, "book copy created");
            Ok(Outcome::redirect(instance.url()))
        }
        None => {
            debug!(errors = errors.len(), "book copy form rejected");
            let mut results = choice_queries(&state).run().await?;
            Ok(form_view("Create BookInstance", &values, &errors, &mut results)?.into())
        }
    }
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    let Some(instance) = state.book_instances.find_by_id(&id).await? else {
        return Ok(Outcome::redirect(list_url()));
    };
    let instance = populate::book_instance(&state, instance).await?;
    Ok(View::new(
        "bookinstance_delete",
        json!({ "title": "Delete BookInstance", "bookinstance": instance }),
    )
    .into())
}

/// Copies block nothing, so a submit always deletes. Deleting an absent
/// copy is a no-op.
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Outcome, HttpError> {
    let id = parse_id(&id)?;
    if state.book_instances.delete(&id).await? {
        info!(%id, "book copy deleted");
    }
    Ok(Outcome::redirect(list_url()))
}

pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<View, HttpError> {
    let id = parse_id(&id)?;
    let mut results = choice_queries(&state)
        .add("bookinstance", state.book_instances.find_by_id(&id))
        .run()
        .await?;
    let instance: BookInstance = results
        .take::<Option<BookInstance>>("bookinstance")?
        .ok_or_else(not_found)?;
    form_view(
        "Update BookInstance",
        &BookInstanceForm::from(&instance),
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
    let Submission { values, mut errors } = BookInstanceForm::parse(&form);
    let instance = if errors.is_empty() {
        values.resolve(&state, &mut errors).await?
    } else {
        None
    };

    match instance {
        Some(instance) => {
            let instance = state
                .book_instances
                .update(&id, instance)
                .await?
                .ok_or_else(not_found)?;
            info!(%id, status = %instance.status, "book copy updated");
            Ok(Outcome::redirect(instance.url()))
        }
        None => {
            let mut results = choice_queries(&state)
                .add("bookinstance", state.book_instances.find_by_id(&id))
                .run()
                .await?;
            results
                .take::<Option<BookInstance>>("bookinstance")?
                .ok_or_else(not_found)?;
            Ok(form_view("Update BookInstance", &values, &errors, &mut results)?.into())
        }
    }
}
