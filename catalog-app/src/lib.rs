//! Local library catalog: books, authors, genres and physical copies.
//!
//! [`router`] assembles every page under `/catalog` together with the
//! health endpoints. Pages render as [`View`](catalog_core::View) payloads
//! and successful writes redirect to the affected record.

pub mod controllers;
pub mod forms;
pub mod models;
pub mod populate;
pub mod settings;
pub mod state;

use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use catalog_core::{catch_panic_layer, default_trace, HealthBuilder};
use catalog_data::StoreHealth;

use controllers::{author, book, book_instance, catalog, genre};
use models::CATALOG_ROOT;
pub use settings::Settings;
pub use state::AppState;

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        // Books
        .route("/books", get(book::list))
        .route("/book/create", get(book::create_form).post(book::create_submit))
        .route("/book/{id}", get(book::detail))
        .route(
            "/book/{id}/delete",
            get(book::delete_confirm).post(book::delete_submit),
        )
        .route(
            "/book/{id}/update",
            get(book::update_form).post(book::update_submit),
        )
        // Authors
        .route("/authors", get(author::list))
        .route(
            "/author/create",
            get(author::create_form).post(author::create_submit),
        )
        .route("/author/{id}", get(author::detail))
        .route(
            "/author/{id}/delete",
            get(author::delete_confirm).post(author::delete_submit),
        )
        .route(
            "/author/{id}/update",
            get(author::update_form).post(author::update_submit),
        )
        // Genres
        .route("/genres", get(genre::list))
        .route(
            "/genre/create",
            get(genre::create_form).post(genre::create_submit),
        )
        .route("/genre/{id}", get(genre::detail))
        .route(
            "/genre/{id}/delete",
            get(genre::delete_confirm).post(genre::delete_submit),
        )
        .route(
            "/genre/{id}/update",
            get(genre::update_form).post(genre::update_submit),
        )
        // Copies
        .route("/bookinstances", get(book_instance::list))
        .route(
            "/bookinstance/create",
            get(book_instance::create_form).post(book_instance::create_submit),
        )
        .route("/bookinstance/{id}", get(book_instance::detail))
        .route(
            "/bookinstance/{id}/delete",
            get(book_instance::delete_confirm).post(book_instance::delete_submit),
        )
        .route(
            "/bookinstance/{id}/update",
            get(book_instance::update_form).post(book_instance::update_submit),
        )
}

/// The full application: catalog pages, `/` redirect, health checks,
/// request tracing and panic recovery.
pub fn router(state: AppState) -> Router {
    let health = HealthBuilder::new().check(StoreHealth::new(state.store.clone()));

    Router::new()
        .route("/", get(|| async { Redirect::to(CATALOG_ROOT) }))
        .nest(CATALOG_ROOT, catalog_routes())
        .merge(health.into_router::<AppState>())
        .layer(catch_panic_layer())
        .layer(default_trace())
        .with_state(state)
}
