use axum::extract::State;
use catalog_core::{HttpError, QuerySet, View};
use catalog_data::Repository;
use serde_json::{json, Map};

use crate::models::{BookInstance, BookStatus};
use crate::state::AppState;

const COUNTS: [&str; 5] = [
    "book_count",
    "book_instance_count",
    "book_instance_available_count",
    "author_count",
    "genre_count",
];

/// Home page: record counts across the catalog.
pub async fn index(State(state): State<AppState>) -> Result<View, HttpError> {
    let mut results = QuerySet::new()
        .add("book_count", state.books.count())
        .add("book_instance_count", state.book_instances.count())
        .add(
            "book_instance_available_count",
            state
                .book_instances
                .count_where(|bi: &BookInstance| bi.status == BookStatus::Available),
        )
        .add("author_count", state.authors.count())
        .add("genre_count", state.genres.count())
        .run()
        .await?;

    let mut data = Map::new();
    for name in COUNTS {
        data.insert(name.to_string(), json!(results.take::<u64>(name)?));
    }

    Ok(View::new(
        "index",
        json!({ "title": "Local Library Home", "data": data }),
    ))
}
