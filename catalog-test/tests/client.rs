use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::Router;
use catalog_test::{resolve_path, TestApp};
use serde_json::json;

fn echo_app() -> Router {
    Router::new()
        .route(
            "/echo",
            post(|body: String| async move { axum::Json(json!({ "body": body })) }),
        )
        .route("/moved", get(|| async { Redirect::to("/target") }))
}

#[tokio::test]
async fn form_bodies_are_url_encoded_with_repeated_keys() {
    let app = TestApp::new(echo_app());
    app.post("/echo")
        .form(&[("title", "War & Peace"), ("genre", "a"), ("genre", "b")])
        .send()
        .await
        .assert_ok()
        .assert_json_path("body", "title=War+%26+Peace&genre=a&genre=b");
}

#[tokio::test]
async fn redirects_expose_their_location() {
    let app = TestApp::new(echo_app());
    let resp = app.get("/moved").send().await.assert_redirect("/target");
    assert_eq!(resp.location(), Some("/target"));
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = TestApp::new(echo_app());
    app.get("/nowhere")
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test]
fn paths_resolve_fields_indices_and_lengths() {
    let root = json!({
        "errors": [{ "field": "title", "message": "Title must not be empty." }],
        "book": { "genre": ["a", "b"] }
    });
    assert_eq!(resolve_path(&root, "errors[0].field"), json!("title"));
    assert_eq!(resolve_path(&root, "book.genre.len()"), json!(2));
    assert_eq!(resolve_path(&root, "book.genre[1]"), json!("b"));
    assert_eq!(resolve_path(&root, "book.missing"), json!(null));
}
