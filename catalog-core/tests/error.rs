use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_core::{ConfigError, HttpError, Outcome, View};
use http_body_util::BodyExt;

async fn body_json(resp: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn not_found_renders_error_view() {
    let (status, body) = body_json(HttpError::NotFound("Book not found".into()).into_response()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["template"], "error");
    assert_eq!(body["message"], "Book not found");
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn bad_request_and_internal_statuses() {
    let (status, body) = body_json(HttpError::BadRequest("bad id".into()).into_response()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "bad id");

    let (status, body) = body_json(HttpError::Internal("store down".into()).into_response()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["title"], "Internal Server Error");
}

#[test]
fn display_formatting() {
    assert_eq!(HttpError::NotFound("x".into()).to_string(), "Not Found: x");
    assert_eq!(HttpError::BadRequest("y".into()).to_string(), "Bad Request: y");
    assert_eq!(HttpError::Internal("z".into()).to_string(), "Internal Error: z");
}

#[test]
fn config_errors_map_to_internal() {
    let err: HttpError = ConfigError::NotFound("server.port".into()).into();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message(), "Config key not found: server.port");
}

#[tokio::test]
async fn view_renders_template_and_context() {
    let view = View::new(
        "book_list",
        serde_json::json!({ "title": "Book List", "book_list": [] }),
    );
    assert_eq!(view.template(), "book_list");
    let (status, body) = body_json(view.into_response()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "book_list");
    assert_eq!(body["title"], "Book List");
}

#[test]
fn view_wraps_non_object_context() {
    let view = View::new("index", serde_json::json!(5)).insert("title", "Home".into());
    assert_eq!(view.context()["data"], 5);
    assert_eq!(view.context()["title"], "Home");
}

#[tokio::test]
async fn redirect_outcome_is_see_other() {
    let resp = Outcome::redirect("/catalog/books").into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()["location"], "/catalog/books");
}
