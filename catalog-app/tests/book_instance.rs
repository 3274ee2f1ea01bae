mod common;

use catalog_app::models::BookStatus;
use catalog_data::{ObjectId, Repository};
use common::{date, fixture, seed_author, seed_book, seed_instance};

#[tokio::test]
async fn create_defaults_status_and_due_date() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Frank", "Herbert").await;
    let book = seed_book(&fx.state, "Dune", &author, &[]).await;
    let book_id = book.id.to_string();

    let resp = fx
        .app
        .post("/catalog/bookinstance/create")
        .form(&[
            ("book", book_id.as_str()),
            ("imprint", " Ace, 1990 "),
            ("status", ""),
            ("due_back", ""),
        ])
        .send()
        .await;

    let copies = fx.state.book_instances.find_all().await.unwrap();
    assert_eq!(copies.len(), 1);
    let copy = &copies[0];
    resp.assert_redirect(&copy.url());
    assert_eq!(copy.book, book.id);
    assert_eq!(copy.imprint, "Ace, 1990");
    assert_eq!(copy.status, BookStatus::Maintenance);
    assert_eq!(copy.due_back, chrono::Local::now().date_naive());
}

#[tokio::test]
async fn create_keeps_explicit_status_and_date() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Frank", "Herbert").await;
    let book = seed_book(&fx.state, "Dune", &author, &[]).await;
    let book_id = book.id.to_string();

    fx.app
        .post("/catalog/bookinstance/create")
        .form(&[
            ("book", book_id.as_str()),
            ("imprint", "Ace, 1990"),
            ("status", "Loaned"),
            ("due_back", "2026-11-02"),
        ])
        .send()
        .await
        .assert_status(axum::http::StatusCode::SEE_OTHER);

    let copy = &fx.state.book_instances.find_all().await.unwrap()[0];
    assert_eq!(copy.status, BookStatus::Loaned);
    assert_eq!(copy.due_back, date(2026, 11, 2));
}

#[tokio::test]
async fn missing_fields_rerender_with_choices() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Frank", "Herbert").await;
    seed_book(&fx.state, "Dune", &author, &[]).await;

    fx.app
        .post("/catalog/bookinstance/create")
        .form(&[("status", "Lost"), ("due_back", "someday")])
        .send()
        .await
        .assert_view("bookinstance_form")
        .assert_json_path("errors.len()", 4)
        .assert_field_error("book", "Book must be specified.")
        .assert_field_error("imprint", "Imprint must be specified.")
        .assert_field_error("status", "Invalid status.")
        .assert_field_error("due_back", "Invalid date.")
        .assert_json_path("bookinstance.status", "Lost")
        .assert_json_path("book_list.len()", 1)
        .assert_json_path("book_list[0].title", "Dune")
        .assert_json_path("statuses.len()", 4)
        .assert_json_path("statuses[0]", "Available");

    assert_eq!(fx.state.book_instances.count().await.unwrap(), 0);
}

#[tokio::test]
async fn dangling_book_is_a_validation_failure() {
    let fx = fixture();
    let ghost = ObjectId::new().to_string();

    fx.app
        .post("/catalog/bookinstance/create")
        .form(&[("book", ghost.as_str()), ("imprint", "Ace")])
        .send()
        .await
        .assert_view("bookinstance_form")
        .assert_field_error("book", "Book not found.")
        .assert_json_path("selected_book", ghost.as_str());

    assert_eq!(fx.state.book_instances.count().await.unwrap(), 0);
}

#[tokio::test]
async fn detail_and_list_resolve_the_book() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Frank", "Herbert").await;
    let book = seed_book(&fx.state, "Dune", &author, &[]).await;
    let copy = seed_instance(&fx.state, &book, BookStatus::Reserved).await;

    fx.app
        .get(&copy.url())
        .send()
        .await
        .assert_view("bookinstance_detail")
        .assert_json_path("title", "Copy: Dune")
        .assert_json_path("bookinstance.book.title", "Dune")
        .assert_json_path("bookinstance.book.url", book.url())
        .assert_json_path("bookinstance.due_back_yyyy_mm_dd", "2026-01-15");

    fx.app
        .get("/catalog/bookinstances")
        .send()
        .await
        .assert_view("bookinstance_list")
        .assert_json_path("bookinstance_list.len()", 1)
        .assert_json_path("bookinstance_list[0].status", "Reserved");
}

#[tokio::test]
async fn delete_removes_and_tolerates_absent_copies() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Frank", "Herbert").await;
    let book = seed_book(&fx.state, "Dune", &author, &[]).await;
    let copy = seed_instance(&fx.state, &book, BookStatus::Available).await;
    let delete_url = format!("{}/delete", copy.url());

    fx.app
        .get(&delete_url)
        .send()
        .await
        .assert_view("bookinstance_delete")
        .assert_json_path("bookinstance._id", copy.id.to_string());

    fx.app
        .post(&delete_url)
        .send()
        .await
        .assert_redirect("/catalog/bookinstances");
    assert_eq!(fx.state.book_instances.count().await.unwrap(), 0);

    fx.app
        .get(&delete_url)
        .send()
        .await
        .assert_redirect("/catalog/bookinstances");
    fx.app
        .post(&delete_url)
        .send()
        .await
        .assert_redirect("/catalog/bookinstances");
}

#[tokio::test]
async fn update_uses_the_path_identifier() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Frank", "Herbert").await;
    let book = seed_book(&fx.state, "Dune", &author, &[]).await;
    let copy = seed_instance(&fx.state, &book, BookStatus::Maintenance).await;
    let book_id = book.id.to_string();
    let update_url = format!("{}/update", copy.url());

    fx.app
        .get(&update_url)
        .send()
        .await
        .assert_view("bookinstance_form")
        .assert_json_path("bookinstance.status", "Maintenance")
        .assert_json_path("bookinstance.due_back", "2026-01-15")
        .assert_json_path("selected_book", book_id.as_str());

    fx.app
        .post(&update_url)
        .form(&[
            ("book", book_id.as_str()),
            ("imprint", "Gollancz, 2011."),
            ("status", "Available"),
            ("due_back", "2026-02-01"),
        ])
        .send()
        .await
        .assert_redirect(&copy.url());

    let stored = fx.state.book_instances.find_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, copy.id);
    assert_eq!(stored[0].status, BookStatus::Available);
    assert_eq!(stored[0].due_back, date(2026, 2, 1));

    fx.app
        .get(&format!("/catalog/bookinstance/{}/update", ObjectId::new()))
        .send()
        .await
        .assert_not_found();
}
