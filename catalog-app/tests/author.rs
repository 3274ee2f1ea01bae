mod common;

use catalog_data::{ObjectId, Repository};
use common::{date, fixture, seed_author, seed_book};

#[tokio::test]
async fn valid_author_is_created_with_dates() {
    let fx = fixture();

    let resp = fx
        .app
        .post("/catalog/author/create")
        .form(&[
            ("first_name", " Isaac "),
            ("family_name", "Asimov"),
            ("date_of_birth", "1920-01-02"),
            ("date_of_death", "1992-04-06"),
        ])
        .send()
        .await;

    let authors = fx.state.authors.find_all().await.unwrap();
    assert_eq!(authors.len(), 1);
    let author = &authors[0];
    resp.assert_redirect(&author.url());
    assert_eq!(author.first_name, "Isaac");
    assert_eq!(author.date_of_birth, Some(date(1920, 1, 2)));
    assert_eq!(author.date_of_death, Some(date(1992, 4, 6)));

    fx.app
        .get(&author.url())
        .send()
        .await
        .assert_view("author_detail")
        .assert_json_path("author.name", "Asimov, Isaac")
        .assert_json_path("author.lifespan", "January 2nd, 1920 - April 6th, 1992")
        .assert_json_path("author_books.len()", 0);
}

#[tokio::test]
async fn names_must_be_present_and_alphanumeric() {
    let fx = fixture();

    fx.app
        .post("/catalog/author/create")
        .form(&[("first_name", "J.R.R."), ("family_name", "   ")])
        .send()
        .await
        .assert_view("author_form")
        .assert_json_path("errors.len()", 2)
        .assert_field_error("first_name", "First name has non-alphanumeric characters.")
        .assert_field_error("family_name", "Family name must be specified.")
        .assert_json_path("author.first_name", "J.R.R.")
        .assert_json_path("author.family_name", "");

    assert_eq!(fx.state.authors.count().await.unwrap(), 0);
}

#[tokio::test]
async fn names_are_limited_to_one_hundred_characters() {
    let fx = fixture();
    let long = "a".repeat(101);

    fx.app
        .post("/catalog/author/create")
        .form(&[("first_name", long.as_str()), ("family_name", "Smith")])
        .send()
        .await
        .assert_view("author_form")
        .assert_field_error("first_name", "First name must not exceed 100 characters.");
}

#[tokio::test]
async fn multibyte_names_within_the_limit_are_stored() {
    let fx = fixture();
    let name = "é".repeat(80);

    let resp = fx
        .app
        .post("/catalog/author/create")
        .form(&[("first_name", name.as_str()), ("family_name", "Dupont")])
        .send()
        .await;

    let authors = fx.state.authors.find_all().await.unwrap();
    assert_eq!(authors.len(), 1);
    resp.assert_redirect(&authors[0].url());
    assert_eq!(authors[0].first_name, name);
}

#[tokio::test]
async fn invalid_dates_are_reported() {
    let fx = fixture();

    fx.app
        .post("/catalog/author/create")
        .form(&[
            ("first_name", "Jane"),
            ("family_name", "Austen"),
            ("date_of_birth", "16 December 1775"),
            ("date_of_death", "1817-13-40"),
        ])
        .send()
        .await
        .assert_view("author_form")
        .assert_field_error("date_of_birth", "Invalid date of birth")
        .assert_field_error("date_of_death", "Invalid date of death")
        .assert_json_path("author.date_of_birth", "16 December 1775");
}

#[tokio::test]
async fn list_is_sorted_by_family_name() {
    let fx = fixture();
    seed_author(&fx.state, "Ursula", "LeGuin").await;
    seed_author(&fx.state, "Isaac", "Asimov").await;
    seed_author(&fx.state, "Ben", "Bova").await;

    fx.app
        .get("/catalog/authors")
        .send()
        .await
        .assert_view("author_list")
        .assert_json_path("author_list[0].name", "Asimov, Isaac")
        .assert_json_path("author_list[1].name", "Bova, Ben")
        .assert_json_path("author_list[2].name", "LeGuin, Ursula")
        .assert_json_path("author_list[2].lifespan", "? - ");
}

#[tokio::test]
async fn delete_is_blocked_while_books_reference_the_author() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Frank", "Herbert").await;
    let book = seed_book(&fx.state, "Dune", &author, &[]).await;
    let delete_url = format!("{}/delete", author.url());

    fx.app
        .post(&delete_url)
        .send()
        .await
        .assert_view("author_delete")
        .assert_json_path("author_books.len()", 1)
        .assert_json_path("author_books[0].title", "Dune");
    assert!(fx.state.authors.find_by_id(&author.id).await.unwrap().is_some());

    fx.state.books.delete(&book.id).await.unwrap();
    fx.app
        .post(&delete_url)
        .send()
        .await
        .assert_redirect("/catalog/authors");
    assert_eq!(fx.state.authors.count().await.unwrap(), 0);
}

#[tokio::test]
async fn absent_author_follows_the_not_found_policy() {
    let fx = fixture();
    let ghost = ObjectId::new();

    fx.app
        .get(&format!("/catalog/author/{ghost}"))
        .send()
        .await
        .assert_not_found();
    fx.app
        .get(&format!("/catalog/author/{ghost}/delete"))
        .send()
        .await
        .assert_redirect("/catalog/authors");
    fx.app
        .post(&format!("/catalog/author/{ghost}/update"))
        .form(&[("first_name", "Nobody"), ("family_name", "Atall")])
        .send()
        .await
        .assert_not_found();
}

#[tokio::test]
async fn update_keeps_identifier_and_prefills_dates() {
    let fx = fixture();
    let author = seed_author(&fx.state, "Isaac", "Asimov").await;
    let update_url = format!("{}/update", author.url());

    fx.app
        .post(&update_url)
        .form(&[
            ("first_name", "Isaac"),
            ("family_name", "Asimov"),
            ("date_of_birth", "1920-01-02"),
        ])
        .send()
        .await
        .assert_redirect(&author.url());

    fx.app
        .get(&update_url)
        .send()
        .await
        .assert_view("author_form")
        .assert_json_path("title", "Update Author")
        .assert_json_path("author.date_of_birth", "1920-01-02")
        .assert_json_path("author.date_of_death", "");

    let stored = fx.state.authors.find_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, author.id);
    assert_eq!(stored[0].date_of_birth, Some(date(1920, 1, 2)));
}
