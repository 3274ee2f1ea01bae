use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use catalog_core::{HttpError, MissingResult, QuerySet};

async fn slow<T>(value: T, ms: u64) -> Result<T, String> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Ok(value)
}

async fn failing<T>(msg: &str, ms: u64) -> Result<T, String> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Err(msg.to_string())
}

#[tokio::test]
async fn results_are_keyed_by_query_name() {
    let mut results = QuerySet::new()
        .add("book_count", slow(3u64, 5))
        .add("titles", slow(vec!["Dune".to_string()], 1))
        .add("maybe", slow(None::<String>, 0))
        .run()
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results.take::<u64>("book_count").unwrap(), 3);
    assert_eq!(results.take::<Vec<String>>("titles").unwrap(), vec!["Dune"]);
    assert_eq!(results.take::<Option<String>>("maybe").unwrap(), None);
    assert!(results.is_empty());
}

#[tokio::test]
async fn queries_run_concurrently() {
    let started = std::time::Instant::now();
    QuerySet::<String>::new()
        .add("a", slow((), 50))
        .add("b", slow((), 50))
        .add("c", slow((), 50))
        .run()
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(140));
}

#[tokio::test]
async fn first_failure_in_completion_order_wins() {
    let err = QuerySet::new()
        .add("ok", slow(1u64, 0))
        .add("late", failing::<u64>("late failure", 40))
        .add("early", failing::<u64>("early failure", 5))
        .run()
        .await
        .err()
        .unwrap();
    assert_eq!(err, "early failure");
}

#[tokio::test]
async fn failing_set_still_runs_every_query() {
    let finished = Arc::new(AtomicUsize::new(0));
    let tracked = |ms: u64| {
        let finished = finished.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            finished.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(())
        }
    };

    let result = QuerySet::new()
        .add("fails", failing::<()>("boom", 0))
        .add("slow_a", tracked(20))
        .add("slow_b", tracked(30))
        .run()
        .await;

    assert!(result.is_err());
    assert_eq!(finished.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_set_yields_empty_results() {
    let set = QuerySet::<String>::new();
    assert!(set.is_empty());
    let results = set.run().await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn reusing_a_name_replaces_the_query() {
    let set = QuerySet::new().add("n", slow(1u64, 0)).add("n", slow(2u64, 0));
    assert_eq!(set.len(), 1);
    let mut results = set.run().await.unwrap();
    assert_eq!(results.take::<u64>("n").unwrap(), 2);
}

#[tokio::test]
async fn wrong_type_or_name_is_missing_result() {
    let mut results = QuerySet::new()
        .add("count", slow(1u64, 0))
        .run()
        .await
        .unwrap();
    assert!(results.contains("count"));
    assert_eq!(
        results.take::<String>("count").unwrap_err(),
        MissingResult("count".into())
    );
    assert!(results.take::<u64>("nope").is_err());

    let http: HttpError = MissingResult("x".into()).into();
    assert_eq!(http.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}
