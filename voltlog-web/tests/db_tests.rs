//! Storage bootstrap tests
//!
//! File-backed startup path: parent directory creation, schema creation on a
//! fresh database, and idempotent reopening of an existing one.

use voltlog_common::Measurement;
use voltlog_web::db;

#[tokio::test]
async fn init_creates_parent_directories_and_schema() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("voltlog.db");

    let pool = db::init_database_pool(&path).await.expect("fresh database");
    assert!(path.parent().expect("parent path").is_dir());

    let measurement = Measurement::from_sample("bootstrap", 1_000.0, 5.0, 0.5);
    db::measurements::insert(&pool, &measurement)
        .await
        .expect("insert");
    assert_eq!(
        db::measurements::count(&pool, "bootstrap").await.unwrap(),
        1
    );
    pool.close().await;

    // Reopening an existing database keeps its data intact
    let pool = db::init_database_pool(&path).await.expect("reopen");
    assert_eq!(
        db::measurements::count(&pool, "bootstrap").await.unwrap(),
        1
    );
}
