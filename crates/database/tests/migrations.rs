//! Versioned migration round trip.
//!
//! Kept in its own test binary, as a single test, because it drops and
//! recreates the todos table; the row-level tests in `todos.rs` must not
//! race it. Needs a disposable Postgres database; run with `-- --ignored`.

use database::{Database, DatabaseSettings};

fn test_settings() -> DatabaseSettings {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| DatabaseSettings::default().url);
    DatabaseSettings {
        url,
        sql_echo: false,
        pool_size: 2,
        max_overflow: 2,
    }
}

async fn table_exists(db: &Database, name: &str) -> bool {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_tables WHERE tablename = $1)")
        .bind(name)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

async fn index_exists(db: &Database, name: &str) -> bool {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_indexes WHERE indexname = $1)")
        .bind(name)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires a disposable Postgres database"]
async fn up_down_up_leaves_an_equivalent_empty_schema() {
    let db = Database::connect(&test_settings()).await.unwrap();

    // Start from a clean slate: no todos table, no migration bookkeeping
    // (the dev bootstrap may have created the table outside of it).
    sqlx::query("DROP TABLE IF EXISTS todos")
        .execute(db.pool())
        .await
        .unwrap();
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(db.pool())
        .await
        .unwrap();

    // Up.
    db.run_migrations().await.unwrap();
    assert!(table_exists(&db, "todos").await);
    assert!(index_exists(&db, "idx_todos_created_at").await);
    assert!(index_exists(&db, "idx_todos_is_completed").await);

    // Down: indexes and table fully gone, no residual state.
    db.revert_last_migration().await.unwrap();
    assert!(!table_exists(&db, "todos").await);
    assert!(!index_exists(&db, "idx_todos_created_at").await);
    assert!(!index_exists(&db, "idx_todos_is_completed").await);

    // Reverting again with nothing applied is a no-op.
    db.revert_last_migration().await.unwrap();
    assert!(!table_exists(&db, "todos").await);

    // Up again: an equivalent, empty schema.
    db.run_migrations().await.unwrap();
    assert!(table_exists(&db, "todos").await);
    assert!(index_exists(&db, "idx_todos_created_at").await);
    assert!(index_exists(&db, "idx_todos_is_completed").await);
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);

    db.shutdown().await;
}
