use sqlx::PgPool;

/// Connect, migrate, verify both tables exist.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    infocomic_db::health_check(&pool).await.unwrap();

    for table in ["users", "comic_blogs"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// `updated_at` moves forward when a row changes.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, before): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO comic_blogs (title, email, created_at, updated_at)
         VALUES ('t', 'e@x.com', NOW() - INTERVAL '1 hour', NOW() - INTERVAL '1 hour')
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (after,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE comic_blogs SET video_url = 'v' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(after > before);
}
