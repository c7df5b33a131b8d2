use sqlx::PgPool;

/// Connect, migrate, and verify every table exists.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    clinic_db::health_check(&pool).await.unwrap();

    let tables = [
        "content_sections",
        "section_items",
        "testimonials",
        "doctor_profiles",
        "holidays",
        "admin_users",
        "admin_sessions",
        "page_blocks",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The CHECK constraint rejects holiday types outside the known set.
#[sqlx::test(migrations = "./migrations")]
async fn test_holiday_type_check_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO holidays (holiday_date, name, holiday_type) VALUES ('2024-01-01', 'x', 'festival')",
    )
    .execute(&pool)
    .await;
    let err = result.unwrap_err();
    let code = err.as_database_error().and_then(|e| e.code()).unwrap();
    assert_eq!(code, "23514");
}

/// `updated_at` advances on UPDATE via the shared trigger.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO doctor_profiles (doctor_key, name, updated_at) \
         VALUES ('dr-a', 'A', NOW() - INTERVAL '1 hour') RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE doctor_profiles SET name = 'B' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(updated > created);
}
