use sqlx::SqlitePool;

pub async fn pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("unable to connect to test db");

    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("unable to run migrations");

    pool
}

/// Peeks at the stored (code, verified) pair for an email, bypassing the
/// HTTP surface. The code never travels back over HTTP, so tests read it
/// here instead of parsing outbound mail.
pub async fn stored_user(pool: &SqlitePool, email: &str) -> Option<(i64, bool)> {
    sqlx::query_as::<_, (i64, bool)>(
        "SELECT verification_code, verified FROM users WHERE email = ? LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .expect("query stored user")
}
