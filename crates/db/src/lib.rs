//! Persistence layer: pool construction, migrations, models and
//! repositories.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool type used across the workspace.
pub type DbPool = PgPool;

/// Create a connection pool with sensible defaults for a request/response
/// workload.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used at startup and by the health endpoint.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply embedded migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Stable 64-bit key for `pg_advisory_xact_lock`, derived from a
/// master/date pair. FNV-1a so the key is identical across processes and
/// restarts (unlike the std hasher).
pub fn day_lock_key(master_id: i64, date: &str) -> i64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET;
    for byte in master_id
        .to_be_bytes()
        .iter()
        .chain([b':'].iter())
        .chain(date.as_bytes())
    {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_key_is_stable() {
        let a = day_lock_key(42, "2026-08-27");
        let b = day_lock_key(42, "2026-08-27");
        assert_eq!(a, b);
    }

    #[test]
    fn lock_key_distinguishes_day_and_master() {
        let base = day_lock_key(42, "2026-08-27");
        assert_ne!(base, day_lock_key(42, "2026-08-28"));
        assert_ne!(base, day_lock_key(43, "2026-08-27"));
    }
}
