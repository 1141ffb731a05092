//! Sales Statistics Repository
//!
//! Revenue is recognized on delivery, so revenue figures aggregate the
//! payment table; order counts come from the orders table. All windows
//! are half-open: `[start, end)`.

use super::RepoResult;
use sqlx::SqlitePool;

/// Sum of payment amounts in the window
pub async fn revenue_between(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<f64> {
    let total: Option<f64> =
        sqlx::query_scalar("SELECT SUM(amount) FROM payment WHERE created_at >= ? AND created_at < ?")
            .bind(start)
            .bind(end)
            .fetch_one(pool)
            .await?;
    Ok(total.unwrap_or(0.0))
}

/// Count of orders created in the window
pub async fn orders_between(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE created_at >= ? AND created_at < ?")
            .bind(start)
            .bind(end)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Payment totals grouped by local month key (YYYY-MM), ascending
///
/// Months without payments are absent here; the handler fills zeros.
pub async fn monthly_revenue(pool: &SqlitePool, start: i64) -> RepoResult<Vec<(String, f64)>> {
    let rows: Vec<(String, f64)> = sqlx::query_as(
        "SELECT strftime('%Y-%m', created_at / 1000, 'unixepoch', 'localtime') AS month, SUM(amount) AS total FROM payment WHERE created_at >= ? GROUP BY month ORDER BY month",
    )
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    // Mid-month noon-UTC instants land in the same month in every timezone
    const JUN_15_2024: i64 = 1_718_452_800_000;
    const JUL_15_2024: i64 = 1_721_044_800_000;
    const JUL_20_2024: i64 = 1_721_476_800_000;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    async fn seed_order(pool: &SqlitePool, id: &str, created_at: i64) {
        sqlx::query(
            "INSERT INTO orders (id, user_id, receiver_name, receiver_phone, province, district, ward, street_address, payment_method, total_price, status, created_at, updated_at) VALUES (?, 1, 'X', '0', 'P', 'D', 'W', 'S', 'CASH_ON_DELIVERY', 100.0, 'DELIVERED', ?, ?)",
        )
        .bind(id)
        .bind(created_at)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn seed_payment(pool: &SqlitePool, order_id: &str, amount: f64, created_at: i64) {
        sqlx::query(
            "INSERT INTO payment (order_id, amount, status, created_at, paid_at) VALUES (?, ?, 'Success', ?, ?)",
        )
        .bind(order_id)
        .bind(amount)
        .bind(created_at)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_revenue_between_is_half_open() {
        let pool = test_pool().await;
        seed_order(&pool, "AFB2024061501", 1000).await;
        seed_order(&pool, "AFB2024061502", 2000).await;
        seed_order(&pool, "AFB2024061503", 3000).await;
        seed_payment(&pool, "AFB2024061501", 100.0, 1000).await;
        seed_payment(&pool, "AFB2024061502", 50.0, 2000).await;
        seed_payment(&pool, "AFB2024061503", 25.0, 3000).await;

        assert_eq!(revenue_between(&pool, 1000, 3000).await.unwrap(), 150.0);
        assert_eq!(revenue_between(&pool, 0, 4000).await.unwrap(), 175.0);
    }

    #[tokio::test]
    async fn test_revenue_between_empty_window_is_zero() {
        let pool = test_pool().await;
        assert_eq!(revenue_between(&pool, 0, 1000).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_orders_between_counts_created_at() {
        let pool = test_pool().await;
        seed_order(&pool, "AFB2024061501", 1000).await;
        seed_order(&pool, "AFB2024061502", 2000).await;
        seed_order(&pool, "AFB2024061503", 3000).await;

        assert_eq!(orders_between(&pool, 1000, 3000).await.unwrap(), 2);
        assert_eq!(orders_between(&pool, 0, 500).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_monthly_revenue_groups_by_month() {
        let pool = test_pool().await;
        seed_order(&pool, "AFB2024061501", JUN_15_2024).await;
        seed_order(&pool, "AFB2024071501", JUL_15_2024).await;
        seed_order(&pool, "AFB2024072001", JUL_20_2024).await;
        seed_payment(&pool, "AFB2024061501", 100.0, JUN_15_2024).await;
        seed_payment(&pool, "AFB2024071501", 120.0, JUL_15_2024).await;
        seed_payment(&pool, "AFB2024072001", 180.0, JUL_20_2024).await;

        let rows = monthly_revenue(&pool, 0).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("2024-06".to_string(), 100.0));
        assert_eq!(rows[1], ("2024-07".to_string(), 300.0));
    }

    #[tokio::test]
    async fn test_monthly_revenue_respects_start() {
        let pool = test_pool().await;
        seed_order(&pool, "AFB2024061501", JUN_15_2024).await;
        seed_order(&pool, "AFB2024071501", JUL_15_2024).await;
        seed_payment(&pool, "AFB2024061501", 100.0, JUN_15_2024).await;
        seed_payment(&pool, "AFB2024071501", 120.0, JUL_15_2024).await;

        let rows = monthly_revenue(&pool, JUL_15_2024).await.unwrap();
        assert_eq!(rows, vec![("2024-07".to_string(), 120.0)]);
    }
}
