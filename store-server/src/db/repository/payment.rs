//! Payment Repository
//!
//! Payments are written exactly once, by the status update that lands an
//! order on DELIVERED. The UNIQUE constraint on order_id backs that up.

use super::{RepoError, RepoResult};
use shared::models::{PAYMENT_STATUS_SUCCESS, Payment};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_by_order(pool: &SqlitePool, order_id: &str) -> RepoResult<Option<Payment>> {
    let payment = sqlx::query_as::<_, Payment>(
        "SELECT id, order_id, amount, status, created_at, paid_at FROM payment WHERE order_id = ?",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(payment)
}

/// Record the delivery payment inside the status-update transaction
pub async fn record(
    conn: &mut SqliteConnection,
    order_id: &str,
    amount: f64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO payment (order_id, amount, status, created_at, paid_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(amount)
    .bind(PAYMENT_STATUS_SUCCESS)
    .bind(now)
    .bind(now)
    .execute(conn)
    .await
    .map_err(|e| {
        let msg = e.to_string().to_lowercase();
        if msg.contains("unique") {
            RepoError::PaymentAlreadyRecorded(order_id.to_string())
        } else {
            RepoError::from(e)
        }
    })?;
    Ok(())
}
