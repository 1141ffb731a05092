//! Order Repository
//!
//! Owns the order lifecycle: creation (stock check, guarded decrement and
//! total verification in one transaction), the status state machine with
//! payment-on-delivery, and the order query surface.
//!
//! All mutations must run on the write pool. Its single connection
//! serializes order creation, which makes the read-compute-insert order
//! code generation and the check-then-decrement stock update atomic.

use sqlx::{SqliteConnection, SqlitePool};

use super::{RepoError, RepoResult, book, payment};
use crate::utils::{money, time};
use shared::models::{Order, OrderCreate, OrderLine, OrderStatus, OrderSummary, PaymentMethod};
use shared::util::now_millis;

/// Order code prefix
const ORDER_PREFIX: &str = "AFB";
/// Highest two-digit daily sequence
const DAILY_SEQ_MAX: u32 = 99;

/// Next order code for a date, e.g. `AFB2025082503`
///
/// Reads the highest existing code for the day inside the caller's
/// transaction; the fixed-width suffix keeps text order equal to numeric
/// order. Fails with [`RepoError::CapacityExceeded`] when the day already
/// holds suffix 99 so the format never widens silently.
async fn next_code(conn: &mut SqliteConnection, date_code: &str) -> RepoResult<String> {
    let prefix = format!("{ORDER_PREFIX}{date_code}");

    let last: Option<String> =
        sqlx::query_scalar("SELECT id FROM orders WHERE id LIKE ? ORDER BY id DESC LIMIT 1")
            .bind(format!("{prefix}%"))
            .fetch_optional(conn)
            .await?;

    let seq = match last {
        Some(id) => {
            id.strip_prefix(&prefix)
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(0)
                + 1
        }
        None => 1,
    };

    if seq > DAILY_SEQ_MAX {
        return Err(RepoError::CapacityExceeded(date_code.to_string()));
    }

    Ok(format!("{prefix}{seq:02}"))
}

/// Create an order
///
/// Runs entirely in one transaction: stock check per line, total
/// verification, payment method check, order code generation, inserts and
/// guarded stock decrements. On any failure nothing is persisted.
pub async fn create(pool: &SqlitePool, payload: OrderCreate) -> RepoResult<Order> {
    if payload.lines.is_empty() {
        return Err(RepoError::EmptyOrder);
    }
    for line in &payload.lines {
        money::validate_line(line)?;
    }

    let now = now_millis();
    let mut tx = pool.begin().await?;

    // Stock check; the guarded decrement below re-checks in-database
    for line in &payload.lines {
        let stock = book::stock_and_price(&mut tx, line.book_id)
            .await?
            .ok_or(RepoError::BookNotFound(line.book_id))?;
        if stock.quantity < line.quantity {
            return Err(RepoError::InsufficientStock {
                book_id: line.book_id,
                title: stock.title,
                requested: line.quantity,
                available: stock.quantity,
            });
        }
    }

    // The claimed total must match the line items within tolerance
    let calculated = money::order_total(&payload.lines);
    if !money::totals_match(payload.total_price, calculated) {
        return Err(RepoError::TotalMismatch {
            claimed: payload.total_price,
            calculated: money::to_f64(calculated),
        });
    }

    let method = PaymentMethod::parse(&payload.payment_method)
        .ok_or_else(|| RepoError::UnsupportedPaymentMethod(payload.payment_method.clone()))?;

    let id = next_code(&mut tx, &time::date_code(time::today())).await?;

    sqlx::query(
        "INSERT INTO orders (id, user_id, receiver_name, receiver_phone, province, district, ward, street_address, note, payment_method, total_price, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(payload.user_id)
    .bind(&payload.receiver_name)
    .bind(&payload.receiver_phone)
    .bind(&payload.province)
    .bind(&payload.district)
    .bind(&payload.ward)
    .bind(&payload.street_address)
    .bind(&payload.note)
    .bind(method)
    .bind(payload.total_price)
    .bind(OrderStatus::AwaitingConfirmation)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for line in &payload.lines {
        sqlx::query(
            "INSERT INTO order_line (order_id, book_id, quantity, unit_price) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(line.book_id)
        .bind(line.quantity)
        .bind(line.unit_price)
        .execute(&mut *tx)
        .await?;

        if !book::decrement_stock(&mut tx, line.book_id, line.quantity, now).await? {
            let stock = book::stock_and_price(&mut tx, line.book_id)
                .await?
                .ok_or(RepoError::BookNotFound(line.book_id))?;
            return Err(RepoError::InsufficientStock {
                book_id: line.book_id,
                title: stock.title,
                requested: line.quantity,
                available: stock.quantity,
            });
        }
    }

    tx.commit().await?;

    get_detail(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Apply a status transition
///
/// Rejects unknown statuses before any lookup and illegal transitions
/// without touching the row. Landing on DELIVERED records the payment in
/// the same transaction.
pub async fn update_status(pool: &SqlitePool, id: &str, requested: &str) -> RepoResult<Order> {
    let next = OrderStatus::parse(requested)
        .ok_or_else(|| RepoError::InvalidStatus(requested.to_string()))?;

    let now = now_millis();
    let mut tx = pool.begin().await?;

    let row: Option<(OrderStatus, f64)> =
        sqlx::query_as("SELECT status, total_price FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let (current, total_price) = row.ok_or_else(|| RepoError::OrderNotFound(id.to_string()))?;

    if !current.can_transition_to(next) {
        return Err(RepoError::IllegalTransition {
            from: current,
            to: next,
        });
    }

    sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
        .bind(next)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

    // Payment-on-delivery: amount is the verified order total
    if next == OrderStatus::Delivered {
        payment::record(&mut tx, id, total_price, now).await?;
    }

    tx.commit().await?;

    get_detail(pool, id)
        .await?
        .ok_or_else(|| RepoError::OrderNotFound(id.to_string()))
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, user_id, receiver_name, receiver_phone, province, district, ward, street_address, note, payment_method, total_price, status, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

/// Order detail: the order row plus its lines (joined with book title and
/// image) plus the payment when present
pub async fn get_detail(pool: &SqlitePool, id: &str) -> RepoResult<Option<Order>> {
    let Some(mut order) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    order.lines = lines_for(pool, id).await?;
    order.payment = payment::find_by_order(pool, id).await?;
    Ok(Some(order))
}

async fn lines_for(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderLine>> {
    let lines = sqlx::query_as::<_, OrderLine>(
        "SELECT ol.id, ol.order_id, ol.book_id, ol.quantity, ol.unit_price, b.title AS book_title, b.image_url FROM order_line ol JOIN book b ON b.id = ol.book_id WHERE ol.order_id = ? ORDER BY ol.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Orders of one user, newest first, with aggregated line info
pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(
        "SELECT o.id, o.user_id, o.receiver_name, o.receiver_phone, o.total_price, o.status, o.payment_method, o.created_at, COUNT(ol.id) AS item_count, GROUP_CONCAT(b.title, ', ') AS book_titles FROM orders o LEFT JOIN order_line ol ON ol.order_id = o.id LEFT JOIN book b ON b.id = ol.book_id WHERE o.user_id = ? GROUP BY o.id ORDER BY o.created_at DESC, o.id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// All orders, newest first, paginated
pub async fn find_all(pool: &SqlitePool, limit: i32, offset: i32) -> RepoResult<Vec<OrderSummary>> {
    let orders = sqlx::query_as::<_, OrderSummary>(
        "SELECT o.id, o.user_id, o.receiver_name, o.receiver_phone, o.total_price, o.status, o.payment_method, o.created_at, COUNT(ol.id) AS item_count, GROUP_CONCAT(b.title, ', ') AS book_titles FROM orders o LEFT JOIN order_line ol ON ol.order_id = o.id LEFT JOIN book b ON b.id = ol.book_id GROUP BY o.id ORDER BY o.created_at DESC, o.id DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

/// Substring search over order id and receiver phone
pub async fn search(
    pool: &SqlitePool,
    q: &str,
    limit: i32,
    offset: i32,
) -> RepoResult<Vec<OrderSummary>> {
    let pattern = format!("%{q}%");
    let orders = sqlx::query_as::<_, OrderSummary>(
        "SELECT o.id, o.user_id, o.receiver_name, o.receiver_phone, o.total_price, o.status, o.payment_method, o.created_at, COUNT(ol.id) AS item_count, GROUP_CONCAT(b.title, ', ') AS book_titles FROM orders o LEFT JOIN order_line ol ON ol.order_id = o.id LEFT JOIN book b ON b.id = ol.book_id WHERE o.id LIKE ? OR o.receiver_phone LIKE ? GROUP BY o.id ORDER BY o.created_at DESC, o.id DESC LIMIT ? OFFSET ?",
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}
