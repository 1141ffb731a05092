//! Book Repository
//!
//! Read side of the referenced catalog. The store does not own catalog
//! CRUD; order creation reads stock/price here and decrements stock
//! through the guarded update below.

use super::RepoResult;
use shared::models::{Book, BookStock};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Book>> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, price, quantity, image_url, created_at, updated_at FROM book WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(book)
}

/// Stock and price lookup that participates in an open transaction
pub async fn stock_and_price(
    conn: &mut SqliteConnection,
    book_id: i64,
) -> RepoResult<Option<BookStock>> {
    let stock =
        sqlx::query_as::<_, BookStock>("SELECT id, title, price, quantity FROM book WHERE id = ?")
            .bind(book_id)
            .fetch_optional(conn)
            .await?;
    Ok(stock)
}

/// Guarded stock decrement
///
/// Returns false (zero rows affected) when the remaining stock is below
/// the requested quantity, leaving the row untouched.
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    book_id: i64,
    quantity: i64,
    now: i64,
) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE book SET quantity = quantity - ?, updated_at = ? WHERE id = ? AND quantity >= ?",
    )
    .bind(quantity)
    .bind(now)
    .bind(book_id)
    .bind(quantity)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory SQLite pool with migrations applied and two seeded books.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        sqlx::query(
            "INSERT INTO book (id, title, author, price, quantity, created_at, updated_at) VALUES (1, 'Dune', 'Frank Herbert', 50000.0, 10, 0, 0)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO book (id, title, author, price, quantity, created_at, updated_at) VALUES (2, 'Neuromancer', 'William Gibson', 120000.0, 1, 0, 0)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let pool = test_pool().await;
        let book = find_by_id(&pool, 1).await.unwrap().unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.quantity, 10);

        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stock_and_price() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let stock = stock_and_price(&mut conn, 2).await.unwrap().unwrap();
        assert_eq!(stock.title, "Neuromancer");
        assert_eq!(stock.price, 120000.0);
        assert_eq!(stock.quantity, 1);
    }

    #[tokio::test]
    async fn test_decrement_stock_guarded() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(decrement_stock(&mut conn, 1, 4, 1000).await.unwrap());
        let stock = stock_and_price(&mut conn, 1).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 6);

        // Requesting more than remains leaves the row untouched
        assert!(!decrement_stock(&mut conn, 1, 7, 2000).await.unwrap());
        let stock = stock_and_price(&mut conn, 1).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 6);
    }

    #[tokio::test]
    async fn test_decrement_stock_to_zero() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(decrement_stock(&mut conn, 2, 1, 1000).await.unwrap());
        let stock = stock_and_price(&mut conn, 2).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 0);

        assert!(!decrement_stock(&mut conn, 2, 1, 2000).await.unwrap());
    }
}
