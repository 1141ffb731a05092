//! Repository Module
//!
//! Provides data access for the store tables. All functions take a
//! `&SqlitePool` (or an open transaction) and return [`RepoResult`].

pub mod book;
pub mod order;
pub mod payment;
pub mod stats;

use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Order {0} not found")]
    OrderNotFound(String),

    #[error("Book {0} not found")]
    BookNotFound(i64),

    #[error("Insufficient stock for \"{title}\": requested {requested}, available {available}")]
    InsufficientStock {
        book_id: i64,
        title: String,
        requested: i64,
        available: i64,
    },

    #[error("Order total mismatch: claimed {claimed}, calculated {calculated}")]
    TotalMismatch { claimed: f64, calculated: f64 },

    #[error("Unsupported payment method: {0}")]
    UnsupportedPaymentMethod(String),

    #[error("Payment already recorded for order {0}")]
    PaymentAlreadyRecorded(String),

    #[error("Unknown order status: {0}")]
    InvalidStatus(String),

    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    #[error("Daily order capacity reached for {0}")]
    CapacityExceeded(String),

    #[error("Order must contain at least one line")]
    EmptyOrder,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        let message = err.to_string();
        match err {
            RepoError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message)
                    .with_detail("order_id", id)
            }
            RepoError::BookNotFound(id) => {
                AppError::with_message(ErrorCode::BookNotFound, message).with_detail("book_id", id)
            }
            RepoError::InsufficientStock {
                book_id,
                requested,
                available,
                ..
            } => AppError::with_message(ErrorCode::InsufficientStock, message)
                .with_detail("book_id", book_id)
                .with_detail("requested", requested)
                .with_detail("available", available),
            RepoError::TotalMismatch { claimed, calculated } => {
                AppError::with_message(ErrorCode::OrderTotalMismatch, message)
                    .with_detail("claimed", claimed)
                    .with_detail("calculated", calculated)
            }
            RepoError::UnsupportedPaymentMethod(method) => {
                AppError::with_message(ErrorCode::PaymentMethodUnsupported, message)
                    .with_detail("method", method)
            }
            RepoError::PaymentAlreadyRecorded(order_id) => {
                AppError::with_message(ErrorCode::PaymentAlreadyRecorded, message)
                    .with_detail("order_id", order_id)
            }
            RepoError::InvalidStatus(status) => {
                AppError::with_message(ErrorCode::OrderStatusInvalid, message)
                    .with_detail("status", status)
            }
            RepoError::IllegalTransition { from, to } => {
                AppError::with_message(ErrorCode::OrderTransitionIllegal, message)
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
            RepoError::CapacityExceeded(date) => {
                AppError::with_message(ErrorCode::OrderCapacityExceeded, message)
                    .with_detail("date", date)
            }
            RepoError::EmptyOrder => AppError::with_message(ErrorCode::OrderEmpty, message),
            RepoError::Validation(_) => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
            }
            RepoError::Database(_) => AppError::with_message(ErrorCode::DatabaseError, message),
        }
    }
}
