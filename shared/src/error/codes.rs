//! Unified error codes for the bookstore order service
//!
//! This module defines all error codes used across the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Book errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no lines
    OrderEmpty = 4002,
    /// Claimed total does not match the computed total
    OrderTotalMismatch = 4003,
    /// Status string is not a known order status
    OrderStatusInvalid = 4004,
    /// Requested transition is not allowed from the current status
    OrderTransitionIllegal = 4005,
    /// Daily order id sequence is exhausted
    OrderCapacityExceeded = 4006,

    // ==================== 5xxx: Payment ====================
    /// Payment method is not supported
    PaymentMethodUnsupported = 5001,
    /// A payment already exists for this order
    PaymentAlreadyRecorded = 5002,

    // ==================== 6xxx: Book ====================
    /// Book not found
    BookNotFound = 6001,
    /// Not enough stock to satisfy the requested quantity
    InsufficientStock = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no lines",
            ErrorCode::OrderTotalMismatch => "Order total does not match the line items",
            ErrorCode::OrderStatusInvalid => "Unknown order status",
            ErrorCode::OrderTransitionIllegal => "Status transition is not allowed",
            ErrorCode::OrderCapacityExceeded => "Daily order limit reached",

            // Payment
            ErrorCode::PaymentMethodUnsupported => "Payment method is not supported",
            ErrorCode::PaymentAlreadyRecorded => "Payment has already been recorded",

            // Book
            ErrorCode::BookNotFound => "Book not found",
            ErrorCode::InsufficientStock => "Not enough stock",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderTotalMismatch),
            4004 => Ok(ErrorCode::OrderStatusInvalid),
            4005 => Ok(ErrorCode::OrderTransitionIllegal),
            4006 => Ok(ErrorCode::OrderCapacityExceeded),

            // Payment
            5001 => Ok(ErrorCode::PaymentMethodUnsupported),
            5002 => Ok(ErrorCode::PaymentAlreadyRecorded),

            // Book
            6001 => Ok(ErrorCode::BookNotFound),
            6002 => Ok(ErrorCode::InsufficientStock),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
