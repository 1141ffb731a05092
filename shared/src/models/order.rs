//! Order Model
//!
//! Orders move through a fixed status state machine; the allowed
//! transitions live here so server and clients agree on them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::payment::{Payment, PaymentMethod};

/// Order status
///
/// Stored and transmitted as SCREAMING_SNAKE_CASE text. Transitions are
/// restricted to [`OrderStatus::allowed_next`]; everything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    /// Placed, waiting for the store to confirm
    #[default]
    AwaitingConfirmation,
    /// Confirmed, being picked and packed
    Preparing,
    /// Handed to the carrier
    Shipping,
    /// With the courier for final delivery
    OutForDelivery,
    /// Delivered; payment is recorded at this point
    Delivered,
    /// Buyer initiated a return
    ReturnInProgress,
    /// Return finished; stock is not restored
    ReturnCompleted,
}

impl OrderStatus {
    /// Every status, in lifecycle order
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::AwaitingConfirmation,
        OrderStatus::Preparing,
        OrderStatus::Shipping,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::ReturnInProgress,
        OrderStatus::ReturnCompleted,
    ];

    /// Wire/storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingConfirmation => "AWAITING_CONFIRMATION",
            Self::Preparing => "PREPARING",
            Self::Shipping => "SHIPPING",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::ReturnInProgress => "RETURN_IN_PROGRESS",
            Self::ReturnCompleted => "RETURN_COMPLETED",
        }
    }

    /// Parse a wire string; `None` for unknown statuses
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Statuses reachable from this one
    pub const fn allowed_next(&self) -> &'static [OrderStatus] {
        match self {
            Self::AwaitingConfirmation => {
                &[OrderStatus::Preparing, OrderStatus::ReturnInProgress]
            }
            Self::Preparing => &[OrderStatus::Shipping, OrderStatus::ReturnInProgress],
            Self::Shipping => &[OrderStatus::OutForDelivery, OrderStatus::ReturnInProgress],
            Self::OutForDelivery => &[OrderStatus::Delivered, OrderStatus::ReturnInProgress],
            Self::Delivered => &[],
            Self::ReturnInProgress => &[OrderStatus::ReturnCompleted],
            Self::ReturnCompleted => &[],
        }
    }

    /// Whether `next` is a legal transition from this status
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    /// Terminal statuses admit no further transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::ReturnCompleted)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    /// Generated order code, e.g. `AFB2025082501`
    pub id: String,
    pub user_id: i64,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub province: String,
    pub district: String,
    pub ward: String,
    pub street_address: String,
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,

    // -- Relations (populated by application code, skipped by FromRow) --

    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub payment: Option<Payment>,
}

/// Order line joined with book info (for detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: String,
    pub book_id: i64,
    pub quantity: i64,
    /// Price the buyer saw, captured at order time
    pub unit_price: f64,
    pub book_title: String,
    pub image_url: Option<String>,
}

/// Order list row with aggregated line info (for list views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderSummary {
    pub id: String,
    pub user_id: i64,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub total_price: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub created_at: i64,
    /// Number of lines in the order
    pub item_count: i64,
    /// Comma-joined book titles, null when the order has no lines
    pub book_titles: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user_id: i64,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub province: String,
    pub district: String,
    pub ward: String,
    pub street_address: String,
    pub note: Option<String>,
    /// Wire string, validated against [`PaymentMethod`] during creation
    pub payment_method: String,
    /// Claimed total, verified against the line items
    pub total_price: f64,
    pub lines: Vec<OrderLineInput>,
}

/// One line of a create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub book_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    /// Wire string, validated against [`OrderStatus`]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed_pairs() -> Vec<(OrderStatus, OrderStatus)> {
        use OrderStatus::*;
        vec![
            (AwaitingConfirmation, Preparing),
            (AwaitingConfirmation, ReturnInProgress),
            (Preparing, Shipping),
            (Preparing, ReturnInProgress),
            (Shipping, OutForDelivery),
            (Shipping, ReturnInProgress),
            (OutForDelivery, Delivered),
            (OutForDelivery, ReturnInProgress),
            (ReturnInProgress, ReturnCompleted),
        ]
    }

    #[test]
    fn test_every_pair_against_transition_table() {
        let allowed = allowed_pairs();
        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{from} -> {to} should be {}",
                    if expected { "allowed" } else { "rejected" }
                );
            }
        }
    }

    #[test]
    fn test_self_transitions_rejected() {
        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::ReturnCompleted.is_terminal());
        assert!(!OrderStatus::AwaitingConfirmation.is_terminal());
        assert!(!OrderStatus::ReturnInProgress.is_terminal());

        for status in OrderStatus::ALL {
            assert_eq!(status.is_terminal(), status.allowed_next().is_empty());
        }
    }

    #[test]
    fn test_parse_all_statuses() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(OrderStatus::parse("CANCELLED"), None);
        assert_eq!(OrderStatus::parse("delivered"), None);
        assert_eq!(OrderStatus::parse("Shipping"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn test_default_is_awaiting_confirmation() {
        assert_eq!(OrderStatus::default(), OrderStatus::AwaitingConfirmation);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"OUT_FOR_DELIVERY\"");

        let parsed: OrderStatus = serde_json::from_str("\"RETURN_IN_PROGRESS\"").unwrap();
        assert_eq!(parsed, OrderStatus::ReturnInProgress);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json.trim_matches('"'), status.as_str());
        }
    }

    #[test]
    fn test_display_uses_wire_format() {
        assert_eq!(
            OrderStatus::AwaitingConfirmation.to_string(),
            "AWAITING_CONFIRMATION"
        );
    }
}
