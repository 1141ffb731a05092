//! Payment Model

use serde::{Deserialize, Serialize};

/// Status recorded on every payment row
pub const PAYMENT_STATUS_SUCCESS: &str = "Success";

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PaymentMethod {
    /// Settled in cash when the courier hands over the order
    CashOnDelivery,
}

impl PaymentMethod {
    /// Wire/storage representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "CASH_ON_DELIVERY",
        }
    }

    /// Parse a wire string; `None` for unsupported methods
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CASH_ON_DELIVERY" => Some(Self::CashOnDelivery),
            _ => None,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::CashOnDelivery
    }
}

/// Payment record, inserted when an order reaches DELIVERED
///
/// At most one per order (UNIQUE on order_id).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Payment {
    pub id: i64,
    pub order_id: String,
    /// Equals the order total at the time of delivery
    pub amount: f64,
    pub status: String,
    pub created_at: i64,
    pub paid_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_method() {
        assert_eq!(
            PaymentMethod::parse("CASH_ON_DELIVERY"),
            Some(PaymentMethod::CashOnDelivery)
        );
    }

    #[test]
    fn test_parse_unknown_method() {
        assert_eq!(PaymentMethod::parse("CREDIT_CARD"), None);
        assert_eq!(PaymentMethod::parse("cash_on_delivery"), None);
        assert_eq!(PaymentMethod::parse(""), None);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"CASH_ON_DELIVERY\"");

        let parsed: PaymentMethod = serde_json::from_str("\"CASH_ON_DELIVERY\"").unwrap();
        assert_eq!(parsed, PaymentMethod::CashOnDelivery);
    }

    #[test]
    fn test_as_str_matches_serde() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json.trim_matches('"'), PaymentMethod::CashOnDelivery.as_str());
    }
}
