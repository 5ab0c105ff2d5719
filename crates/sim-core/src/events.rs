//! Record types for the session-aware e-commerce event stream.
//!
//! The source of truth for the persisted schema is the `user_events` table;
//! the types here mirror its columns exactly. A session's state is simply the
//! last [`UserEvent`] it emitted, so these types double as the state carried
//! between ticks by the session registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The event types a session can emit.
///
/// [`EventType::Purchase`] is terminal: a session that emits it is finished
/// and must be dropped from active tracking in the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Pageview,
    ProductView,
    AddToCart,
    Checkout,
    Purchase,
}

impl EventType {
    /// Wire token stored in the `event_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pageview => "pageview",
            Self::ProductView => "product_view",
            Self::AddToCart => "add_to_cart",
            Self::Checkout => "checkout",
            Self::Purchase => "purchase",
        }
    }

    /// Whether a session ends after emitting this event type.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Purchase)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device a session runs on. Fixed for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
}

impl DeviceType {
    /// Wire token stored in the `device_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment methods a purchase can settle with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::Paypal => "paypal",
            Self::ApplePay => "apple_pay",
            Self::GooglePay => "google_pay",
        }
    }
}

/// Per-event-type payload persisted in the `event_data` JSON column.
///
/// Serialized untagged so the JSON carries exactly the fields of the variant
/// and nothing else, matching the shapes the downstream pipeline expects:
///
/// ```text
/// pageview      {"scroll_depth": 64}
/// product_view  {"view_duration": 87}
/// add_to_cart   {"quantity": 2}
/// checkout      {"cart_value": 153.27, "item_count": 3}
/// purchase      {"order_id": "ORD4711", "total_amount": 153.27,
///                "item_count": 3, "payment_method": "paypal"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    Pageview {
        /// How far down the page the visitor scrolled, in percent.
        scroll_depth: i64,
    },
    ProductView {
        /// Seconds spent on the product page.
        view_duration: i64,
    },
    AddToCart {
        quantity: i64,
    },
    Checkout {
        cart_value: f64,
        item_count: i64,
    },
    Purchase {
        order_id: String,
        /// Copied verbatim from the checkout that preceded the purchase.
        total_amount: f64,
        /// Copied verbatim from the checkout that preceded the purchase.
        item_count: i64,
        payment_method: PaymentMethod,
    },
}

impl EventData {
    /// Checkout totals carried forward into a purchase, when present.
    pub fn cart_totals(&self) -> Option<(f64, i64)> {
        match self {
            Self::Checkout {
                cart_value,
                item_count,
            } => Some((*cart_value, *item_count)),
            _ => None,
        }
    }
}

/// One persisted row of the `user_events` stream. Immutable once built.
///
/// The `session_id` is the grouping key for the session state machine; the
/// most recent event for a session is also that session's current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEvent {
    pub event_id: String,
    pub user_id: String,
    pub session_id: String,
    pub event_type: EventType,
    /// Present only for product-scoped event types.
    pub product_id: Option<String>,
    pub page_url: String,
    /// Absent for direct traffic and for cart-origin events.
    pub referrer_url: Option<String>,
    pub device_type: DeviceType,
    pub event_time: DateTime<Utc>,
    pub event_data: EventData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_type_wire_tokens() {
        assert_eq!(EventType::Pageview.as_str(), "pageview");
        assert_eq!(EventType::ProductView.as_str(), "product_view");
        assert_eq!(EventType::AddToCart.as_str(), "add_to_cart");
        assert_eq!(EventType::Checkout.as_str(), "checkout");
        assert_eq!(EventType::Purchase.as_str(), "purchase");

        // serde uses the same tokens as as_str
        for event_type in [
            EventType::Pageview,
            EventType::ProductView,
            EventType::AddToCart,
            EventType::Checkout,
            EventType::Purchase,
        ] {
            let serialized = serde_json::to_value(event_type).unwrap();
            assert_eq!(serialized, json!(event_type.as_str()));
        }
    }

    #[test]
    fn test_only_purchase_is_terminal() {
        assert!(EventType::Purchase.is_terminal());
        assert!(!EventType::Pageview.is_terminal());
        assert!(!EventType::ProductView.is_terminal());
        assert!(!EventType::AddToCart.is_terminal());
        assert!(!EventType::Checkout.is_terminal());
    }

    #[test]
    fn test_event_data_json_shapes() {
        let data = EventData::Checkout {
            cart_value: 153.27,
            item_count: 3,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({"cart_value": 153.27, "item_count": 3})
        );

        let data = EventData::Purchase {
            order_id: "ORD4711".to_string(),
            total_amount: 153.27,
            item_count: 3,
            payment_method: PaymentMethod::Paypal,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "order_id": "ORD4711",
                "total_amount": 153.27,
                "item_count": 3,
                "payment_method": "paypal"
            })
        );
    }

    #[test]
    fn test_cart_totals_only_from_checkout() {
        let checkout = EventData::Checkout {
            cart_value: 99.5,
            item_count: 2,
        };
        assert_eq!(checkout.cart_totals(), Some((99.5, 2)));

        let pageview = EventData::Pageview { scroll_depth: 50 };
        assert_eq!(pageview.cart_totals(), None);
    }
}
