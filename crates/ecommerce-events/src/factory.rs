//! Assembles finished event records from transition outcomes.

use crate::model::{TransitionOutcome, FALLBACK_CART_VALUE, FALLBACK_ITEM_COUNT};
use chrono::Utc;
use rand::Rng;
use sim_core::{DeviceType, EventData, EventType, PaymentMethod, UserEvent};

const PAYMENT_METHODS: [PaymentMethod; 4] = [
    PaymentMethod::CreditCard,
    PaymentMethod::Paypal,
    PaymentMethod::ApplePay,
    PaymentMethod::GooglePay,
];

fn event_data_for<R: Rng>(rng: &mut R, outcome: &TransitionOutcome) -> EventData {
    match outcome.event_type {
        EventType::Pageview => EventData::Pageview {
            scroll_depth: rng.gen_range(10..=100),
        },
        EventType::ProductView => EventData::ProductView {
            view_duration: rng.gen_range(10..=120),
        },
        EventType::AddToCart => EventData::AddToCart {
            quantity: rng.gen_range(1..=3),
        },
        EventType::Checkout => EventData::Checkout {
            // cart values are dollar amounts, rounded to cents
            cart_value: (rng.gen_range(20.0f64..=500.0) * 100.0).round() / 100.0,
            item_count: rng.gen_range(1..=5),
        },
        EventType::Purchase => {
            let (total_amount, item_count) = outcome
                .purchase_totals
                .unwrap_or((FALLBACK_CART_VALUE, FALLBACK_ITEM_COUNT));
            EventData::Purchase {
                order_id: format!("ORD{}", rng.gen_range(1000..=9999)),
                total_amount,
                item_count,
                payment_method: PAYMENT_METHODS[rng.gen_range(0..PAYMENT_METHODS.len())],
            }
        }
    }
}

/// Pure construction: stamps the emission time, draws the randomized payload
/// fields, and assembles the immutable record. Never touches the registry.
pub fn build_event<R: Rng>(
    rng: &mut R,
    event_id: String,
    session_id: &str,
    user_id: &str,
    device_type: DeviceType,
    outcome: TransitionOutcome,
) -> UserEvent {
    let event_data = event_data_for(rng, &outcome);
    UserEvent {
        event_id,
        user_id: user_id.to_string(),
        session_id: session_id.to_string(),
        event_type: outcome.event_type,
        product_id: outcome.product_id,
        page_url: outcome.page_url,
        referrer_url: outcome.referrer_url,
        device_type,
        event_time: Utc::now(),
        event_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn purchase_outcome(totals: Option<(f64, i64)>) -> TransitionOutcome {
        TransitionOutcome {
            event_type: EventType::Purchase,
            product_id: None,
            page_url: "https://example.com/order-confirmation".to_string(),
            referrer_url: Some("https://example.com/checkout".to_string()),
            purchase_totals: totals,
        }
    }

    #[test]
    fn test_randomized_fields_vary_but_carried_fields_do_not() {
        let outcome = purchase_outcome(Some((150.00, 2)));
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);

        let a = build_event(
            &mut rng_a,
            "E1000".to_string(),
            "S1000",
            "U004",
            DeviceType::Tablet,
            outcome.clone(),
        );
        let b = build_event(
            &mut rng_b,
            "E1000".to_string(),
            "S1000",
            "U004",
            DeviceType::Tablet,
            outcome,
        );

        assert_eq!(a.event_id, b.event_id);
        assert_eq!(a.user_id, b.user_id);
        assert_eq!(a.session_id, b.session_id);
        assert_eq!(a.event_type, b.event_type);
        assert_eq!(a.product_id, b.product_id);
        assert_eq!(a.page_url, b.page_url);
        assert_eq!(a.referrer_url, b.referrer_url);
        assert_eq!(a.device_type, b.device_type);

        let (EventData::Purchase {
            total_amount: total_a,
            item_count: count_a,
            ..
        }, EventData::Purchase {
            total_amount: total_b,
            item_count: count_b,
            ..
        }) = (&a.event_data, &b.event_data) else {
            panic!("expected purchase payloads");
        };
        assert_eq!(total_a, total_b);
        assert_eq!(count_a, count_b);
        assert_eq!(*total_a, 150.00);
        assert_eq!(*count_a, 2);
    }

    #[test]
    fn test_purchase_falls_back_to_default_totals() {
        let mut rng = StdRng::seed_from_u64(42);
        let event = build_event(
            &mut rng,
            "E1000".to_string(),
            "S1000",
            "U001",
            DeviceType::Mobile,
            purchase_outcome(None),
        );
        let EventData::Purchase {
            order_id,
            total_amount,
            item_count,
            ..
        } = &event.event_data
        else {
            panic!("expected a purchase payload");
        };
        assert_eq!(*total_amount, 100.0);
        assert_eq!(*item_count, 1);
        let numeric: i64 = order_id.strip_prefix("ORD").unwrap().parse().unwrap();
        assert!((1000..=9999).contains(&numeric));
    }

    #[test]
    fn test_payload_fields_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let checkout = event_data_for(
                &mut rng,
                &TransitionOutcome {
                    event_type: EventType::Checkout,
                    product_id: None,
                    page_url: "https://example.com/checkout".to_string(),
                    referrer_url: None,
                    purchase_totals: None,
                },
            );
            let EventData::Checkout {
                cart_value,
                item_count,
            } = checkout
            else {
                panic!("expected a checkout payload");
            };
            assert!((20.0..=500.0).contains(&cart_value));
            assert!((1..=5).contains(&item_count));
            // rounded to cents
            assert!(((cart_value * 100.0).round() - cart_value * 100.0).abs() < 1e-9);

            let pageview = event_data_for(
                &mut rng,
                &TransitionOutcome {
                    event_type: EventType::Pageview,
                    product_id: None,
                    page_url: "https://example.com/home".to_string(),
                    referrer_url: None,
                    purchase_totals: None,
                },
            );
            let EventData::Pageview { scroll_depth } = pageview else {
                panic!("expected a pageview payload");
            };
            assert!((10..=100).contains(&scroll_depth));
        }
    }
}
