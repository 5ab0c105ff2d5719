//! The probabilistic state machine behind session event sequences.
//!
//! The transition table is declarative so the probabilities can be read (and
//! unit-tested) in one place instead of being buried in branch conditions.
//! Splitting "draw the next type" from "assemble the outcome for a type"
//! lets callers force a specific transition when they need to.

use crate::catalog;
use rand::Rng;
use sim_core::{EventType, UserEvent};

/// Weighted next-type candidates per current type. `Purchase` has no row:
/// it is terminal, and the caller drops the session instead of continuing.
pub const TRANSITIONS: &[(EventType, &[(EventType, u32)])] = &[
    (
        EventType::Pageview,
        &[(EventType::Pageview, 60), (EventType::ProductView, 40)],
    ),
    (
        EventType::ProductView,
        &[
            (EventType::Pageview, 30),
            (EventType::ProductView, 30),
            (EventType::AddToCart, 40),
        ],
    ),
    (
        EventType::AddToCart,
        &[
            (EventType::Pageview, 20),
            (EventType::ProductView, 40),
            (EventType::Checkout, 40),
        ],
    ),
    (
        EventType::Checkout,
        &[(EventType::Pageview, 30), (EventType::Purchase, 70)],
    ),
];

/// Chance that a pageview right after an add-to-cart lands on the cart.
const CART_PAGEVIEW_PROBABILITY: f64 = 0.7;

/// Totals a purchase falls back to when the prior event carries no checkout
/// payload. A fallback, not an error.
pub const FALLBACK_CART_VALUE: f64 = 100.0;
pub const FALLBACK_ITEM_COUNT: i64 = 1;

/// Everything the factory needs beyond the randomized payload fields: the
/// chosen type plus the context carried over from the prior event.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub event_type: EventType,
    pub product_id: Option<String>,
    pub page_url: String,
    pub referrer_url: Option<String>,
    /// Cart value and item count a purchase copies from its checkout.
    pub purchase_totals: Option<(f64, i64)>,
}

fn candidates(current: EventType) -> Option<&'static [(EventType, u32)]> {
    TRANSITIONS
        .iter()
        .find(|(from, _)| *from == current)
        .map(|(_, to)| *to)
}

/// Categorical draw proportional to the listed integer weights. The weights
/// need not sum to 100; they only need to be positive.
pub fn weighted_pick<T: Copy, R: Rng>(rng: &mut R, choices: &[(T, u32)]) -> T {
    let total: u32 = choices.iter().map(|(_, weight)| weight).sum();
    let mut roll = rng.gen_range(0..total);
    for (value, weight) in choices {
        if roll < *weight {
            return *value;
        }
        roll -= *weight;
    }
    // roll < total, so the loop always returns
    choices[choices.len() - 1].0
}

/// Next event type for a session whose last event was `current`, or `None`
/// when `current` is terminal.
pub fn next_event_type<R: Rng>(rng: &mut R, current: EventType) -> Option<EventType> {
    candidates(current).map(|choices| weighted_pick(rng, choices))
}

/// Outcome for a session's very first event: always a pageview on a browse
/// page, with the referrer drawn from the traffic-source pool.
pub fn opening_outcome<R: Rng>(rng: &mut R) -> TransitionOutcome {
    TransitionOutcome {
        event_type: EventType::Pageview,
        product_id: None,
        page_url: catalog::random_browse_page(rng).to_string(),
        referrer_url: catalog::random_referrer(rng),
        purchase_totals: None,
    }
}

/// Outcome for continuing a session with a chosen next type, applying the
/// carry-forward rules:
///
/// - a continued event's referrer is the prior event's page, except that an
///   add-to-cart has none and a checkout always arrives from the cart
/// - an add-to-cart keeps the prior product view's product and page
/// - a purchase copies the prior checkout's totals, falling back to
///   [`FALLBACK_CART_VALUE`] and [`FALLBACK_ITEM_COUNT`]
pub fn outcome_for<R: Rng>(rng: &mut R, prior: &UserEvent, next: EventType) -> TransitionOutcome {
    match next {
        EventType::Pageview => {
            let page_url = if prior.event_type == EventType::AddToCart
                && rng.gen_bool(CART_PAGEVIEW_PROBABILITY)
            {
                catalog::CART_PAGE.to_string()
            } else {
                catalog::random_browse_page(rng).to_string()
            };
            TransitionOutcome {
                event_type: next,
                product_id: None,
                page_url,
                referrer_url: Some(prior.page_url.clone()),
                purchase_totals: None,
            }
        }
        EventType::ProductView => {
            let product_id = catalog::random_product(rng);
            TransitionOutcome {
                event_type: next,
                product_id: Some(product_id.to_string()),
                page_url: catalog::product_page(product_id),
                referrer_url: Some(prior.page_url.clone()),
                purchase_totals: None,
            }
        }
        EventType::AddToCart => TransitionOutcome {
            event_type: next,
            product_id: prior.product_id.clone(),
            page_url: prior.page_url.clone(),
            referrer_url: None,
            purchase_totals: None,
        },
        EventType::Checkout => TransitionOutcome {
            event_type: next,
            product_id: None,
            page_url: catalog::CHECKOUT_PAGE.to_string(),
            referrer_url: Some(catalog::CART_PAGE.to_string()),
            purchase_totals: None,
        },
        EventType::Purchase => TransitionOutcome {
            event_type: next,
            product_id: None,
            page_url: catalog::ORDER_CONFIRMATION_PAGE.to_string(),
            referrer_url: Some(prior.page_url.clone()),
            purchase_totals: Some(
                prior
                    .event_data
                    .cart_totals()
                    .unwrap_or((FALLBACK_CART_VALUE, FALLBACK_ITEM_COUNT)),
            ),
        },
    }
}

/// Draw the next type for `prior` and assemble its outcome. `None` means
/// the session is already terminal and should be dropped.
pub fn next_outcome<R: Rng>(rng: &mut R, prior: &UserEvent) -> Option<TransitionOutcome> {
    let next = next_event_type(rng, prior.event_type)?;
    Some(outcome_for(rng, prior, next))
}
