//! Static pools the simulated shop draws from.
//!
//! Product and user ids line up with the seed rows of the downstream
//! dimension tables, so generated events always join against existing rows.

use rand::Rng;
use sim_core::DeviceType;

pub const PRODUCT_IDS: [&str; 10] = [
    "P001", "P002", "P003", "P004", "P005", "P006", "P007", "P008", "P009", "P010",
];

pub const USER_IDS: [&str; 10] = [
    "U001", "U002", "U003", "U004", "U005", "U006", "U007", "U008", "U009", "U010",
];

/// Pages a visitor browses outside the product catalog.
pub const BROWSE_PAGES: [&str; 5] = [
    "https://example.com/home",
    "https://example.com/products",
    "https://example.com/categories",
    "https://example.com/blog",
    "https://example.com/about",
];

pub const CART_PAGE: &str = "https://example.com/cart";
pub const CHECKOUT_PAGE: &str = "https://example.com/checkout";
pub const ORDER_CONFIRMATION_PAGE: &str = "https://example.com/order-confirmation";

/// Traffic sources for a session's first event. `None` is direct traffic.
pub const REFERRERS: [Option<&str>; 8] = [
    Some("https://google.com"),
    Some("https://bing.com"),
    Some("https://facebook.com"),
    Some("https://instagram.com"),
    Some("https://twitter.com"),
    Some("https://pinterest.com"),
    Some("https://youtube.com"),
    None,
];

/// Device mix of the simulated population.
pub const DEVICE_WEIGHTS: [(DeviceType, u32); 3] = [
    (DeviceType::Mobile, 60),
    (DeviceType::Desktop, 30),
    (DeviceType::Tablet, 10),
];

pub fn product_page(product_id: &str) -> String {
    format!("https://example.com/products/{product_id}")
}

pub fn random_product<R: Rng>(rng: &mut R) -> &'static str {
    PRODUCT_IDS[rng.gen_range(0..PRODUCT_IDS.len())]
}

pub fn random_user<R: Rng>(rng: &mut R) -> &'static str {
    USER_IDS[rng.gen_range(0..USER_IDS.len())]
}

pub fn random_browse_page<R: Rng>(rng: &mut R) -> &'static str {
    BROWSE_PAGES[rng.gen_range(0..BROWSE_PAGES.len())]
}

pub fn random_referrer<R: Rng>(rng: &mut R) -> Option<String> {
    REFERRERS[rng.gen_range(0..REFERRERS.len())].map(str::to_string)
}

pub fn random_device<R: Rng>(rng: &mut R) -> DeviceType {
    crate::model::weighted_pick(rng, &DEVICE_WEIGHTS)
}
