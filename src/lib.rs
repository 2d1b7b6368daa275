//! Settee
//!
//! Settee is the shopping cart behind a furniture storefront: an ordered,
//! merge-on-add list of product/variant lines persisted to key/value storage,
//! with derived totals and the checkout payloads built from it.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod items;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod session;
pub mod storage;
pub mod summary;
