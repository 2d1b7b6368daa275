//! Settee prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::Cart,
    catalog::{Catalog, CatalogError},
    config::{CartConfig, ConfigError, parse_currency},
    items::{ItemKey, LineItem},
    order::{
        CustomerInfo, HandoffMessage, OrderError, OrderItem, OrderSubmission, handoff_message,
        order_items,
    },
    pricing::PriceError,
    products::{Product, ProductId, ProductRecord},
    session::CartSession,
    storage::{CartStore, FileStorage, MemoryStorage, Storage, StorageError},
};
