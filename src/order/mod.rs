//! Orders
//!
//! Checkout-time views of the cart: the normalized item list sent to the
//! order API and the hand-off message sent to the shop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::Cart, products::ProductId};

mod message;

pub use message::{DEFAULT_STORE_NAME, HandoffMessage, handoff_message};

/// Shortest delivery address the order API accepts.
pub const MIN_DELIVERY_ADDRESS_LEN: usize = 10;

/// Checkout validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// There is nothing to order.
    #[error("cannot place an order for an empty cart")]
    EmptyCart,

    /// Customer name is required.
    #[error("customer name is required")]
    MissingName,

    /// Customer phone number is required.
    #[error("customer phone number is required")]
    MissingPhone,

    /// Delivery address is too short.
    #[error(
        "delivery address must be at least {min} characters, got {0}",
        min = MIN_DELIVERY_ADDRESS_LEN
    )]
    AddressTooShort(usize),

    /// An order line has no units.
    #[error("order line for product {0} has no quantity")]
    InvalidQuantity(ProductId),
}

/// Contact details collected at checkout. Never persisted with the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer name
    pub name: String,

    /// Phone number
    pub phone: String,

    /// Delivery address
    pub address: String,

    /// Free-text instructions
    #[serde(default)]
    pub notes: Option<String>,
}

impl CustomerInfo {
    /// Notes, if any non-blank text was given.
    pub fn notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }

    /// Check the fields the checkout form requires.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] for a blank name or phone, or an address
    /// shorter than [`MIN_DELIVERY_ADDRESS_LEN`].
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.name.trim().is_empty() {
            return Err(OrderError::MissingName);
        }

        if self.phone.trim().is_empty() {
            return Err(OrderError::MissingPhone);
        }

        check_address(&self.address)
    }
}

/// One order line as the order API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Units ordered
    pub quantity: u32,

    /// Chosen colour
    pub color: Option<String>,
}

/// Normalized order lines, one per cart line, in cart order.
pub fn order_items(cart: &Cart) -> Vec<OrderItem> {
    cart.iter()
        .map(|item| OrderItem {
            product_id: item.product_id(),
            quantity: item.quantity(),
            color: item.variant().map(str::to_string),
        })
        .collect()
}

/// Body of an order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// Order lines
    pub items: Vec<OrderItem>,

    /// Where to deliver
    pub delivery_address: String,

    /// Customer notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderSubmission {
    /// Build the request body for the current cart and customer.
    #[must_use]
    pub fn new(cart: &Cart, customer: &CustomerInfo) -> Self {
        Self {
            items: order_items(cart),
            delivery_address: customer.address.trim().to_string(),
            notes: customer.notes().map(str::to_string),
        }
    }

    /// Check the body against the order API's constraints.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] for an empty item list, a zero quantity or a
    /// short delivery address.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        if let Some(item) = self.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::InvalidQuantity(item.product_id));
        }

        check_address(&self.delivery_address)
    }
}

fn check_address(address: &str) -> Result<(), OrderError> {
    let len = address.trim().chars().count();

    if len < MIN_DELIVERY_ADDRESS_LEN {
        return Err(OrderError::AddressTooShort(len));
    }

    Ok(())
}
