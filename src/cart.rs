//! Cart
//!
//! The in-memory cart. Every operation is synchronous and infallible: unknown
//! identities are ignored and non-positive quantities are reinterpreted, so
//! the cart can always be driven straight from user input. Persistence lives
//! in [`crate::session`].

use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    items::{LineItem, merge_by_key},
    pricing::total_price,
    products::{Product, ProductId},
};

/// Ordered collection of line items, unique by identity key.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a cart from previously stored items.
    ///
    /// Duplicate identities are merged into their first position and items
    /// priced in another currency are dropped.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = LineItem>, currency: &'static Currency) -> Self {
        let items = items.into_iter().filter(|item| {
            let item_currency = item.unit_price().currency();

            if item_currency == currency {
                true
            } else {
                warn!(
                    product_id = %item.product_id(),
                    item_currency = item_currency.iso_alpha_code,
                    cart_currency = currency.iso_alpha_code,
                    "dropping cart item priced in another currency"
                );

                false
            }
        });

        Cart {
            items: merge_by_key(items),
            currency,
        }
    }

    /// Add `quantity` units of `product` in the given variant.
    ///
    /// An existing line with the same identity keeps its position and has its
    /// quantity increased; otherwise a new line is appended. A quantity of
    /// zero or below counts as one. Stock is not enforced here.
    ///
    /// Returns `false` only when the product is priced in another currency,
    /// in which case the cart is left untouched.
    pub fn add_item(&mut self, product: &Product, quantity: i64, variant: Option<&str>) -> bool {
        if product.price.currency() != self.currency {
            warn!(
                product_id = %product.id,
                product_currency = product.price.currency().iso_alpha_code,
                cart_currency = self.currency.iso_alpha_code,
                "ignoring product priced in another currency"
            );

            return false;
        }

        let quantity = addition_quantity(quantity);

        if let Some(existing) = self.find_mut(product.id, variant) {
            existing.add_quantity(quantity);

            debug!(
                product_id = %product.id,
                variant,
                quantity = existing.quantity(),
                "increased cart line quantity"
            );
        } else {
            self.items
                .push(LineItem::from_product(product, quantity, variant));

            debug!(product_id = %product.id, variant, quantity, "added cart line");
        }

        true
    }

    /// Remove the line with the given identity.
    ///
    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId, variant: Option<&str>) -> bool {
        let before = self.items.len();

        self.items.retain(|item| !item.matches(product_id, variant));

        let removed = self.items.len() != before;

        if removed {
            debug!(product_id = %product_id, variant, "removed cart line");
        }

        removed
    }

    /// Set the quantity of the line with the given identity.
    ///
    /// This is an absolute set, not a delta. A quantity of zero or below
    /// removes the line. Returns whether the cart changed.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        variant: Option<&str>,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id, variant);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.find_mut(product_id, variant) {
            Some(item) if item.quantity() != quantity => {
                item.set_quantity(quantity);

                debug!(product_id = %product_id, variant, quantity, "set cart line quantity");

                true
            }
            _ => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();

        debug!("cleared cart");
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity()))
            .sum()
    }

    /// Sum of every line total, recomputed on each call.
    pub fn subtotal(&self) -> Money<'static, Currency> {
        total_price(&self.items, self.currency)
    }

    /// Look up a line by identity.
    pub fn get(&self, product_id: ProductId, variant: Option<&str>) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.matches(product_id, variant))
    }

    /// Lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over the lines in display order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn find_mut(&mut self, product_id: ProductId, variant: Option<&str>) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.matches(product_id, variant))
    }
}

fn addition_quantity(quantity: i64) -> u32 {
    if quantity <= 0 {
        1
    } else {
        u32::try_from(quantity).unwrap_or(u32::MAX)
    }
}
