//! Items

use rusty_money::{Money, iso::Currency};

use crate::{
    pricing::line_total,
    products::{Product, ProductId},
};

/// Identity of a cart line: the product plus its optional variant.
///
/// A missing variant is an identity of its own, distinct from every named
/// variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    product_id: ProductId,
    variant: Option<String>,
}

impl ItemKey {
    /// Build a key from a product id and an optional variant.
    #[must_use]
    pub fn new(product_id: ProductId, variant: Option<&str>) -> Self {
        Self {
            product_id,
            variant: variant.map(str::to_string),
        }
    }

    /// Product part of the key.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Variant part of the key.
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}

/// One product/variant selection in the cart.
///
/// Name, price, image and stock are snapshots taken when the product was
/// first added; they are never refreshed from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    product_id: ProductId,
    name: String,
    unit_price: Money<'static, Currency>,
    image: Option<String>,
    quantity: u32,
    variant: Option<String>,
    stock: Option<u32>,
}

impl LineItem {
    /// Create a line item without variant, image or stock snapshot.
    ///
    /// A zero quantity is raised to one.
    #[must_use]
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money<'static, Currency>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            unit_price,
            image: None,
            quantity: quantity.max(1),
            variant: None,
            stock: None,
        }
    }

    /// Snapshot a product into a new line item.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32, variant: Option<&str>) -> Self {
        Self::new(product.id, product.name.clone(), product.price, quantity)
            .with_variant(variant.map(str::to_string))
            .with_image(product.primary_image().map(str::to_string))
            .with_stock(product.stock)
    }

    /// Set the variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Option<String>) -> Self {
        self.variant = variant;
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    /// Set the stock snapshot.
    #[must_use]
    pub fn with_stock(mut self, stock: Option<u32>) -> Self {
        self.stock = stock;
        self
    }

    /// Returns the identity key of this line.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            product_id: self.product_id,
            variant: self.variant.clone(),
        }
    }

    /// Whether this line has the given identity.
    pub fn matches(&self, product_id: ProductId, variant: Option<&str>) -> bool {
        self.product_id == product_id && self.variant.as_deref() == variant
    }

    /// Returns the product id
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price
    pub fn unit_price(&self) -> &Money<'static, Currency> {
        &self.unit_price
    }

    /// Returns the image reference
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the quantity, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the variant
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns the stock snapshot
    pub fn stock(&self) -> Option<u32> {
        self.stock
    }

    /// Price of the whole line.
    pub fn line_total(&self) -> Money<'static, Currency> {
        line_total(&self.unit_price, self.quantity)
    }

    /// How many more units the stock snapshot allows, if known.
    pub fn max_addable(&self) -> Option<u32> {
        self.stock
            .map(|stock| stock.saturating_sub(self.quantity))
    }

    /// Whether the quantity is above the stock snapshot.
    pub fn exceeds_stock(&self) -> bool {
        self.stock.is_some_and(|stock| self.quantity > stock)
    }

    pub(crate) fn add_quantity(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }
}

/// Collapse lines sharing an identity key into the first one, summing
/// quantities. Order of first appearance is kept.
pub fn merge_by_key(items: impl IntoIterator<Item = LineItem>) -> Vec<LineItem> {
    let mut merged: Vec<LineItem> = Vec::new();

    for item in items {
        match merged
            .iter_mut()
            .find(|existing| existing.matches(item.product_id, item.variant()))
        {
            Some(existing) => existing.add_quantity(item.quantity),
            None => merged.push(item),
        }
    }

    merged
}
