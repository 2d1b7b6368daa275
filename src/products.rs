//! Products

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::pricing::{PriceError, money_from_major};

/// Catalog product identifier, assigned by the store API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw API identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product as returned by the store API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Price in major currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Price before discount, if the product is on offer
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub compare_price: Option<Decimal>,

    /// Image paths, first one is the primary image
    #[serde(default)]
    pub images: Vec<String>,

    /// Remaining stock reported by the API
    #[serde(default)]
    pub stock: u32,

    /// Available colours
    #[serde(default)]
    pub colors: Vec<String>,
}

impl ProductRecord {
    /// Convert the API record into a product priced in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if the price or compare price is negative or
    /// cannot be represented in the currency's minor units.
    pub fn into_product(self, currency: &'static Currency) -> Result<Product, PriceError> {
        let price = money_from_major(self.price, currency)?;

        let compare_price = self
            .compare_price
            .map(|amount| money_from_major(amount, currency))
            .transpose()?;

        Ok(Product {
            id: self.id,
            name: self.name,
            price,
            compare_price,
            images: self.images,
            stock: Some(self.stock),
            colors: self.colors,
        })
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money<'static, Currency>,

    /// Price before discount
    pub compare_price: Option<Money<'static, Currency>>,

    /// Product images
    pub images: Vec<String>,

    /// Stock snapshot, `None` when the source did not report one
    pub stock: Option<u32>,

    /// Available colours
    pub colors: Vec<String>,
}

impl Product {
    /// Create a product with no images, colours or stock information.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Money<'static, Currency>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            compare_price: None,
            images: Vec::new(),
            stock: None,
            colors: Vec::new(),
        }
    }

    /// The image shown for this product in the cart.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// The colour preselected on the product page.
    pub fn default_variant(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    /// Whether the product can be ordered at all.
    pub fn is_in_stock(&self) -> bool {
        self.stock.is_none_or(|stock| stock > 0)
    }

    /// Whether the product is offered below its compare price.
    pub fn is_discounted(&self) -> bool {
        self.compare_price
            .as_ref()
            .is_some_and(|compare| compare.to_minor_units() > self.price.to_minor_units())
    }
}
