//! Persisted cart records

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{PriceError, money_from_major, money_to_major},
    products::ProductId,
};

/// Reasons a stored record cannot become a line item.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record does not have the expected shape.
    #[error("malformed cart record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Stored lines always have a positive quantity.
    #[error("stored quantity {0} is not positive")]
    InvalidQuantity(i64),

    /// The stored price cannot be converted to money.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// A line item as written to storage.
///
/// Field names follow the storefront's existing storage layout so carts
/// written by earlier releases keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRecord {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Unit price in major currency units
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Image reference
    #[serde(default)]
    pub image: Option<String>,

    /// Quantity
    pub quantity: i64,

    /// Variant
    #[serde(default)]
    pub color: Option<String>,

    /// Stock snapshot
    #[serde(default)]
    pub stock: Option<u32>,
}

impl LineItemRecord {
    /// Rebuild the line item, pricing it in `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the quantity is not positive or the price
    /// cannot be represented.
    pub fn into_line_item(self, currency: &'static Currency) -> Result<LineItem, RecordError> {
        if self.quantity <= 0 {
            return Err(RecordError::InvalidQuantity(self.quantity));
        }

        let quantity = u32::try_from(self.quantity).unwrap_or(u32::MAX);
        let unit_price = money_from_major(self.price, currency)?;

        Ok(LineItem::new(self.id, self.name, unit_price, quantity)
            .with_image(self.image)
            .with_variant(self.color)
            .with_stock(self.stock))
    }
}

impl From<&LineItem> for LineItemRecord {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.product_id(),
            name: item.name().to_string(),
            price: money_to_major(item.unit_price()),
            image: item.image().map(str::to_string),
            quantity: i64::from(item.quantity()),
            color: item.variant().map(str::to_string),
            stock: item.stock(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::KES};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn record_reads_storefront_layout() -> TestResult {
        let raw = r#"{
            "id": 7,
            "name": "Chesterfield Sofa",
            "price": 45000,
            "image": "/uploads/sofa.jpg",
            "quantity": 2,
            "color": "Brown",
            "stock": 4
        }"#;

        let item = serde_json::from_str::<LineItemRecord>(raw)?.into_line_item(KES)?;

        assert_eq!(item.product_id(), ProductId::new(7));
        assert_eq!(item.unit_price(), &Money::from_minor(4_500_000, KES));
        assert_eq!(item.variant(), Some("Brown"));
        assert_eq!(item.image(), Some("/uploads/sofa.jpg"));
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.stock(), Some(4));

        Ok(())
    }

    #[test]
    fn null_fields_are_accepted() -> TestResult {
        let raw = r#"{"id": 3, "name": "Stool", "price": 1500, "image": null, "quantity": 1, "color": null, "stock": null}"#;

        let item = serde_json::from_str::<LineItemRecord>(raw)?.into_line_item(KES)?;

        assert_eq!(item.variant(), None);
        assert_eq!(item.image(), None);
        assert_eq!(item.stock(), None);

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() -> TestResult {
        let record: LineItemRecord =
            serde_json::from_str(r#"{"id": 3, "name": "Stool", "price": 1500, "quantity": 0}"#)?;

        assert!(matches!(
            record.into_line_item(KES),
            Err(RecordError::InvalidQuantity(0))
        ));

        Ok(())
    }

    #[test]
    fn record_from_line_item_uses_major_units() {
        let item = LineItem::new(ProductId::new(7), "Sofa", Money::from_minor(4_500_050, KES), 3)
            .with_variant(Some("Black".to_string()));

        let record = LineItemRecord::from(&item);

        assert_eq!(record.price, Decimal::new(4_500_050, 2));
        assert_eq!(record.quantity, 3);
        assert_eq!(record.color.as_deref(), Some("Black"));
    }
}
