//! Summary tables
//!
//! Plain-text renderings of the cart and the catalog for terminals.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};

use crate::{cart::Cart, catalog::Catalog};

/// Write the cart as a table followed by its totals.
///
/// # Errors
///
/// Returns an IO error if writing to `out` fails.
pub fn write_cart(mut out: impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty");
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Colour", "Unit Price", "Qty", "Line Total"]);

    for (index, item) in cart.iter().enumerate() {
        let stock_note = if item.exceeds_stock() { " (low stock)" } else { "" };

        builder.push_record([
            format!("#{}", index + 1),
            format!("{}{stock_note}", item.name()),
            item.variant().unwrap_or("-").to_string(),
            item.unit_price().to_string(),
            item.quantity().to_string(),
            item.line_total().to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "Items:    {}", cart.item_count())?;
    writeln!(out, "Subtotal: {}", cart.subtotal())
}

/// Write the catalog as a table.
///
/// # Errors
///
/// Returns an IO error if writing to `out` fails.
pub fn write_catalog(mut out: impl io::Write, catalog: &Catalog) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price", "Was", "Stock", "Colours"]);

    for product in catalog.iter() {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.price.to_string(),
            product
                .compare_price
                .as_ref()
                .filter(|_| product.is_discounted())
                .map(|price| price.to_string())
                .unwrap_or_default(),
            product
                .stock
                .map_or_else(|| "-".to_string(), |stock| stock.to_string()),
            product.colors.join(", "),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")
}
