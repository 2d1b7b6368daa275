//! Hand-off message

use std::fmt;

use crate::{cart::Cart, order::CustomerInfo};

/// Store name used in the message heading.
pub const DEFAULT_STORE_NAME: &str = "Dan Classic Furniture";

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━";

/// Human-readable order summary for sending to the shop over chat.
///
/// The total printed is [`Cart::subtotal`] itself, and every line total is
/// [`crate::items::LineItem::line_total`], so the message cannot disagree
/// with the cart.
#[derive(Debug, Clone, Copy)]
pub struct HandoffMessage<'a> {
    cart: &'a Cart,
    customer: &'a CustomerInfo,
    store_name: &'a str,
}

impl<'a> HandoffMessage<'a> {
    /// Message for `cart` on behalf of `customer`.
    #[must_use]
    pub fn new(cart: &'a Cart, customer: &'a CustomerInfo) -> Self {
        Self {
            cart,
            customer,
            store_name: DEFAULT_STORE_NAME,
        }
    }

    /// Use a different store name in the heading.
    #[must_use]
    pub fn with_store_name(mut self, store_name: &'a str) -> Self {
        self.store_name = store_name;
        self
    }
}

impl fmt::Display for HandoffMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = self.customer;

        writeln!(f, "🛋️ *NEW ORDER - {}*", self.store_name)?;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "👤 Customer: {}", customer.name.trim())?;
        writeln!(f, "📱 Phone: {}", customer.phone.trim())?;
        writeln!(f, "📍 Location: {}", customer.address.trim())?;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "📦 *ORDER ITEMS:*")?;

        for item in self.cart.iter() {
            write!(f, "• {}", item.name())?;

            if let Some(variant) = item.variant() {
                write!(f, " ({variant})")?;
            }

            writeln!(f, " x{} = {}", item.quantity(), item.line_total())?;
        }

        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "💰 *TOTAL: {}*", self.cart.subtotal())?;
        write!(f, "{SEPARATOR}")?;

        if let Some(notes) = customer.notes() {
            write!(f, "\n📝 Notes: {notes}")?;
        }

        Ok(())
    }
}

/// Render the hand-off message for `cart` and `customer`.
pub fn handoff_message(cart: &Cart, customer: &CustomerInfo) -> String {
    HandoffMessage::new(cart, customer).to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::KES};

    use crate::products::{Product, ProductId};

    use super::*;

    fn customer(notes: Option<&str>) -> CustomerInfo {
        CustomerInfo {
            name: "Otieno".to_string(),
            phone: "0712345678".to_string(),
            address: "Moi Avenue, Mombasa".to_string(),
            notes: notes.map(str::to_string),
        }
    }

    fn total_line(message: &str) -> Option<&str> {
        message
            .lines()
            .find_map(|line| line.strip_prefix("💰 *TOTAL: "))
            .and_then(|rest| rest.strip_suffix('*'))
    }

    #[test]
    fn message_lists_customer_and_items() {
        let sofa = Product::new(ProductId::new(7), "Sofa", Money::from_minor(100_000, KES));
        let table = Product::new(ProductId::new(8), "Table", Money::from_minor(40_000, KES));

        let mut cart = Cart::new(KES);
        cart.add_item(&sofa, 3, Some("Brown"));
        cart.add_item(&table, 1, None);

        let message = handoff_message(&cart, &customer(Some("Call on arrival")));

        assert!(message.starts_with("🛋️ *NEW ORDER - Dan Classic Furniture*"));
        assert!(message.contains("👤 Customer: Otieno"));
        assert!(message.contains("📱 Phone: 0712345678"));
        assert!(message.contains("📍 Location: Moi Avenue, Mombasa"));
        assert!(message.contains(&format!(
            "• Sofa (Brown) x3 = {}",
            Money::from_minor(300_000, KES)
        )));
        assert!(message.contains(&format!("• Table x1 = {}", Money::from_minor(40_000, KES))));
        assert!(message.ends_with("📝 Notes: Call on arrival"));
    }

    #[test]
    fn message_total_matches_subtotal() {
        let sofa = Product::new(ProductId::new(7), "Sofa", Money::from_minor(123_456, KES));

        let mut cart = Cart::new(KES);
        cart.add_item(&sofa, 7, None);

        let message = handoff_message(&cart, &customer(None));
        let expected = cart.subtotal().to_string();

        assert_eq!(total_line(&message), Some(expected.as_str()));
    }

    #[test]
    fn empty_cart_message_totals_zero() {
        let cart = Cart::new(KES);

        let message = handoff_message(&cart, &customer(None));
        let expected = cart.subtotal().to_string();

        assert_eq!(total_line(&message), Some(expected.as_str()));
        assert!(!message.contains('•'));
        assert!(!message.contains("Notes"));
    }

    #[test]
    fn custom_store_name() {
        let cart = Cart::new(KES);
        let customer = customer(None);

        let message = HandoffMessage::new(&cart, &customer)
            .with_store_name("Mvule Interiors")
            .to_string();

        assert!(message.starts_with("🛋️ *NEW ORDER - Mvule Interiors*"));
    }
}
