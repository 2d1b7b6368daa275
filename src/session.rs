//! Cart session
//!
//! The object the rest of the application talks to. A session is built
//! explicitly over a storage backend, hydrates its cart once on [`init`],
//! and writes the cart back after every mutating call.
//!
//! [`init`]: CartSession::init

use rusty_money::{Money, iso::Currency};
use tracing::{debug, instrument};

use crate::{
    cart::Cart,
    config::CartConfig,
    order::{CustomerInfo, HandoffMessage, OrderItem, OrderSubmission, order_items},
    products::{Product, ProductId},
    storage::{CartStore, Storage},
};

/// A cart bound to persistent storage, plus panel visibility.
#[derive(Debug)]
pub struct CartSession<S: Storage> {
    store: CartStore<S>,
    cart: Cart,
    is_open: bool,
}

impl<S: Storage> CartSession<S> {
    /// Start a session, loading whatever cart `storage` holds.
    ///
    /// Missing or corrupt stored data gives an empty cart.
    #[instrument(skip_all, fields(key = %config.storage_key))]
    pub fn init(storage: S, config: &CartConfig) -> Self {
        let store = CartStore::new(storage, config.storage_key.clone(), config.currency);
        let cart = Cart::with_items(store.load(), config.currency);

        debug!(lines = cart.len(), "cart session started");

        Self {
            store,
            cart,
            is_open: false,
        }
    }

    /// End the session, handing back the final cart.
    ///
    /// Every mutation has already been written through, so nothing is saved
    /// here.
    pub fn dispose(self) -> Cart {
        debug!(lines = self.cart.len(), "cart session ended");

        self.cart
    }

    /// Replace the in-memory cart with what storage currently holds.
    ///
    /// Useful when another session shares the same backend.
    pub fn reload(&mut self) {
        self.cart = Cart::with_items(self.store.load(), self.cart.currency());
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Storage-facing side of the session.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// See [`Cart::add_item`].
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_item(&mut self, product: &Product, quantity: i64, variant: Option<&str>) -> bool {
        let changed = self.cart.add_item(product, quantity, variant);
        self.persist();
        changed
    }

    /// See [`Cart::remove_item`].
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: ProductId, variant: Option<&str>) -> bool {
        let changed = self.cart.remove_item(product_id, variant);
        self.persist();
        changed
    }

    /// See [`Cart::update_quantity`].
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
        variant: Option<&str>,
    ) -> bool {
        let changed = self.cart.update_quantity(product_id, quantity, variant);
        self.persist();
        changed
    }

    /// Add one unit to an existing line. No-op if the line is absent.
    pub fn increment(&mut self, product_id: ProductId, variant: Option<&str>) -> bool {
        self.step(product_id, variant, 1)
    }

    /// Take one unit off an existing line, removing it at zero.
    pub fn decrement(&mut self, product_id: ProductId, variant: Option<&str>) -> bool {
        self.step(product_id, variant, -1)
    }

    /// See [`Cart::clear`].
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// See [`Cart::item_count`].
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// See [`Cart::subtotal`].
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.cart.subtotal()
    }

    /// Order lines for the current cart.
    pub fn order_items(&self) -> Vec<OrderItem> {
        order_items(&self.cart)
    }

    /// Order creation body for the current cart.
    pub fn order_submission(&self, customer: &CustomerInfo) -> OrderSubmission {
        OrderSubmission::new(&self.cart, customer)
    }

    /// Hand-off message for the current cart.
    pub fn handoff_message<'a>(&'a self, customer: &'a CustomerInfo) -> HandoffMessage<'a> {
        HandoffMessage::new(&self.cart, customer)
    }

    /// Show the cart panel.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart panel.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Flip the cart panel.
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Whether the cart panel is shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    fn step(&mut self, product_id: ProductId, variant: Option<&str>, delta: i64) -> bool {
        let Some(current) = self.cart.get(product_id, variant).map(|item| item.quantity()) else {
            return false;
        };

        self.update_quantity(product_id, i64::from(current) + delta, variant)
    }

    fn persist(&self) {
        self.store.save(self.cart.items());
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::KES;
    use testresult::TestResult;

    use crate::storage::{CART_STORAGE_KEY, MemoryStorage};

    use super::*;

    fn sofa() -> Product {
        Product::new(ProductId::new(7), "Sofa", Money::from_minor(100_000, KES))
    }

    fn stored(storage: &MemoryStorage) -> TestResult<Option<String>> {
        Ok(storage.get_item(CART_STORAGE_KEY)?)
    }

    #[test]
    fn init_on_empty_storage_starts_empty_and_closed() {
        let session = CartSession::init(MemoryStorage::new(), &CartConfig::default());

        assert!(session.cart().is_empty());
        assert!(!session.is_open());
    }

    #[test]
    fn every_mutation_writes_through() -> TestResult {
        let storage = MemoryStorage::new();
        let mut session = CartSession::init(storage.clone(), &CartConfig::default());

        session.add_item(&sofa(), 2, Some("Brown"));
        assert!(stored(&storage)?.is_some_and(|raw| raw.contains("\"quantity\":2")));

        session.update_quantity(ProductId::new(7), 5, Some("Brown"));
        assert!(stored(&storage)?.is_some_and(|raw| raw.contains("\"quantity\":5")));

        session.clear();
        assert_eq!(stored(&storage)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn increment_and_decrement_step_quantity() {
        let mut session = CartSession::init(MemoryStorage::new(), &CartConfig::default());

        session.add_item(&sofa(), 1, None);

        assert!(session.increment(ProductId::new(7), None));
        assert_eq!(session.item_count(), 2);

        session.decrement(ProductId::new(7), None);
        session.decrement(ProductId::new(7), None);

        assert!(session.cart().is_empty());
        assert!(!session.decrement(ProductId::new(7), None));
    }

    #[test]
    fn visibility_flag() {
        let mut session = CartSession::init(MemoryStorage::new(), &CartConfig::default());

        session.open();
        assert!(session.is_open());

        session.toggle();
        assert!(!session.is_open());

        session.toggle();
        session.close();
        assert!(!session.is_open());
    }

    #[test]
    fn dispose_returns_cart_and_keeps_storage() {
        let storage = MemoryStorage::new();
        let mut session = CartSession::init(storage.clone(), &CartConfig::default());

        session.add_item(&sofa(), 1, None);

        let cart = session.dispose();
        let resumed = CartSession::init(storage, &CartConfig::default());

        assert_eq!(resumed.cart(), &cart);
    }

    #[test]
    fn checkout_views_use_current_cart() {
        let mut session = CartSession::init(MemoryStorage::new(), &CartConfig::default());
        let customer = CustomerInfo {
            name: "Akinyi".to_string(),
            phone: "0722000000".to_string(),
            address: "Ngong Road, Nairobi".to_string(),
            notes: None,
        };

        session.add_item(&sofa(), 2, None);

        assert_eq!(session.order_items().len(), 1);
        assert_eq!(session.order_submission(&customer).validate(), Ok(()));
        assert!(
            session
                .handoff_message(&customer)
                .to_string()
                .contains(&session.subtotal().to_string())
        );
    }
}
