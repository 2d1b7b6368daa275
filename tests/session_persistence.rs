//! Cart sessions over shared and file-backed storage.

use rusty_money::{Money, iso::KES};
use settee::{prelude::*, storage::CART_STORAGE_KEY};
use testresult::TestResult;

fn sofa() -> Product {
    let mut product = Product::new(
        ProductId::new(7),
        "Chesterfield Sofa",
        Money::from_minor(12_000_000, KES),
    );

    product.colors = vec!["Brown".to_string(), "Black".to_string()];
    product.stock = Some(3);

    product
}

fn ottoman() -> Product {
    Product::new(ProductId::new(3), "Velvet Ottoman", Money::from_minor(800_000, KES))
}

#[test]
fn cart_survives_a_restart() {
    let storage = MemoryStorage::new();
    let config = CartConfig::default();

    let mut first = CartSession::init(storage.clone(), &config);
    first.add_item(&sofa(), 2, Some("Brown"));
    first.add_item(&ottoman(), 1, None);
    let before = first.dispose();

    let second = CartSession::init(storage, &config);

    assert_eq!(second.cart(), &before);
    assert_eq!(second.item_count(), 3);
    assert_eq!(second.subtotal().to_minor_units(), 24_800_000);
}

#[test]
fn last_writer_wins_until_reload() {
    let storage = MemoryStorage::new();
    let config = CartConfig::default();

    let mut left = CartSession::init(storage.clone(), &config);
    let mut right = CartSession::init(storage.clone(), &config);

    left.add_item(&sofa(), 1, Some("Brown"));
    right.add_item(&ottoman(), 4, None);

    // Right saved last, so only its view is stored.
    let fresh = CartSession::init(storage, &config);
    assert!(fresh.cart().get(ProductId::new(7), Some("Brown")).is_none());
    assert_eq!(fresh.item_count(), 4);

    left.reload();
    assert_eq!(left.cart(), right.cart());
}

#[test]
fn file_storage_round_trip() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = CartConfig::default();

    let mut session = CartSession::init(FileStorage::new(dir.path()), &config);
    session.add_item(&sofa(), 1, Some("Black"));
    session.update_quantity(ProductId::new(7), 2, Some("Black"));
    let before = session.dispose();

    assert!(dir.path().join(format!("{CART_STORAGE_KEY}.json")).exists());

    let resumed = CartSession::init(FileStorage::new(dir.path()), &config);

    assert_eq!(resumed.cart(), &before);

    Ok(())
}

#[test]
fn corrupt_file_gives_empty_cart_and_is_overwritten() -> TestResult {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::new(dir.path());
    let config = CartConfig::default();

    storage.set_item(CART_STORAGE_KEY, "{ not json")?;

    let mut session = CartSession::init(FileStorage::new(dir.path()), &config);
    assert!(session.cart().is_empty());

    session.add_item(&ottoman(), 1, None);

    let raw = storage.get_item(CART_STORAGE_KEY)?.unwrap_or_default();
    assert!(raw.starts_with('['));
    assert!(raw.contains("\"Velvet Ottoman\""));

    Ok(())
}

#[test]
fn drifted_records_are_dropped_or_merged() -> TestResult {
    let storage = MemoryStorage::new();

    storage.set_item(
        CART_STORAGE_KEY,
        r#"[
            {"id": 3, "name": "Velvet Ottoman", "price": 8000, "quantity": 1},
            {"id": 3, "name": "Velvet Ottoman", "price": 8000, "quantity": 2},
            {"id": 9, "name": "No Price", "quantity": 1},
            {"id": 10, "name": "Zero", "price": 100, "quantity": 0},
            "junk"
        ]"#,
    )?;

    let session = CartSession::init(storage, &CartConfig::default());

    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.item_count(), 3);

    Ok(())
}
