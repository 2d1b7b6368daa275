//! Checkout flow against the bundled furniture catalog.

use std::path::Path;

use rusty_money::iso::KES;
use settee::prelude::*;
use testresult::TestResult;

fn catalog() -> TestResult<Catalog> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog.yml");

    Ok(Catalog::from_path(&path, KES)?)
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        name: "Wanjiru Kamau".to_string(),
        phone: "+254 722 000 000".to_string(),
        address: "Kilimani, Argwings Kodhek Road, Nairobi".to_string(),
        notes: Some("Call on arrival".to_string()),
    }
}

fn filled_session(catalog: &Catalog) -> TestResult<CartSession<MemoryStorage>> {
    let mut session = CartSession::init(MemoryStorage::new(), &CartConfig::default());

    let table = catalog.get(ProductId::new(1))?;
    let shelf = catalog.get(ProductId::new(5))?;
    let sofa = catalog.get(ProductId::new(7))?;

    session.add_item(table, 2, Some("Mahogany"));
    session.add_item(shelf, 1, shelf.default_variant());
    session.add_item(sofa, 1, sofa.default_variant());

    Ok(session)
}

#[test]
fn catalog_fixture_loads() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.get(ProductId::new(7))?.default_variant(), Some("Brown"));
    assert!(!catalog.get(ProductId::new(4))?.is_in_stock());

    Ok(())
}

#[test]
fn subtotal_counts_fractional_prices() -> TestResult {
    let catalog = catalog()?;
    let session = filled_session(&catalog)?;

    assert_eq!(session.item_count(), 4);
    assert_eq!(session.subtotal().to_minor_units(), 30_499_950);

    Ok(())
}

#[test]
fn handoff_total_matches_subtotal() -> TestResult {
    let catalog = catalog()?;
    let session = filled_session(&catalog)?;
    let customer = customer();

    let message = session.handoff_message(&customer).to_string();

    assert!(message.contains(&format!("*TOTAL: {}*", session.subtotal())));
    assert!(message.contains("• Chesterfield Sofa (Brown) x1"));
    assert!(message.contains("• Bookshelf x1"));
    assert!(message.ends_with("📝 Notes: Call on arrival"));

    Ok(())
}

#[test]
fn order_submission_mirrors_cart_lines() -> TestResult {
    let catalog = catalog()?;
    let session = filled_session(&catalog)?;

    let submission = session.order_submission(&customer());

    submission.validate()?;

    let ids: Vec<u64> = submission
        .items
        .iter()
        .map(|item| item.product_id.get())
        .collect();

    assert_eq!(ids, [1, 5, 7]);
    assert_eq!(submission.items.first().map(|item| item.quantity), Some(2));
    assert_eq!(
        submission.items.last().and_then(|item| item.color.as_deref()),
        Some("Brown")
    );
    assert_eq!(submission.notes.as_deref(), Some("Call on arrival"));

    Ok(())
}

#[test]
fn emptied_cart_cannot_be_ordered() -> TestResult {
    let catalog = catalog()?;
    let mut session = filled_session(&catalog)?;

    session.clear();

    assert_eq!(
        session.order_submission(&customer()).validate(),
        Err(OrderError::EmptyCart)
    );

    Ok(())
}
