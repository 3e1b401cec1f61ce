//! Cart store behaviour against a real file slot

use rust_decimal::Decimal;
use std::fs;
use storefront_cart::{Catalog, CartStore, FileStorage, Size};
use testresult::TestResult;

#[test]
fn cart_survives_reopen() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = Catalog::builtin()?;
    let hoodie = catalog.get("2").ok_or("hoodie missing")?;
    let mug = catalog.get("5").ok_or("mug missing")?;

    let mut store = CartStore::open(FileStorage::new(dir.path(), "cart")?);
    store.add_line(hoodie, Some(Size::Medium), Some("Black"));
    store.add_line(hoodie, Some(Size::Large), Some("Black"));
    store.add_line(mug, None, Some("White"));
    store.add_line(mug, None, Some("White"));
    store.update_quantity("2", -1, Some(Size::Large), Some("Black"));

    let reopened = CartStore::open(FileStorage::new(dir.path(), "cart")?);
    assert_eq!(reopened.cart(), store.cart());
    assert_eq!(reopened.lines().len(), 2);
    assert_eq!(reopened.item_count(), 3);
    assert_eq!(reopened.subtotal(), Decimal::new(8897, 2));
    Ok(())
}

#[test]
fn worked_example_against_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = Catalog::builtin()?;
    let hoodie = catalog.get("2").ok_or("hoodie missing")?;

    let mut store = CartStore::open(FileStorage::new(dir.path(), "cart")?);
    store.add_line(hoodie, None, Some("Black"));
    store.add_line(hoodie, None, Some("Black"));
    assert_eq!(store.subtotal(), Decimal::new(10998, 2));

    store.set_discount(Decimal::new(1, 1));
    assert_eq!(store.total(), Decimal::new(98982, 3));

    store.update_quantity("2", 1, None, Some("Black"));
    assert_eq!(store.subtotal(), Decimal::new(5499, 2));
    assert_eq!(store.total(), Decimal::new(49491, 3));

    let persisted: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("cart.json"))?)?;
    assert_eq!(persisted[0]["id"], "2");
    assert_eq!(persisted[0]["quantity"], 1);
    assert_eq!(persisted[0]["selectedColor"], "Black");
    assert!(persisted[0].get("selectedSize").is_none());
    Ok(())
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("cart.json"), "{ truncated")?;

    let mut store = CartStore::open(FileStorage::new(dir.path(), "cart")?);
    assert!(store.is_empty());

    store.clear();
    assert_eq!(fs::read_to_string(dir.path().join("cart.json"))?, "[]");
    Ok(())
}

#[test]
fn separate_keys_hold_separate_carts() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = Catalog::builtin()?;
    let tote = catalog.get("4").ok_or("tote missing")?;

    let mut guest = CartStore::open(FileStorage::new(dir.path(), "guest")?);
    guest.add_line(tote, None, Some("Natural"));

    let member = CartStore::open(FileStorage::new(dir.path(), "member")?);
    assert!(member.is_empty());
    assert_eq!(CartStore::open(FileStorage::new(dir.path(), "guest")?).item_count(), 1);
    Ok(())
}
