//! Integration tests for the cart surviving restarts through the file store.

use std::{fs, sync::Arc};

use serde_json::{Value, json};
use testresult::TestResult;

use comanda::{
    menu::MenuItem,
    money::Price,
    restaurants::Restaurant,
    users::{Role, User},
};
use comanda_app::{
    carts::{CART_STORAGE_KEY, CartPersistence, CartService},
    notifications::TracingNotifier,
    session::Session,
    storage::{FileStore, KeyValueStore},
};

fn customer() -> Session {
    Session::signed_in(
        "token",
        User {
            id: "u7".into(),
            name: "Lucía".to_string(),
            email: "lucia@example.com".to_string(),
            role: Role::Client,
            phone: None,
            address: None,
            email_verified_at: None,
        },
    )
}

fn cart(store: &FileStore) -> CartService {
    CartService::new(
        CartPersistence::new(Arc::new(store.clone())),
        Arc::new(TracingNotifier),
    )
}

#[test]
fn cart_round_trips_through_disk() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path());
    let restaurant = Restaurant::new("r1", "Pardos").with_delivery_fee(Price::from_minor(500));

    let mut first = cart(&store);
    first.add_item(
        &customer(),
        MenuItem::new("a", "Pollo a la brasa", Price::from_minor(4590)),
        restaurant.clone(),
    )?;
    first.add_item(
        &customer(),
        MenuItem::new("b", "Inca Kola", Price::from_minor(800)),
        restaurant,
    )?;
    first.update_quantity(&"a".into(), 3);

    let second = cart(&store);

    assert_eq!(second.state().lines(), first.state().lines());
    assert_eq!(second.state().restaurant(), first.state().restaurant());
    assert_eq!(second.state().total(), Price::from_minor(14_570));

    Ok(())
}

#[test]
fn unparseable_record_loads_empty() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path());

    store.set(CART_STORAGE_KEY, "{{{ definitely not json")?;

    let loaded = cart(&store);

    assert!(loaded.state().is_empty());
    assert!(loaded.state().restaurant().is_none());
    assert_eq!(loaded.state().total(), Price::ZERO);

    Ok(())
}

#[test]
fn stored_total_is_recomputed() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path());

    let mut first = cart(&store);
    first.add_item(
        &customer(),
        MenuItem::new("a", "Tamal", Price::from_minor(600)),
        Restaurant::new("r1", "Pardos"),
    )?;

    let mut record: Value = serde_json::from_str(&store.get(CART_STORAGE_KEY)?.unwrap_or_default())?;
    record["total"] = json!("999.00");
    store.set(CART_STORAGE_KEY, &record.to_string())?;

    let second = cart(&store);

    assert_eq!(second.state().total(), Price::from_minor(600));

    Ok(())
}

#[test]
fn oversized_stored_price_loads_and_updates() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = FileStore::new(dir.path());
    let largest: Price = "79228162514264337593543950335".parse()?;

    store.set(
        CART_STORAGE_KEY,
        &json!({
            "items": [{
                "menu_item": { "id": "a", "name": "Banquete", "price": "79228162514264337593543950335" },
                "quantity": 2,
                "restaurant": { "id": "r1", "name": "Pardos" }
            }],
            "restaurant": { "id": "r1", "name": "Pardos" },
            "total": "0"
        })
        .to_string(),
    )?;

    let mut service = cart(&store);

    assert_eq!(service.item_count(), 2);
    assert_eq!(service.state().total(), largest);

    service.update_quantity(&"a".into(), i64::MAX);

    assert_eq!(service.item_count(), u64::from(u32::MAX));
    assert_eq!(service.state().total(), largest);
    assert_eq!(cart(&store).state().total(), largest);

    Ok(())
}

#[test]
fn unwritable_storage_keeps_mutations_in_memory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "")?;

    let store = FileStore::new(&blocker);
    let mut service = cart(&store);

    service.add_item(
        &customer(),
        MenuItem::new("a", "Tamal", Price::from_minor(600)),
        Restaurant::new("r1", "Pardos"),
    )?;

    assert_eq!(service.item_count(), 1);
    assert!(cart(&store).state().is_empty());

    Ok(())
}
