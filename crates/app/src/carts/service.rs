//! Cart service.
//!
//! Owns the in-memory cart. Mutations go through four entry points that check
//! preconditions, dispatch to the pure reducer, persist the resulting state,
//! and tell the user what happened.

use std::sync::Arc;

use comanda::{
    cart::{CartAction, CartState, reduce},
    menu::{MenuItem, MenuItemId},
    restaurants::Restaurant,
};
use tracing::debug;

use crate::{
    carts::{CartError, CartPersistence},
    notifications::{Notification, Notifier},
    session::{Session, SessionError},
};

#[derive(Debug)]
pub struct CartService {
    state: CartState,
    persistence: CartPersistence,
    notifier: Arc<dyn Notifier>,
}

impl CartService {
    /// Creates the service, restoring whatever cart was stored last.
    pub fn new(persistence: CartPersistence, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: persistence.load(),
            persistence,
            notifier,
        }
    }

    /// Current cart snapshot.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Units in the cart, for badge display.
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// Adds one unit of `menu_item`.
    ///
    /// # Errors
    ///
    /// - [`CartError::Session`] when nobody is signed in or the user isn't a customer.
    /// - [`CartError::DifferentRestaurant`] when the cart holds another restaurant's items.
    pub fn add_item(
        &mut self,
        session: &Session,
        menu_item: MenuItem,
        restaurant: Restaurant,
    ) -> Result<(), CartError> {
        if let Err(error) = session.require_customer() {
            self.notifier.notify(&match error {
                SessionError::NotSignedIn => Notification::SignInRequired,
                SessionError::Forbidden(_) => Notification::CustomersOnly,
            });

            return Err(error.into());
        }

        if let Some(current) = self
            .state
            .restaurant()
            .filter(|current| current.id != restaurant.id)
        {
            let error = CartError::DifferentRestaurant {
                current: current.id.clone(),
                requested: restaurant.id,
            };

            self.notifier.notify(&Notification::SingleRestaurantOnly);

            return Err(error);
        }

        let name = menu_item.name.clone();

        self.dispatch(CartAction::AddItem {
            menu_item,
            restaurant,
        });

        self.notifier.notify(&Notification::ItemAdded { name });

        Ok(())
    }

    /// Removes the line for `menu_item_id`. Announced only when a line was
    /// actually removed.
    pub fn remove_item(&mut self, menu_item_id: &MenuItemId) {
        if self.dispatch(CartAction::RemoveItem(menu_item_id.clone())) {
            self.notifier.notify(&Notification::ItemRemoved);
        }
    }

    /// Sets a line's quantity; zero or below removes the line. Silent.
    pub fn update_quantity(&mut self, menu_item_id: &MenuItemId, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            menu_item_id: menu_item_id.clone(),
            quantity,
        });
    }

    /// Empties the cart. Silent; callers announce why.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartAction::ClearCart);
    }

    /// Returns whether the state changed.
    fn dispatch(&mut self, action: CartAction) -> bool {
        let next = reduce(self.state.clone(), action);

        if next == self.state {
            return false;
        }

        self.state = next;

        debug!(
            lines = self.state.len(),
            items = self.state.item_count(),
            total = %self.state.total(),
            "cart changed"
        );

        self.persistence.save(&self.state);

        true
    }
}

#[cfg(test)]
mod tests {
    use comanda::{money::Price, restaurants::RestaurantId};
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        carts::CART_STORAGE_KEY,
        notifications::MockNotifier,
        session::fixtures::{customer, owner},
        storage::{KeyValueStore, MemoryStore, MockKeyValueStore, StorageError},
    };

    use super::*;

    fn item(id: &str, minor: i64) -> MenuItem {
        MenuItem::new(id, format!("Plato {id}"), Price::from_minor(minor))
    }

    fn restaurant(id: &str) -> Restaurant {
        Restaurant::new(id, format!("Restaurante {id}"))
    }

    fn quiet_notifier() -> Arc<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        Arc::new(notifier)
    }

    fn service(store: &MemoryStore) -> CartService {
        CartService::new(
            CartPersistence::new(Arc::new(store.clone())),
            quiet_notifier(),
        )
    }

    #[test]
    fn add_notifies_with_item_name() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq(Notification::ItemAdded {
                name: "Plato a".to_string(),
            }))
            .times(1)
            .return_const(());

        let mut cart = CartService::new(
            CartPersistence::new(Arc::new(MemoryStore::new())),
            Arc::new(notifier),
        );

        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;

        assert_eq!(cart.state().total(), Price::from_minor(1000));

        Ok(())
    }

    #[test]
    fn cross_restaurant_add_is_rejected_and_announced() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| matches!(n, Notification::ItemAdded { .. }))
            .times(1)
            .return_const(());
        notifier
            .expect_notify()
            .with(eq(Notification::SingleRestaurantOnly))
            .times(1)
            .return_const(());

        let mut cart = CartService::new(
            CartPersistence::new(Arc::new(MemoryStore::new())),
            Arc::new(notifier),
        );

        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;
        let before = cart.state().clone();

        let result = cart.add_item(&customer(), item("b", 500), restaurant("y"));

        assert_eq!(
            result,
            Err(CartError::DifferentRestaurant {
                current: RestaurantId::from("x"),
                requested: RestaurantId::from("y"),
            })
        );
        assert_eq!(cart.state(), &before);

        Ok(())
    }

    #[test]
    fn rejected_add_does_not_touch_storage() -> TestResult {
        let store = MemoryStore::new();
        let mut cart = service(&store);

        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;
        let stored = store.get(CART_STORAGE_KEY)?;

        let _rejected = cart.add_item(&customer(), item("b", 500), restaurant("y"));

        assert_eq!(store.get(CART_STORAGE_KEY)?, stored);

        Ok(())
    }

    #[test]
    fn anonymous_add_is_rejected() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq(Notification::SignInRequired))
            .times(1)
            .return_const(());

        let mut cart = CartService::new(
            CartPersistence::new(Arc::new(MemoryStore::new())),
            Arc::new(notifier),
        );

        let result = cart.add_item(&Session::anonymous(), item("a", 1000), restaurant("x"));

        assert_eq!(result, Err(CartError::Session(SessionError::NotSignedIn)));
        assert!(cart.state().is_empty());
    }

    #[test]
    fn owner_add_is_rejected() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq(Notification::CustomersOnly))
            .times(1)
            .return_const(());

        let mut cart = CartService::new(
            CartPersistence::new(Arc::new(MemoryStore::new())),
            Arc::new(notifier),
        );

        let result = cart.add_item(&owner(), item("a", 1000), restaurant("x"));

        assert!(matches!(
            result,
            Err(CartError::Session(SessionError::Forbidden(_)))
        ));
        assert!(cart.state().is_empty());
    }

    #[test]
    fn remove_notifies_but_update_and_clear_are_silent() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| matches!(n, Notification::ItemAdded { .. }))
            .times(2)
            .return_const(());
        notifier
            .expect_notify()
            .with(eq(Notification::ItemRemoved))
            .times(1)
            .return_const(());

        let mut cart = CartService::new(
            CartPersistence::new(Arc::new(MemoryStore::new())),
            Arc::new(notifier),
        );

        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;
        cart.add_item(&customer(), item("b", 200), restaurant("x"))?;
        cart.update_quantity(&"a".into(), 4);
        cart.remove_item(&"b".into());
        cart.clear_cart();

        assert!(cart.state().is_empty());

        Ok(())
    }

    #[test]
    fn removing_an_absent_item_is_silent() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| matches!(n, Notification::ItemAdded { .. }))
            .times(1)
            .return_const(());
        notifier
            .expect_notify()
            .with(eq(Notification::ItemRemoved))
            .never();

        let mut cart = CartService::new(
            CartPersistence::new(Arc::new(MemoryStore::new())),
            Arc::new(notifier),
        );

        cart.remove_item(&"a".into());
        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;
        cart.remove_item(&"missing".into());

        assert_eq!(cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn debug_includes_cart_contents() -> TestResult {
        let mut cart = service(&MemoryStore::new());
        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;

        let debug = format!("{cart:?}");

        assert!(debug.starts_with("CartService"));
        assert!(debug.contains("Plato a"));

        Ok(())
    }

    #[test]
    fn every_change_is_persisted() -> TestResult {
        let store = MemoryStore::new();
        let mut cart = service(&store);

        cart.add_item(&customer(), item("a", 1250), restaurant("x"))?;
        cart.update_quantity(&"a".into(), 3);

        let reloaded = service(&store);

        assert_eq!(reloaded.state(), cart.state());
        assert_eq!(reloaded.item_count(), 3);
        assert_eq!(reloaded.state().total(), Price::from_minor(3750));

        cart.clear_cart();

        assert!(service(&store).state().is_empty());

        Ok(())
    }

    #[test]
    fn update_to_zero_removes_line_and_restaurant() -> TestResult {
        let store = MemoryStore::new();
        let mut cart = service(&store);

        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;
        cart.update_quantity(&"a".into(), 0);

        assert!(cart.state().is_empty());
        assert!(cart.state().restaurant().is_none());

        Ok(())
    }

    #[test]
    fn storage_failure_does_not_block_mutation() -> TestResult {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_set()
            .returning(|_, _| Err(StorageError::Unavailable("quota exceeded".to_string())));

        let mut cart = CartService::new(CartPersistence::new(Arc::new(store)), quiet_notifier());

        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;
        cart.add_item(&customer(), item("a", 1000), restaurant("x"))?;

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.state().total(), Price::from_minor(2000));

        Ok(())
    }

    #[test]
    fn no_op_transitions_skip_the_write() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_set().never();

        let mut cart = CartService::new(CartPersistence::new(Arc::new(store)), quiet_notifier());

        cart.clear_cart();
        cart.update_quantity(&"missing".into(), 2);
    }
}
