//! Cart Reducer

use crate::{
    cart::{CartLine, CartState, compute_total},
    menu::{MenuItem, MenuItemId},
    restaurants::Restaurant,
};

/// A requested cart transition.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit of a menu item.
    AddItem {
        /// Item to capture
        menu_item: MenuItem,
        /// Restaurant it is sold by
        restaurant: Restaurant,
    },

    /// Remove the line for a menu item.
    RemoveItem(MenuItemId),

    /// Set a line's quantity; zero or below removes it.
    UpdateQuantity {
        /// Line to update
        menu_item_id: MenuItemId,
        /// New absolute quantity
        quantity: i64,
    },

    /// Empty the cart.
    ClearCart,
}

/// Computes the next cart state.
///
/// Pure and total: every action yields a state, and actions that cannot apply
/// (an add from a second restaurant, an update for a missing line) return the
/// input unchanged.
#[must_use]
pub fn reduce(state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddItem {
            menu_item,
            restaurant,
        } => add_item(state, menu_item, restaurant),
        CartAction::RemoveItem(menu_item_id) => remove_item(state, &menu_item_id),
        CartAction::UpdateQuantity {
            menu_item_id,
            quantity,
        } => update_quantity(state, &menu_item_id, quantity),
        CartAction::ClearCart => CartState::default(),
    }
}

fn add_item(state: CartState, menu_item: MenuItem, restaurant: Restaurant) -> CartState {
    if state
        .restaurant
        .as_ref()
        .is_some_and(|current| current.id != restaurant.id)
    {
        return state;
    }

    let mut lines = state.lines;

    if let Some(line) = lines
        .iter_mut()
        .find(|line| line.menu_item.id == menu_item.id)
    {
        line.quantity = line.quantity.saturating_add(1);
    } else {
        lines.push(CartLine {
            menu_item,
            quantity: 1,
            restaurant: restaurant.clone(),
        });
    }

    CartState {
        total: compute_total(&lines),
        lines,
        restaurant: Some(restaurant),
    }
}

fn remove_item(state: CartState, menu_item_id: &MenuItemId) -> CartState {
    let mut lines = state.lines;

    lines.retain(|line| &line.menu_item.id != menu_item_id);

    CartState::from_parts(lines, state.restaurant)
}

fn update_quantity(state: CartState, menu_item_id: &MenuItemId, quantity: i64) -> CartState {
    if quantity <= 0 {
        return remove_item(state, menu_item_id);
    }

    let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
    let mut lines = state.lines;

    if let Some(line) = lines
        .iter_mut()
        .find(|line| &line.menu_item.id == menu_item_id)
    {
        line.quantity = quantity;
    }

    CartState {
        total: compute_total(&lines),
        lines,
        restaurant: state.restaurant,
    }
}

#[cfg(test)]
mod tests {
    use crate::money::Price;

    use super::*;

    fn item(id: &str, minor: i64) -> MenuItem {
        MenuItem::new(id, format!("Item {id}"), Price::from_minor(minor))
    }

    fn add(state: CartState, menu_item: &MenuItem, restaurant: &Restaurant) -> CartState {
        reduce(
            state,
            CartAction::AddItem {
                menu_item: menu_item.clone(),
                restaurant: restaurant.clone(),
            },
        )
    }

    fn update(state: CartState, id: &str, quantity: i64) -> CartState {
        reduce(
            state,
            CartAction::UpdateQuantity {
                menu_item_id: MenuItemId::from(id),
                quantity,
            },
        )
    }

    #[test]
    fn add_then_increment() {
        let restaurant = Restaurant::new("x", "Restaurant X");
        let item_a = item("a", 1000);

        let state = add(CartState::default(), &item_a, &restaurant);

        assert_eq!(state.len(), 1);
        assert_eq!(state.lines().first().map(|l| l.quantity), Some(1));
        assert_eq!(state.total(), Price::from_minor(1000));

        let state = add(state, &item_a, &restaurant);

        assert_eq!(state.len(), 1);
        assert_eq!(state.lines().first().map(|l| l.quantity), Some(2));
        assert_eq!(state.total(), Price::from_minor(2000));
        assert_eq!(state.restaurant().map(|r| r.id.as_str()), Some("x"));
    }

    #[test]
    fn add_from_other_restaurant_is_ignored() {
        let x = Restaurant::new("x", "Restaurant X");
        let y = Restaurant::new("y", "Restaurant Y");

        let before = add(CartState::default(), &item("a", 1000), &x);
        let after = add(before.clone(), &item("b", 500), &y);

        assert_eq!(after, before);
    }

    #[test]
    fn increment_keeps_captured_price() {
        let restaurant = Restaurant::new("x", "Restaurant X");

        let state = add(CartState::default(), &item("a", 1000), &restaurant);
        let state = add(state, &item("a", 9900), &restaurant);

        assert_eq!(
            state.lines().first().map(|l| l.menu_item.price),
            Some(Price::from_minor(1000))
        );
        assert_eq!(state.total(), Price::from_minor(2000));
    }

    #[test]
    fn lines_keep_insertion_order() {
        let restaurant = Restaurant::new("x", "Restaurant X");

        let state = add(CartState::default(), &item("b", 100), &restaurant);
        let state = add(state, &item("a", 100), &restaurant);
        let state = add(state, &item("b", 100), &restaurant);

        let ids: Vec<&str> = state
            .lines()
            .iter()
            .map(|line| line.menu_item.id.as_str())
            .collect();

        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn removing_last_line_clears_restaurant() {
        let restaurant = Restaurant::new("x", "Restaurant X");
        let state = add(CartState::default(), &item("a", 1000), &restaurant);

        let state = reduce(state, CartAction::RemoveItem(MenuItemId::from("a")));

        assert!(state.is_empty());
        assert!(state.restaurant().is_none());
        assert_eq!(state.total(), Price::ZERO);
    }

    #[test]
    fn removing_one_of_many_keeps_restaurant() {
        let restaurant = Restaurant::new("x", "Restaurant X");
        let state = add(CartState::default(), &item("a", 1000), &restaurant);
        let state = add(state, &item("b", 250), &restaurant);

        let state = reduce(state, CartAction::RemoveItem(MenuItemId::from("a")));

        assert_eq!(state.len(), 1);
        assert_eq!(state.restaurant().map(|r| r.id.as_str()), Some("x"));
        assert_eq!(state.total(), Price::from_minor(250));
    }

    #[test]
    fn update_quantity_is_absolute() {
        let restaurant = Restaurant::new("x", "Restaurant X");
        let state = add(CartState::default(), &item("a", 1250), &restaurant);
        let state = add(state, &item("a", 1250), &restaurant);

        let state = update(state, "a", 5);

        assert_eq!(state.line(&MenuItemId::from("a")).map(|l| l.quantity), Some(5));
        assert_eq!(state.total(), Price::from_minor(6250));
    }

    #[test]
    fn update_to_zero_or_below_removes_line() {
        let restaurant = Restaurant::new("x", "Restaurant X");

        for quantity in [0, -1, i64::MIN] {
            let state = add(CartState::default(), &item("a", 1000), &restaurant);
            let state = update(state, "a", quantity);

            assert!(
                state.line(&MenuItemId::from("a")).is_none(),
                "quantity {quantity} should remove the line"
            );
            assert!(state.restaurant().is_none());
        }
    }

    #[test]
    fn update_unknown_line_changes_nothing() {
        let restaurant = Restaurant::new("x", "Restaurant X");
        let before = add(CartState::default(), &item("a", 1000), &restaurant);

        let after = update(before.clone(), "missing", 3);

        assert_eq!(after, before);
    }

    #[test]
    fn update_clamps_huge_quantities() {
        let restaurant = Restaurant::new("x", "Restaurant X");
        let state = add(CartState::default(), &item("a", 1), &restaurant);

        let state = update(state, "a", i64::MAX);

        assert_eq!(state.item_count(), u64::from(u32::MAX));
    }

    #[test]
    fn clear_resets_everything() {
        let restaurant = Restaurant::new("x", "Restaurant X");
        let state = add(CartState::default(), &item("a", 1000), &restaurant);

        assert_eq!(reduce(state, CartAction::ClearCart), CartState::default());
    }

    #[test]
    fn clear_then_add_from_new_restaurant() {
        let x = Restaurant::new("x", "Restaurant X");
        let y = Restaurant::new("y", "Restaurant Y");

        let state = add(CartState::default(), &item("a", 1000), &x);
        let state = reduce(state, CartAction::ClearCart);
        let state = add(state, &item("b", 700), &y);

        assert_eq!(state.restaurant().map(|r| r.id.as_str()), Some("y"));
        assert_eq!(state.total(), Price::from_minor(700));
    }

    #[test]
    fn total_matches_lines_after_mixed_sequence() {
        let restaurant = Restaurant::new("x", "Restaurant X");

        let mut state = CartState::default();
        state = add(state, &item("a", 1050), &restaurant);
        state = add(state, &item("b", 399), &restaurant);
        state = add(state, &item("a", 1050), &restaurant);
        state = update(state, "b", 4);
        state = reduce(state, CartAction::RemoveItem(MenuItemId::from("c")));
        state = add(state, &item("c", 1), &restaurant);

        let expected: Price = state.lines().iter().map(CartLine::line_total).sum();

        assert_eq!(state.total(), expected);
        assert_eq!(state.total(), Price::from_minor(2100 + 1596 + 1));
        assert!(state.lines().iter().all(|line| line.quantity >= 1));
    }
}
