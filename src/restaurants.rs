//! Restaurants

use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, money::Price, users::UserId};

/// Restaurant Id
pub type RestaurantId = TypedId<Restaurant>;

/// A seller on the marketplace.
///
/// Only `id`, `delivery_fee` and `minimum_order` matter to the cart; the rest
/// is carried so a captured restaurant can still be rendered after a reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Restaurant id
    pub id: RestaurantId,

    /// Owning user
    #[serde(default)]
    pub owner_id: Option<UserId>,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Cuisine type
    #[serde(default)]
    pub cuisine_type: Option<String>,

    /// Street address
    #[serde(default)]
    pub address: Option<String>,

    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,

    /// Image reference
    #[serde(default)]
    pub image_url: Option<String>,

    /// Whether the restaurant is taking orders
    #[serde(default = "active_by_default")]
    pub is_active: bool,

    /// Flat delivery fee added at checkout
    #[serde(default)]
    pub delivery_fee: Price,

    /// Minimum subtotal required to place an order
    #[serde(default)]
    pub minimum_order: Price,
}

impl Restaurant {
    /// Creates a restaurant with the given id and name and no fees.
    pub fn new(id: impl Into<RestaurantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_id: None,
            name: name.into(),
            description: None,
            cuisine_type: None,
            address: None,
            phone: None,
            image_url: None,
            is_active: true,
            delivery_fee: Price::ZERO,
            minimum_order: Price::ZERO,
        }
    }

    /// Sets the delivery fee.
    #[must_use]
    pub fn with_delivery_fee(mut self, fee: Price) -> Self {
        self.delivery_fee = fee;
        self
    }

    /// Sets the minimum order amount.
    #[must_use]
    pub fn with_minimum_order(mut self, minimum: Price) -> Self {
        self.minimum_order = minimum;
        self
    }
}

fn active_by_default() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn deserializes_api_payload_with_string_fees() -> TestResult {
        let restaurant: Restaurant = serde_json::from_str(
            r#"{
                "id": 3,
                "owner_id": 11,
                "name": "La Canasta",
                "cuisine_type": "Criolla",
                "delivery_fee": "5.00",
                "minimum_order": 20,
                "created_at": "2025-01-01T00:00:00.000000Z"
            }"#,
        )?;

        assert_eq!(restaurant.id, RestaurantId::from("3"));
        assert_eq!(restaurant.owner_id, Some(UserId::from("11")));
        assert_eq!(restaurant.delivery_fee, Price::from_minor(500));
        assert_eq!(restaurant.minimum_order, Price::from_minor(2000));
        assert!(restaurant.is_active);

        Ok(())
    }

    #[test]
    fn missing_fees_default_to_zero() -> TestResult {
        let restaurant: Restaurant = serde_json::from_str(r#"{"id": "r1", "name": "Sushi Go"}"#)?;

        assert_eq!(restaurant.delivery_fee, Price::ZERO);
        assert_eq!(restaurant.minimum_order, Price::ZERO);

        Ok(())
    }
}
