//! Menu Items

use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, money::Price, restaurants::RestaurantId};

/// Menu Item Id
pub type MenuItemId = TypedId<MenuItem>;

/// A purchasable product on a restaurant's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Menu item id
    pub id: MenuItemId,

    /// Owning restaurant
    #[serde(default)]
    pub restaurant_id: Option<RestaurantId>,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Unit price, normalised from number or numeric string
    #[serde(default)]
    pub price: Price,

    /// Menu category
    #[serde(default)]
    pub category: Option<String>,

    /// Image reference
    #[serde(default)]
    pub image_url: Option<String>,

    /// Whether the item can currently be ordered
    #[serde(default = "available_by_default")]
    pub is_available: bool,

    /// Preparation time in minutes
    #[serde(default)]
    pub preparation_time: Option<u32>,
}

impl MenuItem {
    /// Creates an available menu item.
    pub fn new(id: impl Into<MenuItemId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            restaurant_id: None,
            name: name.into(),
            description: None,
            price,
            category: None,
            image_url: None,
            is_available: true,
            preparation_time: None,
        }
    }
}

fn available_by_default() -> bool {
    true
}
