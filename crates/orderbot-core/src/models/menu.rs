use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPayload {
    pub name: String,
    pub price: f64,
    pub status: String,
}

impl MenuItemPayload {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

/// Body of `PUT /menu-items`
#[derive(Debug, Clone, Serialize)]
pub struct MenuItemsRequest<'a> {
    #[serde(rename = "menuItems")]
    pub menu_items: &'a [MenuItemPayload],
}
