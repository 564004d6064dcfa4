//! Menu endpoints.

use reqwest::Method;

use crate::models::{MenuItemPayload, MenuItemsRequest};

use super::{ApiClient, ApiError, CallOptions};

const MENU_ITEMS_PATH: &str = "/menu-items";

impl ApiClient {
    /// Fetch the menu items of the logged-in owner's bot
    pub async fn fetch_menu_items(&self) -> Result<Vec<MenuItemPayload>, ApiError> {
        let options = CallOptions::new("Failed to load menu items")
            .method(Method::GET)
            .token(self.stored_token());
        self.fetch(MENU_ITEMS_PATH, options).await?.json()
    }

    /// Replace the menu with `items`
    pub async fn save_menu_items(&self, items: &[MenuItemPayload]) -> Result<(), ApiError> {
        let options = CallOptions::new("Failed to save menu items")
            .token(self.stored_token())
            .wrap_req(false)
            .body(MenuItemsRequest { menu_items: items });
        self.fetch(MENU_ITEMS_PATH, options).await?;
        Ok(())
    }
}
