//! # Menu Commands
//!
//! Loading `menu.json` and listing dishes by category.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use bunbo_core::menu::{category_label, Dish, Menu, ALL_CATEGORIES};

use crate::error::{ApiError, ApiResult};

/// One entry of the category filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub id: String,
    pub label: String,
}

/// Dishes visible under the current filters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    /// "Tất cả" first, then the menu's categories in order.
    pub categories: Vec<CategoryEntry>,
    pub dishes: Vec<Dish>,
}

/// Reads and parses the menu file.
///
/// ## Errors
/// - `NOT_FOUND` when the file does not exist
/// - `INTERNAL` when it cannot be read or parsed
pub fn load_menu(path: &Path) -> ApiResult<Menu> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::not_found("Menu file", &path.display().to_string())
        } else {
            ApiError::from(e)
        }
    })?;

    let menu = Menu::from_json(&raw)?;
    info!(
        path = %path.display(),
        dishes = menu.dishes.len(),
        branches = menu.branches.len(),
        "menu loaded"
    );
    Ok(menu)
}

/// Lists dishes, optionally narrowed to one category and to spicy dishes.
pub fn list_menu(menu: &Menu, category: Option<&str>, spicy_only: bool) -> MenuResponse {
    let category = category.unwrap_or(ALL_CATEGORIES);
    debug!(category, spicy_only, "list_menu command");

    let categories = std::iter::once(ALL_CATEGORIES)
        .chain(menu.categories())
        .map(|id| CategoryEntry {
            id: id.to_string(),
            label: category_label(id).to_string(),
        })
        .collect();

    MenuResponse {
        categories,
        dishes: menu.filter(category, spicy_only).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const MENU: &str = r#"{
        "dishes": [
            {"id": "dac-biet", "name": "Bún bò đặc biệt", "price": 65000, "category": "signature",
             "spicyLevel": "Cay vừa"},
            {"id": "chay", "name": "Bún bò chay", "price": 45000, "category": "vegetarian",
             "spicyLevel": "Không cay"},
            {"id": "gio", "name": "Bún giò", "price": 55000, "category": "signature"}
        ]
    }"#;

    #[test]
    fn test_load_menu_from_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("menu.json");
        std::fs::write(&path, MENU).unwrap();

        let menu = load_menu(&path).unwrap();
        assert_eq!(menu.dishes.len(), 3);
    }

    #[test]
    fn test_load_menu_missing_and_invalid() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("menu.json");

        let err = load_menu(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        std::fs::write(&path, "{\"dishes\": 5}").unwrap();
        let err = load_menu(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_list_menu_filters() {
        let menu = Menu::from_json(MENU).unwrap();

        let all = list_menu(&menu, None, false);
        assert_eq!(all.dishes.len(), 3);
        let labels: Vec<&str> = all.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Tất cả", "Đặc sắc", "Món chay"]);

        let signature = list_menu(&menu, Some("signature"), false);
        assert_eq!(signature.dishes.len(), 2);

        // "Không cay" contains "cay" but not "Cay".
        let spicy = list_menu(&menu, None, true);
        let ids: Vec<&str> = spicy.dishes.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["dac-biet"]);
    }
}
