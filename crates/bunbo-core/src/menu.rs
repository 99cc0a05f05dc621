//! # Menu Catalog
//!
//! Parsed form of the storefront's `menu.json`: the dishes a customer can
//! put in the cart and the branches an order can be sent to.
//!
//! Parsing lives here; reading the file is the app's job.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineCandidate, Variant};

/// Category filter value that matches every dish.
pub const ALL_CATEGORIES: &str = "all";

/// Substring of `spicyLevel` that marks a dish as spicy ("Cay").
const SPICY_MARKER: &str = "Cay";

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub price: Money,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub spicy_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,
}

impl Dish {
    pub fn is_spicy(&self) -> bool {
        self.spicy_level
            .as_deref()
            .is_some_and(|level| level.contains(SPICY_MARKER))
    }

    /// The candidate a menu card offers to the cart.
    pub fn to_candidate(&self) -> LineCandidate {
        LineCandidate {
            id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            thumbnail: self.image.clone(),
            variant: Variant {
                spicy_level: self.spicy_level.clone(),
                size: None,
            },
        }
    }
}

/// A restaurant branch that can fulfil an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub hours: Option<String>,
}

/// The whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub branches: Vec<Branch>,
}

impl Menu {
    /// Parses a `menu.json` document.
    pub fn from_json(raw: &str) -> CoreResult<Self> {
        serde_json::from_str(raw).map_err(CoreError::Menu)
    }

    pub fn dish(&self, id: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    /// Like [`Menu::dish`] but an unknown id is an error.
    pub fn require_dish(&self, id: &str) -> CoreResult<&Dish> {
        self.dish(id)
            .ok_or_else(|| CoreError::DishNotFound(id.to_string()))
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    /// Unique categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for dish in &self.dishes {
            if !seen.contains(&dish.category.as_str()) {
                seen.push(&dish.category);
            }
        }
        seen
    }

    /// Dishes matching a category (or [`ALL_CATEGORIES`]) and, optionally,
    /// only the spicy ones.
    pub fn filter<'a>(
        &'a self,
        category: &'a str,
        spicy_only: bool,
    ) -> impl Iterator<Item = &'a Dish> {
        self.dishes.iter().filter(move |dish| {
            let category_ok = category == ALL_CATEGORIES || dish.category == category;
            category_ok && (!spicy_only || dish.is_spicy())
        })
    }
}

/// Display label for a menu category; unknown categories show as-is.
pub fn category_label(category: &str) -> &str {
    match category {
        ALL_CATEGORIES => "Tất cả",
        "signature" => "Đặc sắc",
        "special" => "Biến tấu",
        "vegetarian" => "Món chay",
        "sides" => "Ăn kèm",
        "beverages" => "Đồ uống",
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
