//! # Cart Types
//!
//! The records the cart is made of.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────┐   into_line(qty)   ┌─────────────────┐            │
//! │  │  LineCandidate  │ ─────────────────► │    CartLine     │            │
//! │  │  ─────────────  │                    │  ─────────────  │            │
//! │  │  id             │                    │  id (key)       │            │
//! │  │  name           │                    │  name           │            │
//! │  │  unit_price     │                    │  unit_price     │            │
//! │  │  thumbnail?     │                    │  quantity 1..99 │            │
//! │  │  variant        │                    │  thumbnail?     │            │
//! │  └─────────────────┘                    │  variant        │            │
//! │                                         └─────────────────┘            │
//! │  Variant: spicy_level?, size?  (display only, never interpreted)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Variant
// =============================================================================

/// Optional dish variant metadata carried for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Variant {
    /// Spice level label, e.g. "Cay vừa".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub spicy_level: Option<String>,

    /// Bowl size label, e.g. "Tô lớn".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub size: Option<String>,
}

impl Variant {
    /// True when no variant field is set.
    pub fn is_empty(&self) -> bool {
        self.spicy_level.is_none() && self.size.is_none()
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One purchasable entry in the cart.
///
/// ## Snapshot Shape
/// ```json
/// { "id": "bun-bo-dac-biet", "name": "Bún bò đặc biệt", "price": 65000,
///   "quantity": 2, "thumbnail": "/img/dac-biet.jpg", "spicyLevel": "Cay vừa" }
/// ```
/// `price` is the unit price. Only [`crate::cart::Cart`] changes `quantity`;
/// every other field is frozen from the moment the line is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Menu item id, unique within the cart.
    pub id: String,

    /// Display name at the time the line was created.
    pub name: String,

    /// Unit price in đồng.
    #[serde(rename = "price")]
    pub unit_price: Money,

    /// Always within `1..=MAX_LINE_QUANTITY`.
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub thumbnail: Option<String>,

    #[serde(flatten)]
    pub variant: Variant,
}

impl CartLine {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Line Candidate
// =============================================================================

/// What a caller offers to the cart: a line without a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineCandidate {
    pub id: String,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub thumbnail: Option<String>,
    #[serde(flatten)]
    pub variant: Variant,
}

impl LineCandidate {
    /// Creates a candidate with no thumbnail or variant.
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        LineCandidate {
            id: id.into(),
            name: name.into(),
            unit_price,
            thumbnail: None,
            variant: Variant::default(),
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn with_spicy_level(mut self, spicy_level: impl Into<String>) -> Self {
        self.variant.spicy_level = Some(spicy_level.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.variant.size = Some(size.into());
        self
    }

    /// Turns the candidate into a stored line.
    ///
    /// The caller is responsible for passing an already clamped quantity.
    pub fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            id: self.id,
            name: self.name,
            unit_price: self.unit_price,
            quantity,
            thumbnail: self.thumbnail,
            variant: self.variant,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
