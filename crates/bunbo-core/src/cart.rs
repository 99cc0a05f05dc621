//! # Cart State Machine
//!
//! The authoritative set of cart lines and the four operations that change it.
//!
//! ## Transition Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Cart (current) ──► apply(&CartCommand) ──► Transition                 │
//! │                                              ├── next: Option<Cart>     │
//! │                                              │     None = unchanged     │
//! │                                              └── events: Vec<CartEvent> │
//! │                                                                         │
//! │   Command             State change                  Event               │
//! │   ───────             ────────────                  ─────               │
//! │   AddLine (new id)    push line, qty = min(q, 99)   ItemAdded           │
//! │   AddLine (known id)  qty = min(qty + q, 99)        QuantityUpdated     │
//! │   AddLine (q <= 0)    none                          none                │
//! │   AddLine (bad price) none                          none                │
//! │   UpdateQuantity 0    remove line                   LineRemoved         │
//! │   UpdateQuantity n    qty = min(n, 99)              none                │
//! │   RemoveItem          remove line                   LineRemoved         │
//! │   Clear (non-empty)   remove all                    CartCleared         │
//! │   unknown id / empty  none                          none                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `apply` never mutates `self`; the caller decides when to commit `next`,
//! persist it, and forward `events`.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartLine, LineCandidate};
use crate::{MAX_LINE_QUANTITY, MAX_UNIT_PRICE};

// =============================================================================
// Commands and Events
// =============================================================================

/// A request to change the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    AddLine {
        candidate: LineCandidate,
        quantity: i64,
    },
    UpdateQuantity {
        id: String,
        quantity: i64,
    },
    RemoveItem {
        id: String,
    },
    Clear,
}

impl CartCommand {
    pub fn add(candidate: LineCandidate, quantity: i64) -> Self {
        CartCommand::AddLine {
            candidate,
            quantity,
        }
    }

    pub fn update(id: impl Into<String>, quantity: i64) -> Self {
        CartCommand::UpdateQuantity {
            id: id.into(),
            quantity,
        }
    }

    pub fn remove(id: impl Into<String>) -> Self {
        CartCommand::RemoveItem { id: id.into() }
    }
}

/// Observable outcome of a command, used for user acknowledgment only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new line was inserted.
    ItemAdded { name: String },
    /// An existing line's quantity was raised by an add.
    QuantityUpdated { name: String, quantity: u32 },
    /// A line was removed (explicitly or by a zero quantity).
    LineRemoved { name: String },
    /// A non-empty cart was emptied.
    CartCleared,
}

/// Result of applying a command to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The new state, or `None` when the command left the cart as it was.
    pub next: Option<Cart>,
    pub events: Vec<CartEvent>,
}

impl Transition {
    fn unchanged() -> Self {
        Transition {
            next: None,
            events: Vec::new(),
        }
    }

    fn to(next: Cart, event: CartEvent) -> Self {
        Transition {
            next: Some(next),
            events: vec![event],
        }
    }

    /// True if the command neither changed state nor produced an event.
    pub fn is_noop(&self) -> bool {
        self.next.is_none() && self.events.is_empty()
    }
}

/// Clamps a requested quantity into `0..=MAX_LINE_QUANTITY`.
///
/// ```rust
/// use bunbo_core::cart::clamp_quantity;
///
/// assert_eq!(clamp_quantity(-5), 0);
/// assert_eq!(clamp_quantity(12), 12);
/// assert_eq!(clamp_quantity(500), 99);
/// ```
pub fn clamp_quantity(requested: i64) -> u32 {
    // Bounded by the clamp, so the cast is lossless.
    requested.clamp(0, i64::from(MAX_LINE_QUANTITY)) as u32
}

/// True if a line may carry `price`: within `0..=MAX_UNIT_PRICE`.
///
/// ```rust
/// use bunbo_core::cart::is_storable_price;
/// use bunbo_core::Money;
///
/// assert!(is_storable_price(Money::new(65_000)));
/// assert!(!is_storable_price(Money::new(-1)));
/// assert!(!is_storable_price(Money::new(i64::MAX)));
/// ```
pub fn is_storable_price(price: Money) -> bool {
    (0..=MAX_UNIT_PRICE).contains(&price.amount())
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `id` (adding a known id raises its quantity)
/// - Every quantity is within `1..=99`; a line that would reach 0 is removed
/// - Insertion order is kept for display
/// - Item count and subtotal are computed on demand, never stored
///
/// Serializes as the bare JSON array that makes up the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from lines of unknown provenance.
    ///
    /// Quantities are clamped. Zero-quantity lines and lines priced outside
    /// `0..=MAX_UNIT_PRICE` are skipped; for a repeated id the first
    /// occurrence wins.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();
        for mut line in lines {
            let quantity = clamp_quantity(i64::from(line.quantity));
            if quantity == 0 || !is_storable_price(line.unit_price) || cart.contains(&line.id) {
                continue;
            }
            line.quantity = quantity;
            cart.lines.push(line);
        }
        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by id.
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.line(id).is_some()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of unit price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Computes the effect of `command` without touching `self`.
    pub fn apply(&self, command: &CartCommand) -> Transition {
        match command {
            CartCommand::AddLine {
                candidate,
                quantity,
            } => self.add_line(candidate, *quantity),
            CartCommand::UpdateQuantity { id, quantity } => self.update_quantity(id, *quantity),
            CartCommand::RemoveItem { id } => self.remove_item(id),
            CartCommand::Clear => self.clear(),
        }
    }

    fn add_line(&self, candidate: &LineCandidate, quantity: i64) -> Transition {
        if quantity <= 0 || !is_storable_price(candidate.unit_price) {
            return Transition::unchanged();
        }
        let quantity = clamp_quantity(quantity);

        if let Some(index) = self.position(&candidate.id) {
            let existing = &self.lines[index];
            let merged = clamp_quantity(i64::from(existing.quantity) + i64::from(quantity));
            let event = CartEvent::QuantityUpdated {
                name: existing.name.clone(),
                quantity: merged,
            };

            // Already at the cap: nothing to store, but the user still gets
            // the "updated" acknowledgment.
            if merged == existing.quantity {
                return Transition {
                    next: None,
                    events: vec![event],
                };
            }

            let mut next = self.clone();
            next.lines[index].quantity = merged;
            return Transition::to(next, event);
        }

        let mut next = self.clone();
        next.lines.push(candidate.clone().into_line(quantity));
        Transition::to(
            next,
            CartEvent::ItemAdded {
                name: candidate.name.clone(),
            },
        )
    }

    fn update_quantity(&self, id: &str, quantity: i64) -> Transition {
        let Some(index) = self.position(id) else {
            return Transition::unchanged();
        };

        let quantity = clamp_quantity(quantity);
        if quantity == 0 {
            return self.remove_at(index);
        }
        if self.lines[index].quantity == quantity {
            return Transition::unchanged();
        }

        let mut next = self.clone();
        next.lines[index].quantity = quantity;
        Transition {
            next: Some(next),
            events: Vec::new(),
        }
    }

    fn remove_item(&self, id: &str) -> Transition {
        match self.position(id) {
            Some(index) => self.remove_at(index),
            None => Transition::unchanged(),
        }
    }

    fn clear(&self) -> Transition {
        if self.is_empty() {
            return Transition::unchanged();
        }
        Transition::to(Cart::new(), CartEvent::CartCleared)
    }

    fn remove_at(&self, index: usize) -> Transition {
        let mut next = self.clone();
        let removed = next.lines.remove(index);
        Transition::to(next, CartEvent::LineRemoved { name: removed.name })
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
