//! # Snapshot Codec
//!
//! Converts a [`Cart`] to and from the JSON value stored in the cart slot.
//!
//! ## Load Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw slot value                                                         │
//! │       │                                                                 │
//! │       ├── not JSON / not an array ──────────► empty cart, malformed    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for each element                                                       │
//! │       ├── id, name not strings ─────────────► dropped                  │
//! │       ├── price not an integer in range ────► dropped                  │
//! │       ├── quantity not an integer ──────────► dropped                  │
//! │       ├── quantity <= 0 or duplicate id ────► dropped                  │
//! │       ├── quantity > 99 ────────────────────► clamped                  │
//! │       ├── thumbnail/spicyLevel/size mistyped ► field ignored           │
//! │       └── ok ───────────────────────────────► kept                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Decoding never fails; it reports what it had to discard so the caller
//! can log it.

use serde_json::{Map, Value};

use crate::cart::{clamp_quantity, is_storable_price, Cart};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartLine, Variant};

/// Result of decoding a stored snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedSnapshot {
    pub cart: Cart,
    /// Array elements that failed shape validation.
    pub dropped: usize,
    /// Set when the whole value was unusable; holds the reason.
    pub malformed: Option<String>,
}

/// Serializes the whole cart as a JSON array of lines.
pub fn encode(cart: &Cart) -> CoreResult<String> {
    serde_json::to_string(cart).map_err(CoreError::Snapshot)
}

/// Parses a stored snapshot, keeping every element that passes validation.
pub fn decode(raw: &str) -> DecodedSnapshot {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            return DecodedSnapshot {
                malformed: Some(e.to_string()),
                ..DecodedSnapshot::default()
            }
        }
    };

    let Value::Array(elements) = value else {
        return DecodedSnapshot {
            malformed: Some("snapshot is not an array".to_string()),
            ..DecodedSnapshot::default()
        };
    };

    let total = elements.len();
    let mut lines = Vec::with_capacity(total);
    for element in &elements {
        let Some(line) = element.as_object().and_then(line_from_object) else {
            continue;
        };
        if lines.iter().any(|l: &CartLine| l.id == line.id) {
            continue;
        }
        lines.push(line);
    }

    DecodedSnapshot {
        dropped: total - lines.len(),
        cart: Cart::from_lines(lines),
        malformed: None,
    }
}

fn line_from_object(obj: &Map<String, Value>) -> Option<CartLine> {
    let id = obj.get("id")?.as_str()?.to_string();
    let name = obj.get("name")?.as_str()?.to_string();
    let unit_price = Money::new(whole_number(obj.get("price")?)?);
    if !is_storable_price(unit_price) {
        return None;
    }
    let quantity = clamp_quantity(whole_number(obj.get("quantity")?)?);
    if quantity == 0 {
        return None;
    }

    Some(CartLine {
        id,
        name,
        unit_price,
        quantity,
        thumbnail: optional_string(obj, "thumbnail"),
        variant: Variant {
            spicy_level: optional_string(obj, "spicyLevel"),
            size: optional_string(obj, "size"),
        },
    })
}

/// Accepts JSON integers, and floats with no fractional part (`2.0`).
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartCommand;
    use crate::types::LineCandidate;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        let commands = [
            CartCommand::add(
                LineCandidate::new("bun-bo", "Bún bò", Money::new(55_000))
                    .with_thumbnail("/img/bun-bo.jpg")
                    .with_spicy_level("Cay vừa"),
                2,
            ),
            CartCommand::add(
                LineCandidate::new("cha-cua", "Chả cua", Money::new(15_000)).with_size("Lớn"),
                3,
            ),
        ];
        for command in &commands {
            cart = cart.apply(command).next.unwrap();
        }
        cart
    }

    #[test]
    fn test_round_trip() {
        let cart = sample_cart();
        let raw = encode(&cart).unwrap();
        let decoded = decode(&raw);

        assert_eq!(decoded.cart, cart);
        assert_eq!(decoded.dropped, 0);
        assert!(decoded.malformed.is_none());
    }

    #[test]
    fn test_encode_is_bare_array() {
        let raw = encode(&Cart::new()).unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_decode_garbage_is_empty() {
        for raw in ["", "not json", "{\"id\":\"a\"}", "42", "null"] {
            let decoded = decode(raw);
            assert!(decoded.cart.is_empty(), "input {raw:?}");
            assert!(decoded.malformed.is_some(), "input {raw:?}");
        }
    }

    #[test]
    fn test_decode_drops_prices_that_could_overflow() {
        let raw = r#"[
            {"id": "a", "name": "A", "price": 100000000000000000, "quantity": 99},
            {"id": "b", "name": "B", "price": 9223372036854775807, "quantity": 1},
            {"id": "c", "name": "C", "price": 100000000000, "quantity": 99}
        ]"#;

        let decoded = decode(raw);
        assert_eq!(decoded.dropped, 2);
        assert_eq!(decoded.cart.line_count(), 1);
        assert_eq!(decoded.cart.subtotal(), Money::new(9_900_000_000_000));
    }

    #[test]
    fn test_decode_drops_bad_entries_only() {
        let raw = r#"[
            {"id": "a", "name": "A", "price": 10000, "quantity": 2},
            {"id": 7, "name": "B", "price": 10000, "quantity": 1},
            {"id": "c", "price": 10000, "quantity": 1},
            {"id": "d", "name": "D", "price": "10000", "quantity": 1},
            {"id": "e", "name": "E", "price": 10000},
            {"id": "f", "name": "F", "price": 5000, "quantity": 1.5},
            {"id": "g", "name": "G", "price": -1, "quantity": 1},
            {"id": "h", "name": "H", "price": 3000, "quantity": 0},
            "just a string",
            {"id": "i", "name": "I", "price": 2000.0, "quantity": 4}
        ]"#;

        let decoded = decode(raw);
        let ids: Vec<&str> = decoded.cart.lines().iter().map(|l| l.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "i"]);
        assert_eq!(decoded.dropped, 8);
        assert_eq!(decoded.cart.subtotal(), Money::new(28_000));
    }

    #[test]
    fn test_decode_clamps_and_dedupes() {
        let raw = r#"[
            {"id": "a", "name": "A", "price": 1, "quantity": 500},
            {"id": "a", "name": "A again", "price": 2, "quantity": 1}
        ]"#;
        let decoded = decode(raw);

        assert_eq!(decoded.cart.line_count(), 1);
        assert_eq!(decoded.cart.line("a").unwrap().quantity, 99);
        assert_eq!(decoded.cart.line("a").unwrap().name, "A");
        assert_eq!(decoded.dropped, 1);
    }

    #[test]
    fn test_decode_ignores_mistyped_optional_fields() {
        let raw = r#"[{"id": "a", "name": "A", "price": 1, "quantity": 1,
                       "thumbnail": 12, "spicyLevel": "Cay", "size": null}]"#;
        let decoded = decode(raw);
        let line = decoded.cart.line("a").unwrap();

        assert_eq!(line.thumbnail, None);
        assert_eq!(line.variant.spicy_level.as_deref(), Some("Cay"));
        assert_eq!(line.variant.size, None);
        assert_eq!(decoded.dropped, 0);
    }
}
