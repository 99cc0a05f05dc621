//! # Validation Module
//!
//! Checkout form rules.
//!
//! ## Field Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field        Rule (after trimming)                                     │
//! │  ─────        ─────────────────────                                     │
//! │  name         at least 2 characters                                     │
//! │  phone        9 to 13 characters; without spaces: 0 or +84, then 8-10   │
//! │               digits                                                    │
//! │  email        empty, or local@domain.tld                                │
//! │  address      at least 6 characters                                     │
//! │  branchId     required                                                  │
//! │  note         at most 300 characters                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths count characters, not bytes, since names and addresses are
//! Vietnamese.
//!
//! ## Usage
//! ```rust
//! use bunbo_core::validation::{normalize_phone, validate_phone};
//!
//! assert!(validate_phone("0905 123 456").is_ok());
//! assert_eq!(normalize_phone(" 0905 123 456 "), "0905123456");
//! assert!(validate_phone("12345").is_err());
//! ```

use crate::error::ValidationError;
use crate::order::CheckoutForm;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const NAME_MIN: usize = 2;
const PHONE_MIN: usize = 9;
const PHONE_MAX: usize = 13;
const ADDRESS_MIN: usize = 6;
const NOTE_MAX: usize = 300;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates the customer's name.
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    if name.chars().count() < NAME_MIN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: NAME_MIN,
        });
    }
    Ok(())
}

/// Removes all whitespace from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validates a Vietnamese phone number.
///
/// Accepts `0xxxxxxxx` style local numbers and `+84xxxxxxxx` international
/// ones, with 8 to 10 digits after the prefix. Spaces are allowed.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let trimmed = phone.trim();
    let len = trimmed.chars().count();
    if len == 0 {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }
    if len < PHONE_MIN {
        return Err(ValidationError::TooShort {
            field: "phone".to_string(),
            min: PHONE_MIN,
        });
    }
    if len > PHONE_MAX {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: PHONE_MAX,
        });
    }

    let compact = normalize_phone(trimmed);
    let rest = compact
        .strip_prefix("+84")
        .or_else(|| compact.strip_prefix('0'));
    let valid = rest.is_some_and(|digits| {
        (8..=10).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
    });

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must start with 0 or +84 followed by 8 to 10 digits".to_string(),
        });
    }
    Ok(())
}

/// Validates an optional email address. Empty is allowed.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

/// Validates the delivery address.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::Required {
            field: "address".to_string(),
        });
    }
    if address.chars().count() < ADDRESS_MIN {
        return Err(ValidationError::TooShort {
            field: "address".to_string(),
            min: ADDRESS_MIN,
        });
    }
    Ok(())
}

pub fn validate_branch_id(branch_id: &str) -> ValidationResult<()> {
    if branch_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "branchId".to_string(),
        });
    }
    Ok(())
}

/// Validates the optional order note.
pub fn validate_note(note: &str) -> ValidationResult<()> {
    if note.trim().chars().count() > NOTE_MAX {
        return Err(ValidationError::TooLong {
            field: "note".to_string(),
            max: NOTE_MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Form Validator
// =============================================================================

/// Validates the whole checkout form, reporting the first failing field in
/// form order.
pub fn validate_checkout_form(form: &CheckoutForm) -> ValidationResult<()> {
    validate_name(&form.name)?;
    validate_phone(&form.phone)?;
    validate_email(&form.email)?;
    validate_address(&form.address)?;
    validate_branch_id(&form.branch_id)?;
    validate_note(&form.note)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
