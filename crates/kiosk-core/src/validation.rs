//! # Validation Module
//!
//! Input validation for catalog entries.
//!
//! The built-in menu is always valid; these checks guard menus loaded from
//! a `menu.toml` or `menu.json` file before they reach the cart.
//!
//! ## Usage
//! ```rust
//! use kiosk_core::validation::{validate_item_id, validate_price};
//!
//! assert!(validate_item_id("p1").is_ok());
//! assert!(validate_price(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Item;
use crate::MAX_ITEM_PRICE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_ID_LEN: usize = 32;
const MAX_NAME_LEN: usize = 100;
const MAX_SLUG_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Only letters, digits, hyphens and underscores
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an item display name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a category slug.
///
/// ## Rules
/// - Must not be empty
/// - Lowercase ASCII letters, digits and hyphens only (`paket-nasi`)
pub fn validate_category_slug(slug: &str) -> ValidationResult<()> {
    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if slug.len() > MAX_SLUG_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_SLUG_LEN,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "category".to_string(),
            reason: "must be a lowercase slug like 'paket-nasi'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Strictly positive (no free items)
/// - At most `MAX_ITEM_PRICE`
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price > MAX_ITEM_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_ITEM_PRICE,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Runs every field check on one catalog item.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_item_id(&item.id)?;
    validate_item_name(&item.name)?;
    validate_price(item.price.minor())?;
    validate_category_slug(item.category.as_str())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("p1").is_ok());
        assert!(validate_item_id("es-teh_2").is_ok());
        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id("p 1").is_err());
        assert!(validate_item_id(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Paket Rendang").is_ok());
        assert!(matches!(
            validate_item_name(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_category_slug() {
        assert!(validate_category_slug("paket-nasi").is_ok());
        assert!(validate_category_slug("minuman").is_ok());
        assert!(validate_category_slug("Paket Nasi").is_err());
        assert!(validate_category_slug("").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(35_000).is_ok());
        assert!(validate_price(1).is_ok());
        assert!(matches!(
            validate_price(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_price(-5_000).is_err());
        assert!(validate_price(MAX_ITEM_PRICE).is_ok());
        assert!(matches!(
            validate_price(MAX_ITEM_PRICE + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(10_000_000_000).is_err());
    }

    #[test]
    fn test_validate_item() {
        let item = Item::new("l7", "Sambal Ijo", 3000, "lauk-pauk", "🌶️");
        assert!(validate_item(&item).is_ok());

        let free = Item::new("l9", "Kerupuk", 0, "lauk-pauk", "🍘");
        assert!(validate_item(&free).is_err());
    }
}
