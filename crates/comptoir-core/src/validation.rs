//! # Validation Module
//!
//! Input shape validation for Comptoir.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI forms                                                     │
//! │  ├── Required fields, numeric inputs                                   │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (shape rules)                                    │
//! │  ├── Names, icons, prices, quantities, email                           │
//! │  └── Runs before any state is touched                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog / transaction rules                                  │
//! │  ├── Category exists, category not in use                              │
//! │  └── Quantity within stock                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::validation::{validate_name, validate_quantity};
//!
//! assert!(validate_name("name", "Cola").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewCategory, NewProduct, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of category and product names.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a category icon (a few emoji code points).
pub const MAX_ICON_LEN: usize = 16;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a category or product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// ## Example
/// ```rust
/// use comptoir_core::validation::validate_name;
///
/// assert_eq!(validate_name("name", "  Cola ").unwrap(), "Cola");
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a category icon and returns it trimmed.
pub fn validate_icon(icon: &str) -> ValidationResult<String> {
    let icon = icon.trim();

    if icon.is_empty() {
        return Err(ValidationError::required("icon"));
    }

    if icon.chars().count() > MAX_ICON_LEN {
        return Err(ValidationError::TooLong {
            field: "icon".to_string(),
            max: MAX_ICON_LEN,
        });
    }

    Ok(icon.to_string())
}

/// Validates the notification email and returns it trimmed.
///
/// An empty address is accepted: it switches the email simulation off.
///
/// ```rust
/// use comptoir_core::validation::validate_email;
///
/// assert!(validate_email("").is_ok());
/// assert!(validate_email("a@b.com").is_ok());
/// assert!(validate_email("a@@b.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Ok(String::new());
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "notificationEmail".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            if domain.contains('@') {
                Err(invalid("must contain a single @"))
            } else {
                Ok(email.to_string())
            }
        }
        _ => Err(invalid("expected local@domain")),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be at least 1 (a zero or negative sale is a shape error, not a
///   stock error)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a stock level or a sales counter.
pub fn validate_count(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::negative(field));
    }
    Ok(())
}

/// Validates a sale or purchase price.
///
/// Zero is allowed (free items). Selling below the purchase price is allowed
/// too and yields a negative profit.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::negative(field));
    }
    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a category creation request and returns the normalized input.
pub fn validate_new_category(input: &NewCategory) -> ValidationResult<NewCategory> {
    Ok(NewCategory {
        name: validate_name("name", &input.name)?,
        icon: validate_icon(&input.icon)?,
    })
}

/// Validates a product creation request and returns the normalized input.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<NewProduct> {
    let name = validate_name("name", &input.name)?;
    if input.category_id.trim().is_empty() {
        return Err(ValidationError::required("categoryId"));
    }
    validate_count("stock", input.stock)?;
    validate_price("salePrice", input.sale_price)?;
    validate_price("purchasePrice", input.purchase_price)?;

    Ok(NewProduct {
        name,
        ..input.clone()
    })
}

/// Validates a full product replacement and returns the normalized product.
pub fn validate_product(product: &Product) -> ValidationResult<Product> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::required("id"));
    }
    let name = validate_name("name", &product.name)?;
    if product.category_id.trim().is_empty() {
        return Err(ValidationError::required("categoryId"));
    }
    validate_count("stock", product.stock)?;
    validate_count("totalSales", product.total_sales)?;
    validate_price("salePrice", product.sale_price)?;
    validate_price("purchasePrice", product.purchase_price)?;

    Ok(Product {
        name,
        ..product.clone()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> NewProduct {
        NewProduct {
            name: " Cola ".to_string(),
            category_id: "c1".to_string(),
            stock: 12,
            sale_price: Money::from_major(100),
            purchase_price: Money::from_major(60),
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "Cola").unwrap(), "Cola");
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(101)).is_err());
        assert!(validate_name("name", &"é".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_icon() {
        assert_eq!(validate_icon(" 🥤 ").unwrap(), "🥤");
        assert_eq!(
            validate_icon(""),
            Err(ValidationError::Required {
                field: "icon".to_string()
            })
        );
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("  ").unwrap(), "");
        assert_eq!(validate_email(" a@b.com ").unwrap(), "a@b.com");
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a b@c.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("salePrice", Money::zero()).is_ok());
        assert!(validate_price("salePrice", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_new_product_trims_name() {
        let product = validate_new_product(&cola()).unwrap();
        assert_eq!(product.name, "Cola");
        assert_eq!(product.stock, 12);
    }

    #[test]
    fn test_validate_new_product_rejects_negative_stock() {
        let input = NewProduct {
            stock: -1,
            ..cola()
        };
        assert_eq!(
            validate_new_product(&input),
            Err(ValidationError::negative("stock"))
        );
    }

    #[test]
    fn test_validate_product_rejects_negative_total_sales() {
        let product = Product {
            id: "p1".to_string(),
            name: "Cola".to_string(),
            category_id: "c1".to_string(),
            stock: 3,
            sale_price: Money::from_major(1),
            purchase_price: Money::zero(),
            total_sales: -2,
        };
        assert!(validate_product(&product).is_err());
    }
}
