//! # Error Types
//!
//! Domain-specific error types for kiosk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kiosk-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog construction, queue number parsing     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kiosk-app errors (separate crate)                                     │
//! │  └── KioskError       - Config, unknown items, payment task            │
//! │                                                                         │
//! │  NOT errors: empty-cart checkout, out-of-step triggers, missing line   │
//! │  items. Those are rejected transitions or silent no-ops.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two catalog entries share one id.
    #[error("Duplicate item id in catalog: {0}")]
    DuplicateItem(String),

    /// Two catalog sections declare the same category.
    #[error("Duplicate category in catalog: {0}")]
    DuplicateCategory(String),

    /// An item sits in a section whose category differs from its own.
    ///
    /// ## When This Occurs
    /// A hand-edited `menu.toml` moves an item between `[[sections]]`
    /// without updating its `category` field.
    #[error("Item {item_id} has category {item_category} but is listed under {section}")]
    CategoryMismatch {
        item_id: String,
        item_category: String,
        section: String,
    },

    /// A queue number string does not match `<A-H>-<100..999>`.
    #[error("Invalid queue number: {0}")]
    InvalidQueueNumber(String),

    /// A catalog file could not be parsed.
    #[error("Invalid catalog data: {0}")]
    InvalidCatalog(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value outside allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
