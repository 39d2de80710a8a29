//! # Kiosk Error Types
//!
//! Error types for the kiosk runtime.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kiosk Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Catalog      │  │     Commands            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  CatalogLoad-   │  │  UnknownItem            │ │
//! │  │  ConfigLoad...  │  │  Failed         │  │  PaymentTaskLost        │ │
//! │  │  ConfigSave...  │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected step transitions are not errors. They come back as
//! [`kiosk_core::Transition::Rejected`] values.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for kiosk operations.
pub type KioskResult<T> = Result<T, KioskError>;

/// Everything that can go wrong outside the pure ordering logic.
#[derive(Debug, Error)]
pub enum KioskError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid kiosk configuration.
    #[error("Invalid kiosk configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Catalog Errors
    // =========================================================================
    /// The configured catalog file could not be read, parsed or validated.
    #[error("Failed to load catalog from {path}: {reason}")]
    CatalogLoadFailed { path: PathBuf, reason: String },

    // =========================================================================
    // Command Errors
    // =========================================================================
    /// A command named an item id the catalog does not have.
    #[error("Unknown menu item: {0}")]
    UnknownItem(String),

    /// The payment task ended without reporting a result.
    #[error("Payment confirmation task ended without a result")]
    PaymentTaskLost,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for KioskError {
    fn from(err: toml::de::Error) -> Self {
        KioskError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for KioskError {
    fn from(err: toml::ser::Error) -> Self {
        KioskError::ConfigSaveFailed(err.to_string())
    }
}

impl KioskError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            KioskError::InvalidConfig(_)
                | KioskError::ConfigLoadFailed(_)
                | KioskError::ConfigSaveFailed(_)
                | KioskError::CatalogLoadFailed { .. }
        )
    }
}
