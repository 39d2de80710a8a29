//! # Kiosk Configuration
//!
//! Configuration management for the kiosk runtime.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KIOSK_STORE_NAME="Warung Sederhana"                                │
//! │     KIOSK_PAYMENT_OUTCOME=decline                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/sederhana-kiosk/kiosk.toml (Linux)                       │
//! │     ~/Library/Application Support/com.sederhana.kiosk/kiosk.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Rp prefix, paket-nasi category, 2000 ms confirmation               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # kiosk.toml
//! [store]
//! name = "Rumah Makan Sederhana"
//!
//! [currency]
//! prefix = "Rp "
//! thousands_separator = "."
//!
//! [menu]
//! default_category = "paket-nasi"
//! catalog_path = "/etc/kiosk/menu.toml"   # optional, built-in menu otherwise
//!
//! [payment]
//! confirmation_delay_ms = 2000
//! default_method = "qris"
//! simulated_outcome = "approve"           # approve | decline
//! decline_message = "Pembayaran ditolak, silakan coba lagi"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use kiosk_core::validation::validate_category_slug;
use kiosk_core::{Catalog, Category, CurrencyFormat, PaymentMethod, SessionDefaults};

use crate::error::{KioskError, KioskResult};

/// Longest confirmation delay the simulated gateway accepts.
const MAX_CONFIRMATION_DELAY_MS: u64 = 60_000;

// =============================================================================
// Simulated Outcome
// =============================================================================

/// What the simulated payment gateway answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulatedOutcome {
    /// Every payment is approved after the delay.
    #[default]
    Approve,

    /// Every payment is declined after the delay.
    Decline,
}

impl std::fmt::Display for SimulatedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatedOutcome::Approve => write!(f, "approve"),
            SimulatedOutcome::Decline => write!(f, "decline"),
        }
    }
}

impl std::str::FromStr for SimulatedOutcome {
    type Err = KioskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "approved" | "success" => Ok(SimulatedOutcome::Approve),
            "decline" | "declined" | "fail" => Ok(SimulatedOutcome::Decline),
            other => Err(KioskError::InvalidConfig(format!(
                "Unknown payment outcome: '{}'. Valid options: approve, decline",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Store identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shown on the welcome screen and in logs.
    #[serde(default = "default_store_name")]
    pub name: String,
}

fn default_store_name() -> String {
    "Rumah Makan Sederhana".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
        }
    }
}

/// How amounts are displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_prefix")]
    pub prefix: String,

    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: char,
}

fn default_currency_prefix() -> String {
    "Rp ".to_string()
}

fn default_thousands_separator() -> char {
    '.'
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            prefix: default_currency_prefix(),
            thousands_separator: default_thousands_separator(),
        }
    }
}

/// Menu source and initial category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Category selected when the menu screen opens.
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Catalog file (`.toml` or `.json`). The built-in menu is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

fn default_category() -> String {
    kiosk_core::DEFAULT_CATEGORY.to_string()
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            default_category: default_category(),
            catalog_path: None,
        }
    }
}

/// Payment screen and simulated gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSettings {
    /// How long the simulated confirmation takes.
    #[serde(default = "default_confirmation_delay")]
    pub confirmation_delay_ms: u64,

    /// Method preselected on the payment screen.
    #[serde(default)]
    pub default_method: PaymentMethod,

    #[serde(default)]
    pub simulated_outcome: SimulatedOutcome,

    /// Message shown to the customer after a declined payment.
    #[serde(default = "default_decline_message")]
    pub decline_message: String,
}

fn default_confirmation_delay() -> u64 {
    kiosk_core::PAYMENT_CONFIRMATION_DELAY_MS
}

fn default_decline_message() -> String {
    "Pembayaran ditolak, silakan coba lagi".to_string()
}

impl Default for PaymentSettings {
    fn default() -> Self {
        PaymentSettings {
            confirmation_delay_ms: default_confirmation_delay(),
            default_method: PaymentMethod::default(),
            simulated_outcome: SimulatedOutcome::default(),
            decline_message: default_decline_message(),
        }
    }
}

impl PaymentSettings {
    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }
}

// =============================================================================
// Main Kiosk Configuration
// =============================================================================

/// Complete kiosk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub menu: MenuConfig,

    #[serde(default)]
    pub payment: PaymentSettings,
}

impl KioskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (kiosk.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> KioskResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading kiosk config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load kiosk config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> KioskResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| KioskError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Kiosk config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> KioskResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(KioskError::InvalidConfig("store name is required".into()));
        }

        if self.currency.thousands_separator.is_ascii_digit() {
            return Err(KioskError::InvalidConfig(format!(
                "thousands_separator cannot be a digit, got '{}'",
                self.currency.thousands_separator
            )));
        }

        validate_category_slug(&self.menu.default_category)
            .map_err(|e| KioskError::InvalidConfig(format!("default_category: {}", e)))?;

        if self.payment.confirmation_delay_ms > MAX_CONFIRMATION_DELAY_MS {
            return Err(KioskError::InvalidConfig(format!(
                "confirmation_delay_ms must be at most {}, got {}",
                MAX_CONFIRMATION_DELAY_MS, self.payment.confirmation_delay_ms
            )));
        }

        if self.payment.decline_message.trim().is_empty() {
            return Err(KioskError::InvalidConfig(
                "decline_message must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies `KIOSK_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("KIOSK_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(prefix) = lookup("KIOSK_CURRENCY_PREFIX") {
            self.currency.prefix = prefix;
        }

        if let Some(category) = lookup("KIOSK_DEFAULT_CATEGORY") {
            debug!(category = %category, "Overriding default category from environment");
            self.menu.default_category = category;
        }

        if let Some(path) = lookup("KIOSK_CATALOG_PATH") {
            self.menu.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(delay) = lookup("KIOSK_PAYMENT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.payment.confirmation_delay_ms = ms,
                Err(_) => warn!(delay = %delay, "Ignoring non-numeric KIOSK_PAYMENT_DELAY_MS"),
            }
        }

        if let Some(outcome) = lookup("KIOSK_PAYMENT_OUTCOME") {
            match outcome.parse() {
                Ok(parsed) => {
                    debug!(outcome = %outcome, "Overriding payment outcome from environment");
                    self.payment.simulated_outcome = parsed;
                }
                Err(e) => warn!("{}", e),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sederhana", "kiosk")
            .map(|dirs| dirs.config_dir().join("kiosk.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency.prefix.clone(), self.currency.thousands_separator)
    }

    pub fn session_defaults(&self) -> SessionDefaults {
        SessionDefaults {
            category: Category::new(self.menu.default_category.clone()),
            payment_method: self.payment.default_method,
        }
    }

    /// Loads the configured catalog file, or the built-in menu.
    pub fn load_catalog(&self) -> KioskResult<Catalog> {
        let catalog = match &self.menu.catalog_path {
            Some(path) => read_catalog(path)?,
            None => Catalog::standard(),
        };

        if !catalog.has_category(&Category::new(self.menu.default_category.clone())) {
            warn!(
                category = %self.menu.default_category,
                "Default category is not in the catalog, the menu will open empty"
            );
        }

        Ok(catalog)
    }
}

fn read_catalog(path: &Path) -> KioskResult<Catalog> {
    let failed = |reason: String| KioskError::CatalogLoadFailed {
        path: path.to_path_buf(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| failed(e.to_string()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let catalog = if is_json {
        Catalog::from_json_str(&contents)
    } else {
        Catalog::from_toml_str(&contents)
    }
    .map_err(|e| failed(e.to_string()))?;

    info!(?path, items = catalog.item_count(), "Catalog loaded");
    Ok(catalog)
}
