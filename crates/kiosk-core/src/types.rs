//! # Domain Types
//!
//! Core domain types used throughout the kiosk.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    Category     │   │      Step       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("p1")      │   │  open slug      │   │  1 Welcome      │       │
//! │  │  name           │   │  "paket-nasi"   │   │  2 Fulfillment  │       │
//! │  │  price (Money)  │   │  "minuman" ...  │   │  3 MenuBrowse   │       │
//! │  │  category       │   └─────────────────┘   │  4 Checkout     │       │
//! │  │  glyph ("🍛")   │                         │  5 Payment      │       │
//! │  └─────────────────┘   ┌─────────────────┐   │  6 QueueDisplay │       │
//! │                        │ FulfillmentType │   └─────────────────┘       │
//! │  ┌─────────────────┐   │  DineIn         │                              │
//! │  │  PaymentMethod  │   │  Takeaway       │                              │
//! │  │  Qris (default) │   └─────────────────┘                              │
//! │  │  Cash / Card    │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_CATEGORY;

// =============================================================================
// Category
// =============================================================================

/// A menu category slug such as `paket-nasi` or `minuman`.
///
/// The set is open: whatever sections the catalog declares are valid
/// categories. Lookups for a slug the catalog does not know return nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Category(String);

impl Category {
    pub fn new(slug: impl Into<String>) -> Self {
        Category(slug.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::new(DEFAULT_CATEGORY)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(slug: &str) -> Self {
        Category::new(slug)
    }
}

// =============================================================================
// Item
// =============================================================================

/// A purchasable catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Unique identifier within the catalog (e.g. `"p1"`).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in the smallest currency unit. Always positive.
    pub price: Money,

    /// Category this item is listed under.
    pub category: Category,

    /// Emoji or icon name shown next to the item.
    pub glyph: String,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        category: impl Into<Category>,
        glyph: impl Into<String>,
    ) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            price: Money::from_minor(price),
            category: category.into(),
            glyph: glyph.into(),
        }
    }
}

// =============================================================================
// Fulfillment Type
// =============================================================================

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentType {
    /// Eat at the restaurant.
    DineIn,
    /// Take the order away.
    Takeaway,
}

impl fmt::Display for FulfillmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FulfillmentType::DineIn => write!(f, "dine_in"),
            FulfillmentType::Takeaway => write!(f, "takeaway"),
        }
    }
}

impl FromStr for FulfillmentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dine_in" | "dine-in" | "dinein" => Ok(FulfillmentType::DineIn),
            "takeaway" | "take-away" | "take_away" => Ok(FulfillmentType::Takeaway),
            other => Err(ValidationError::InvalidFormat {
                field: "fulfillment".to_string(),
                reason: format!("unknown fulfillment type '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays at the kiosk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// QR code payment (QRIS). Preselected on the payment screen.
    #[default]
    Qris,
    /// Pay cash at the counter.
    Cash,
    /// Debit or credit card on the attached terminal.
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Qris => write!(f, "qris"),
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Card => write!(f, "card"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qris" => Ok(PaymentMethod::Qris),
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "debit" | "credit" => Ok(PaymentMethod::Card),
            other => Err(ValidationError::InvalidFormat {
                field: "payment_method".to_string(),
                reason: format!("unknown payment method '{}', expected qris, cash or card", other),
            }),
        }
    }
}

// =============================================================================
// Step
// =============================================================================

/// The screen the customer is on. Numbered 1 through 6, strictly sequential.
///
/// ```text
/// Welcome(1) ─► FulfillmentSelect(2) ─► MenuBrowse(3) ─► Checkout(4)
///                                                            │
///      ▲                                                     ▼
///      └──────────── finish ◄──── QueueDisplay(6) ◄──── Payment(5)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Step {
    #[default]
    Welcome = 1,
    FulfillmentSelect = 2,
    MenuBrowse = 3,
    Checkout = 4,
    Payment = 5,
    QueueDisplay = 6,
}

impl Step {
    /// Screen number, 1 through 6.
    #[inline]
    pub const fn number(&self) -> u8 {
        *self as u8
    }

    pub const fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::Welcome),
            2 => Some(Step::FulfillmentSelect),
            3 => Some(Step::MenuBrowse),
            4 => Some(Step::Checkout),
            5 => Some(Step::Payment),
            6 => Some(Step::QueueDisplay),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Step::Welcome => "welcome",
            Step::FulfillmentSelect => "fulfillment_select",
            Step::MenuBrowse => "menu_browse",
            Step::Checkout => "checkout",
            Step::Payment => "payment",
            Step::QueueDisplay => "queue_display",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.number())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers_round_trip() {
        for n in 1..=6 {
            let step = Step::from_number(n).unwrap();
            assert_eq!(step.number(), n);
        }
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(7), None);
    }

    #[test]
    fn test_step_default_is_welcome() {
        assert_eq!(Step::default(), Step::Welcome);
        assert_eq!(Step::Checkout.to_string(), "checkout(4)");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("qris".parse::<PaymentMethod>().unwrap(), PaymentMethod::Qris);
        assert_eq!("CASH".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("debit".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert_eq!(PaymentMethod::default(), PaymentMethod::Qris);
    }

    #[test]
    fn test_fulfillment_parsing() {
        assert_eq!(
            "dine-in".parse::<FulfillmentType>().unwrap(),
            FulfillmentType::DineIn
        );
        assert_eq!(
            "takeaway".parse::<FulfillmentType>().unwrap(),
            FulfillmentType::Takeaway
        );
        assert!("delivery".parse::<FulfillmentType>().is_err());
    }

    #[test]
    fn test_category_default_and_serde() {
        assert_eq!(Category::default().as_str(), "paket-nasi");

        let json = serde_json::to_string(&Category::new("minuman")).unwrap();
        assert_eq!(json, "\"minuman\"");
    }

    #[test]
    fn test_item_serializes_price_as_integer() {
        let item = Item::new("m1", "Es Teh Manis", 5000, "minuman", "🧋");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["price"], 5000);
        assert_eq!(value["category"], "minuman");
    }
}
