//! # Catalog
//!
//! Read-only menu grouped by category.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog                                                                │
//! │  ├── paket-nasi  "Paket Nasi"   p1 .. p6                               │
//! │  ├── lauk-pauk   "Lauk Pauk"    l1 .. l8                               │
//! │  ├── minuman     "Minuman"      m1 .. m6                               │
//! │  └── dessert     "Dessert"      d1 .. d5                               │
//! │                                                                         │
//! │  Section order = category tab order. Item order = grid order.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Categories are open: a menu file can declare any number of sections.
//! Looking up a category the catalog does not know returns an empty slice.
//!
//! ## Menu File Format
//! ```toml
//! [[sections]]
//! category = "minuman"
//! label = "Minuman"
//!
//! [[sections.items]]
//! id = "m1"
//! name = "Es Teh Manis"
//! price = 5000
//! category = "minuman"
//! glyph = "🧋"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, Item};
use crate::validation::{validate_category_slug, validate_item};

// =============================================================================
// Menu Section
// =============================================================================

/// One category tab and the items listed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSection {
    pub category: Category,

    /// Tab label shown to the customer.
    pub label: String,

    #[serde(default)]
    pub items: Vec<Item>,
}

impl MenuSection {
    pub fn new(category: impl Into<Category>, label: impl Into<String>, items: Vec<Item>) -> Self {
        MenuSection {
            category: category.into(),
            label: label.into(),
            items,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The full menu. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    sections: Vec<MenuSection>,
}

impl Catalog {
    /// Builds a catalog from sections, checking every item.
    ///
    /// ## Rules
    /// - Category slugs are valid and unique across sections
    /// - Item ids are unique across the whole catalog
    /// - Every item passes [`validate_item`] (non-empty name, positive price
    ///   no higher than `MAX_ITEM_PRICE`)
    /// - An item's `category` matches the section it is listed under
    pub fn from_sections(sections: Vec<MenuSection>) -> CoreResult<Self> {
        let mut categories = HashSet::new();
        let mut ids = HashSet::new();

        for section in &sections {
            validate_category_slug(section.category.as_str())?;
            if !categories.insert(section.category.as_str()) {
                return Err(CoreError::DuplicateCategory(section.category.to_string()));
            }

            for item in &section.items {
                validate_item(item)?;
                if item.category != section.category {
                    return Err(CoreError::CategoryMismatch {
                        item_id: item.id.clone(),
                        item_category: item.category.to_string(),
                        section: section.category.to_string(),
                    });
                }
                if !ids.insert(item.id.as_str()) {
                    return Err(CoreError::DuplicateItem(item.id.clone()));
                }
            }
        }

        Ok(Catalog { sections })
    }

    /// Parses and validates a TOML menu file.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let raw: Catalog =
            toml::from_str(contents).map_err(|e| CoreError::InvalidCatalog(e.to_string()))?;
        Self::from_sections(raw.sections)
    }

    /// Parses and validates a JSON menu file.
    pub fn from_json_str(contents: &str) -> CoreResult<Self> {
        let raw: Catalog = serde_json::from_str(contents)
            .map_err(|e| CoreError::InvalidCatalog(e.to_string()))?;
        Self::from_sections(raw.sections)
    }

    /// Items in a category, in display order. Empty for an unknown category.
    pub fn items_in_category(&self, category: &Category) -> &[Item] {
        self.sections
            .iter()
            .find(|s| &s.category == category)
            .map(|s| s.items.as_slice())
            .unwrap_or(&[])
    }

    /// Looks up an item by id across all categories.
    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|item| item.id == id)
    }

    /// Returns true if the catalog declares this category.
    pub fn has_category(&self, category: &Category) -> bool {
        self.sections.iter().any(|s| &s.category == category)
    }

    /// Categories in tab order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.sections.iter().map(|s| &s.category)
    }

    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// The reference Padang restaurant menu.
    pub fn standard() -> Self {
        Catalog {
            sections: vec![
                section(
                    "paket-nasi",
                    "Paket Nasi",
                    &[
                        ("p1", "Paket Rendang", 35000, "🍛"),
                        ("p2", "Paket Ayam Pop", 32000, "🍗"),
                        ("p3", "Paket Gulai Ikan", 30000, "🐟"),
                        ("p4", "Paket Dendeng Balado", 38000, "🥩"),
                        ("p5", "Paket Ayam Goreng", 28000, "🍗"),
                        ("p6", "Paket Ikan Bakar", 33000, "🐟"),
                    ],
                ),
                section(
                    "lauk-pauk",
                    "Lauk Pauk",
                    &[
                        ("l1", "Rendang Daging", 25000, "🥩"),
                        ("l2", "Ayam Pop", 22000, "🍗"),
                        ("l3", "Gulai Ikan", 20000, "🐟"),
                        ("l4", "Dendeng Balado", 28000, "🥩"),
                        ("l5", "Telur Balado", 8000, "🥚"),
                        ("l6", "Perkedel", 5000, "🥔"),
                        ("l7", "Sambal Ijo", 3000, "🌶️"),
                        ("l8", "Sayur Nangka", 10000, "🥗"),
                    ],
                ),
                section(
                    "minuman",
                    "Minuman",
                    &[
                        ("m1", "Es Teh Manis", 5000, "🧋"),
                        ("m2", "Es Jeruk", 8000, "🍊"),
                        ("m3", "Teh Panas", 3000, "☕"),
                        ("m4", "Kopi Hitam", 5000, "☕"),
                        ("m5", "Air Mineral", 3000, "💧"),
                        ("m6", "Es Kelapa Muda", 12000, "🥥"),
                    ],
                ),
                section(
                    "dessert",
                    "Dessert",
                    &[
                        ("d1", "Es Campur", 15000, "🍧"),
                        ("d2", "Es Teler", 18000, "🍨"),
                        ("d3", "Kolak Pisang", 12000, "🍌"),
                        ("d4", "Bubur Kacang Hijau", 10000, "🥣"),
                        ("d5", "Pisang Goreng", 8000, "🍌"),
                    ],
                ),
            ],
        }
    }
}

/// Builds one built-in section from `(id, name, price, glyph)` rows.
fn section(category: &str, label: &str, rows: &[(&str, &str, i64, &str)]) -> MenuSection {
    let items = rows
        .iter()
        .map(|&(id, name, price, glyph)| Item::new(id, name, price, category, glyph))
        .collect();
    MenuSection::new(category, label, items)
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::standard()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
