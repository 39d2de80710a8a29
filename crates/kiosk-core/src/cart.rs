//! # Cart
//!
//! Ordered line items with a derived total.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Customer Action          Operation                 Line Change         │
//! │  ───────────────          ─────────                 ───────────         │
//! │                                                                         │
//! │  Tap "Tambah" ──────────► add_item(item) ─────────► qty += 1 or push    │
//! │                                                                         │
//! │  Tap + / − ─────────────► change_quantity(id, ±1) ► qty += delta        │
//! │                                                     (≤ 0 removes line,  │
//! │                                                      capped at 999)     │
//! │                                                                         │
//! │  Remove ────────────────► remove_item(id) ────────► line dropped        │
//! │                                                                         │
//! │  Finish order ──────────► clear() ────────────────► no lines, total 0   │
//! │                                                                         │
//! │  Every mutation recomputes the total from the lines.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutator returns whether the cart changed. Operations on an id that
//! has no line are silent no-ops.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Item;
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Line Item
// =============================================================================

/// One distinct item in the cart plus its quantity.
///
/// Name, glyph and unit price are copied from the catalog entry when the
/// line is created, so the cart renders without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: String,
    pub name: String,
    pub glyph: String,
    pub unit_price: Money,

    /// Between 1 and `MAX_ITEM_QUANTITY` while the line exists.
    pub quantity: u32,
}

impl LineItem {
    fn from_item(item: &Item) -> Self {
        LineItem {
            item_id: item.id.clone(),
            name: item.name.clone(),
            glyph: item.glyph.clone(),
            unit_price: item.price,
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The customer's cart.
///
/// ## Invariants
/// - At most one line per item id
/// - Every line has 1 ≤ quantity ≤ `MAX_ITEM_QUANTITY`
/// - `grand_total()` equals the sum of line subtotals after every mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<LineItem>,
    total: Money,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `item`.
    ///
    /// Increments the existing line for `item.id`, or appends a new line with
    /// quantity 1 at the end (insertion order is display order). Returns
    /// `false` when the line is already at `MAX_ITEM_QUANTITY`.
    pub fn add_item(&mut self, item: &Item) -> bool {
        match self.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) if line.quantity >= MAX_ITEM_QUANTITY => return false,
            Some(line) => line.quantity += 1,
            None => self.lines.push(LineItem::from_item(item)),
        }
        self.recalculate();
        true
    }

    /// Adds `delta` to the quantity of the line for `item_id`.
    ///
    /// A resulting quantity of zero or less removes the line; anything above
    /// `MAX_ITEM_QUANTITY` is clamped to it. Returns `false` when nothing
    /// changed: no such line, a zero `delta`, or a line already at the cap.
    pub fn change_quantity(&mut self, item_id: &str, delta: i64) -> bool {
        let Some(pos) = self.position(item_id) else {
            return false;
        };
        if delta == 0 {
            return false;
        }

        let new_qty = i64::from(self.lines[pos].quantity).saturating_add(delta);
        if new_qty <= 0 {
            return self.remove_item(item_id);
        }

        let new_qty = u32::try_from(new_qty.min(i64::from(MAX_ITEM_QUANTITY)))
            .unwrap_or(MAX_ITEM_QUANTITY);
        if new_qty == self.lines[pos].quantity {
            return false;
        }

        self.lines[pos].quantity = new_qty;
        self.recalculate();
        true
    }

    /// Removes the line for `item_id`. Returns `false` if there was none.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        self.recalculate();
        self.lines.len() != initial_len
    }

    /// Removes every line. Returns `false` if the cart was already empty.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.lines.clear();
        self.recalculate();
        true
    }

    /// Sum of quantities across all lines.
    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of unit price × quantity. Zero for an empty cart.
    #[inline]
    pub fn grand_total(&self) -> Money {
        self.total
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, item_id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    /// Number of distinct items.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.item_id == item_id)
    }

    fn recalculate(&mut self) {
        self.total = self.lines.iter().map(LineItem::subtotal).sum();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn item(id: &str, price: i64) -> Item {
        Item::new(id, format!("Item {}", id), price, "paket-nasi", "🍛")
    }

    #[test]
    fn test_add_same_item_twice() {
        let mut cart = Cart::new();
        let p1 = item("p1", 35000);

        cart.add_item(&p1);
        cart.add_item(&p1);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line("p1").unwrap().quantity, 2);
        assert_eq!(cart.grand_total().minor(), 70000);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", 35000));
        cart.add_item(&item("m1", 5000));

        assert!(cart.change_quantity("p1", -1));

        assert!(cart.line("p1").is_none());
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.grand_total().minor(), 5000);
    }

    #[test]
    fn test_change_quantity_by_minus_quantity_equals_remove() {
        let p1 = item("p1", 35000);
        let m1 = item("m1", 5000);

        let mut changed = Cart::new();
        let mut removed = Cart::new();
        for cart in [&mut changed, &mut removed] {
            cart.add_item(&p1);
            cart.add_item(&p1);
            cart.add_item(&p1);
            cart.add_item(&m1);
        }

        let qty = i64::from(changed.line("p1").unwrap().quantity);
        changed.change_quantity("p1", -qty);
        removed.remove_item("p1");

        assert_eq!(changed, removed);
    }

    #[test]
    fn test_change_quantity_large_deltas() {
        let mut cart = Cart::new();
        cart.add_item(&item("d2", 18000));

        assert!(cart.change_quantity("d2", 4));
        assert_eq!(cart.line("d2").unwrap().quantity, 5);
        assert_eq!(cart.grand_total().minor(), 90000);

        assert!(cart.change_quantity("d2", -10));
        assert!(cart.is_empty());
        assert!(cart.grand_total().is_zero());
    }

    #[test]
    fn test_change_quantity_missing_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", 35000));
        let before = cart.clone();

        assert!(!cart.change_quantity("zz", 1));
        assert!(!cart.change_quantity("p1", 0));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", 35000));
        cart.add_item(&item("m1", 5000));

        assert!(cart.remove_item("p1"));
        let total = cart.grand_total();
        assert!(!cart.remove_item("p1"));
        assert_eq!(cart.grand_total(), total);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", 35000));
        cart.add_item(&item("m1", 5000));

        assert!(cart.clear());

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert!(cart.grand_total().is_zero());
        assert!(!cart.clear());
    }

    #[test]
    fn test_quantity_is_capped() {
        let mut cart = Cart::new();
        let priciest = item("x1", crate::MAX_ITEM_PRICE);
        assert!(cart.add_item(&priciest));

        assert!(cart.change_quantity("x1", i64::MAX));

        let line = cart.line("x1").unwrap();
        assert_eq!(line.quantity, MAX_ITEM_QUANTITY);
        assert_eq!(
            cart.grand_total().minor(),
            crate::MAX_ITEM_PRICE * i64::from(MAX_ITEM_QUANTITY)
        );

        assert!(!cart.change_quantity("x1", 1));
        assert!(!cart.add_item(&priciest));
        assert_eq!(cart.line("x1").unwrap().quantity, MAX_ITEM_QUANTITY);

        assert!(cart.change_quantity("x1", -1));
        assert_eq!(cart.line("x1").unwrap().quantity, MAX_ITEM_QUANTITY - 1);
    }

    #[test]
    fn test_unvalidated_price_does_not_overflow() {
        let mut cart = Cart::new();
        cart.add_item(&item("x1", 10_000_000_000));
        cart.add_item(&item("x2", i64::MAX));

        assert!(cart.change_quantity("x1", i64::MAX));
        assert_eq!(cart.grand_total().minor(), i64::MAX);
    }

    #[test]
    fn test_insertion_order_is_display_order() {
        let mut cart = Cart::new();
        cart.add_item(&item("m1", 5000));
        cart.add_item(&item("p1", 35000));
        cart.add_item(&item("m1", 5000));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, ["m1", "p1"]);
    }

    #[test]
    fn test_totals_match_adds_across_menu() {
        let catalog = Catalog::standard();
        let picks = ["p1", "l7", "m1", "p1", "d5", "m1", "m1", "l2"];

        let mut cart = Cart::new();
        for id in picks {
            cart.add_item(catalog.find_item(id).unwrap());
        }

        let expected: i64 = picks
            .iter()
            .map(|id| catalog.find_item(id).unwrap().price.minor())
            .sum();

        assert_eq!(cart.total_item_count() as usize, picks.len());
        assert_eq!(cart.grand_total().minor(), expected);
        assert_eq!(cart.line_count(), 5);
    }
}
