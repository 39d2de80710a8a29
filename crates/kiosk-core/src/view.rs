//! # View Projection
//!
//! Turns session state into a flat, renderer-agnostic view model.
//!
//! ```text
//! ┌──────────────┐     project()      ┌────────────┐    render()    ┌─────────┐
//! │ OrderSession │ ─────────────────► │ KioskView  │ ─────────────► │ Renderer│
//! │ + Catalog    │   pure, no I/O     │ (serde,    │   app crate    │ (HTML,  │
//! │ + Currency   │                    │  ts-rs)    │                │  TUI..) │
//! └──────────────┘                    └────────────┘                └─────────┘
//! ```
//!
//! Every amount is present twice: as an integer for logic and as a
//! preformatted string (`"Rp 35.000"`) for display.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, LineItem};
use crate::catalog::Catalog;
use crate::money::{CurrencyFormat, Money};
use crate::queue::QueueNumber;
use crate::session::{OrderSession, PaymentStatus};
use crate::types::{Category, FulfillmentType, Item, PaymentMethod, Step};

/// A category tab in the menu header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTab {
    pub category: Category,
    pub label: String,
    pub active: bool,
}

/// One card in the menu grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub glyph: String,
    pub price: Money,
    pub price_display: String,
}

impl MenuItemView {
    fn project(item: &Item, currency: &CurrencyFormat) -> Self {
        MenuItemView {
            id: item.id.clone(),
            name: item.name.clone(),
            glyph: item.glyph.clone(),
            price: item.price,
            price_display: currency.format(item.price),
        }
    }
}

/// One row on the checkout screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub item_id: String,
    pub name: String,
    pub glyph: String,
    pub unit_price: Money,
    pub unit_price_display: String,
    pub quantity: u32,
    pub subtotal: Money,
    pub subtotal_display: String,
}

impl LineView {
    fn project(line: &LineItem, currency: &CurrencyFormat) -> Self {
        let subtotal = line.subtotal();
        LineView {
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            glyph: line.glyph.clone(),
            unit_price: line.unit_price,
            unit_price_display: currency.format(line.unit_price),
            quantity: line.quantity,
            subtotal,
            subtotal_display: currency.format(subtotal),
        }
    }
}

/// Cart badge and checkout list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<LineView>,
    pub item_count: u32,
    pub total: Money,
    pub total_display: String,
}

impl CartView {
    pub fn project(cart: &Cart, currency: &CurrencyFormat) -> Self {
        CartView {
            lines: cart
                .lines()
                .iter()
                .map(|l| LineView::project(l, currency))
                .collect(),
            item_count: cart.total_item_count(),
            total: cart.grand_total(),
            total_display: currency.format(cart.grand_total()),
        }
    }
}

/// Everything a renderer needs to paint the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KioskView {
    pub step: Step,
    pub step_number: u8,
    pub fulfillment: Option<FulfillmentType>,
    pub selected_category: Category,
    pub categories: Vec<CategoryTab>,
    /// Items of the selected category, in grid order.
    pub menu: Vec<MenuItemView>,
    pub cart: CartView,
    pub can_checkout: bool,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    /// True while a payment confirmation is in flight.
    pub busy: bool,
    pub payment_error: Option<String>,
    pub queue_number: Option<QueueNumber>,
}

impl KioskView {
    /// Projects the session onto a view model.
    pub fn project(session: &OrderSession, catalog: &Catalog, currency: &CurrencyFormat) -> Self {
        let selected = session.selected_category();

        let categories = catalog
            .sections()
            .iter()
            .map(|s| CategoryTab {
                category: s.category.clone(),
                label: s.label.clone(),
                active: &s.category == selected,
            })
            .collect();

        let menu = catalog
            .items_in_category(selected)
            .iter()
            .map(|item| MenuItemView::project(item, currency))
            .collect();

        let status = session.payment_status();

        KioskView {
            step: session.step(),
            step_number: session.step().number(),
            fulfillment: session.fulfillment(),
            selected_category: selected.clone(),
            categories,
            menu,
            cart: CartView::project(session.cart(), currency),
            can_checkout: session.can_checkout(),
            payment_method: session.payment_method(),
            payment_status: status.clone(),
            busy: status.is_pending(),
            payment_error: status.failure_message().map(str::to_string),
            queue_number: session.queue_number().cloned(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
