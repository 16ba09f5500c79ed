//! Inventory and shopping-list tables

use super::{Cell, TableRow, TableTarget};
use crate::api::{InventoryItem, ShoppingEntry};
use crate::format::{format_attributes, format_currency, format_datetime};

/// Inventory table headings
pub const INVENTORY_COLUMNS: [&str; 9] = [
    "Barcode",
    "Name",
    "Type",
    "Brand",
    "Unit Size",
    "Unit Cost",
    "Stock",
    "Value",
    "Status",
];

/// Shopping list table headings
pub const SHOPPING_COLUMNS: [&str; 5] = ["Item", "Barcode", "Brand", "Type", "Added"];

/// Render inventory items, one row each
pub fn render_inventory(target: &mut dyn TableTarget, items: &[InventoryItem]) {
    target.clear();

    for item in items {
        target.push_row(TableRow {
            cells: vec![
                Cell::text(&item.barcode),
                Cell::Titled {
                    title: item.name.clone(),
                    meta: format_attributes(&item.attributes),
                },
                Cell::text(&item.item_type),
                Cell::text(&item.brand),
                Cell::text(&item.unit_size),
                Cell::text(format_currency(item.unit_cost)),
                Cell::text(item.stock_level.to_string()),
                Cell::text(format_currency(item.stock_value)),
                Cell::Badge { status: item.status },
            ],
        });
    }
}

/// Render shopping list entries, one row each
pub fn render_shopping_list(target: &mut dyn TableTarget, entries: &[ShoppingEntry]) {
    target.clear();

    for entry in entries {
        target.push_row(TableRow {
            cells: vec![
                Cell::text(&entry.name),
                Cell::text(&entry.barcode),
                Cell::text(&entry.brand),
                Cell::text(&entry.item_type),
                Cell::text(format_datetime(&entry.added_at)),
            ],
        });
    }
}
