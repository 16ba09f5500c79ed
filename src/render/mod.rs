//! List and Table Rendering
//!
//! Projects API records onto abstract table and feed targets. Every
//! renderer clears its target and emits one row per record, in input
//! order, with no filtering or deduplication.

mod feeds;
mod tables;

pub use feeds::{render_activity, render_usage};
pub use tables::{render_inventory, render_shopping_list, INVENTORY_COLUMNS, SHOPPING_COLUMNS};

use serde::Serialize;

use crate::api::StockStatus;

/// One table cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Cell {
    Text { text: String },
    /// Primary text with a secondary meta line beneath it
    Titled { title: String, meta: String },
    /// Stock status badge
    Badge { status: StockStatus },
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell::Text { text: text.into() }
    }

    /// Single-line rendering of the cell
    pub fn display(&self) -> String {
        match self {
            Cell::Text { text } => text.clone(),
            Cell::Titled { title, meta } if meta.is_empty() => title.clone(),
            Cell::Titled { title, meta } => format!("{} ({})", title, meta),
            Cell::Badge { status } => status.label().to_string(),
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

/// One feed entry: bold title, detail line, muted meta line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub detail: String,
    pub meta: String,
}

/// A table body that rows are rendered into
pub trait TableTarget {
    /// Drop all rows
    fn clear(&mut self);

    /// Append a row
    fn push_row(&mut self, row: TableRow);
}

/// A feed list that entries are rendered into
pub trait FeedTarget {
    fn clear(&mut self);
    fn push_entry(&mut self, entry: FeedEntry);
}

/// In-memory [`TableTarget`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableBuffer {
    pub rows: Vec<TableRow>,
}

impl TableTarget for TableBuffer {
    fn clear(&mut self) {
        self.rows.clear();
    }

    fn push_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }
}

/// In-memory [`FeedTarget`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedBuffer {
    pub entries: Vec<FeedEntry>,
}

impl FeedTarget for FeedBuffer {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn push_entry(&mut self, entry: FeedEntry) {
        self.entries.push(entry);
    }
}
