//! Usage Form Controller
//!
//! A dynamic list of "item used" rows with a live cost preview per row and
//! a running total, priced against the current item catalog.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use validator::Validate;

use super::FormError;
use crate::api::{InventoryItem, UsageLineInput, UsageRequest};
use crate::format::format_currency;

// Header fields first, then the item rows
const USAGE_FIELDS: [&str; 5] = [
    "client_name",
    "usage_date",
    "before_state",
    "after_state",
    "items",
];

/// Barcode → unit cost lookup built from a snapshot's items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    costs: HashMap<String, Decimal>,
}

impl Catalog {
    /// Index items by barcode; the first item wins on duplicates
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let mut costs = HashMap::with_capacity(items.len());
        for item in items {
            costs.entry(item.barcode.clone()).or_insert(item.unit_cost);
        }
        Self { costs }
    }

    pub fn unit_cost(&self, barcode: &str) -> Option<Decimal> {
        self.costs.get(barcode).copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Stable identity of a row for the life of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RowId(u32);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One usage row as typed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub id: RowId,
    pub barcode: String,
    pub amount: String,
    /// Computed cost; `None` when the row is not priceable
    pub preview: Option<Decimal>,
}

impl UsageRow {
    fn new(id: RowId) -> Self {
        Self {
            id,
            barcode: String::new(),
            amount: String::new(),
            preview: None,
        }
    }

    /// Preview cell text; empty when unset
    pub fn preview_display(&self) -> String {
        self.preview.map(format_currency).unwrap_or_default()
    }

    /// The submittable line, if barcode and amount are both usable
    pub fn line(&self) -> Option<UsageLineInput> {
        let barcode = self.barcode.trim();
        if barcode.is_empty() {
            return None;
        }
        parse_amount(&self.amount).map(|amount| UsageLineInput {
            barcode: barcode.to_string(),
            amount,
        })
    }
}

/// Header fields of a usage record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageDetails {
    pub client_name: String,
    pub usage_date: String,
    pub before_state: String,
    pub after_state: String,
}

/// Parse a typed amount as a positive whole number.
///
/// `" 4 "` and `"4.0"` are accepted; zero, negatives, fractions and
/// non-numeric text are not.
pub fn parse_amount(raw: &str) -> Option<u32> {
    let value = Decimal::from_str(raw.trim()).ok()?;
    if value <= Decimal::ZERO || !value.fract().is_zero() {
        return None;
    }
    value.to_u32()
}

/// The usage form state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageForm {
    pub details: UsageDetails,
    rows: Vec<UsageRow>,
    total: Decimal,
    next_id: u32,
}

impl Default for UsageForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageForm {
    /// A form with a single empty row
    pub fn new() -> Self {
        let mut form = Self {
            details: UsageDetails::default(),
            rows: Vec::new(),
            total: Decimal::ZERO,
            next_id: 0,
        };
        form.push_empty_row();
        form
    }

    fn push_empty_row(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(UsageRow::new(id));
        id
    }

    /// Rows in display order
    pub fn rows(&self) -> &[UsageRow] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&UsageRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Sum of the priceable rows' previews
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn total_display(&self) -> String {
        format_currency(self.total)
    }

    /// Append an empty row
    pub fn add_row(&mut self, catalog: &Catalog) -> RowId {
        let id = self.push_empty_row();
        self.recompute(catalog);
        id
    }

    /// Delete a row entirely. Returns false for an unknown id.
    pub fn remove_row(&mut self, id: RowId, catalog: &Catalog) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        let removed = self.rows.len() != before;
        self.recompute(catalog);
        removed
    }

    /// Update a row's barcode text
    pub fn set_barcode(&mut self, id: RowId, value: &str, catalog: &Catalog) -> bool {
        self.edit(id, catalog, |row| row.barcode = value.to_string())
    }

    /// Update a row's amount text
    pub fn set_amount(&mut self, id: RowId, value: &str, catalog: &Catalog) -> bool {
        self.edit(id, catalog, |row| row.amount = value.to_string())
    }

    fn edit(&mut self, id: RowId, catalog: &Catalog, apply: impl FnOnce(&mut UsageRow)) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        apply(row);
        self.recompute(catalog);
        true
    }

    /// Reprice every row and the total
    pub fn recompute(&mut self, catalog: &Catalog) {
        let mut total = Decimal::ZERO;

        for row in &mut self.rows {
            row.preview = catalog
                .unit_cost(row.barcode.trim())
                .zip(parse_amount(&row.amount))
                .map(|(unit_cost, amount)| unit_cost * Decimal::from(amount));

            if let Some(cost) = row.preview {
                total += cost;
            }
        }

        self.total = total;
    }

    /// Lines that would be submitted; incomplete rows are dropped
    pub fn lines(&self) -> Vec<UsageLineInput> {
        self.rows.iter().filter_map(UsageRow::line).collect()
    }

    /// Build the outgoing request.
    ///
    /// Fails when a header field is blank or no row is complete.
    pub fn submission(&self) -> Result<UsageRequest, FormError> {
        let request = UsageRequest {
            client_name: self.details.client_name.trim().to_string(),
            usage_date: self.details.usage_date.trim().to_string(),
            before_state: self.details.before_state.trim().to_string(),
            after_state: self.details.after_state.trim().to_string(),
            items: self.lines(),
        };
        request
            .validate()
            .map_err(|e| FormError::from_validation(e, &USAGE_FIELDS))?;
        Ok(request)
    }

    /// Back to a single empty row with blank details
    pub fn reset(&mut self) {
        self.details = UsageDetails::default();
        self.rows.clear();
        self.total = Decimal::ZERO;
        self.push_empty_row();
    }
}
