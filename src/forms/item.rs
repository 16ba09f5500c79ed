//! Add-item and adjust-stock forms

use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use validator::Validate;

use super::FormError;
use crate::api::{AdjustRequest, NewItemRequest};
use crate::format::parse_attributes;

// Field order as laid out on the forms
const ADD_ITEM_FIELDS: [&str; 9] = [
    "name",
    "barcode",
    "brand",
    "item_type",
    "unit_size",
    "total_cost",
    "stock_level",
    "min_stock",
    "max_stock",
];
const ADJUST_FIELDS: [&str; 3] = ["barcode", "delta", "reason"];

/// Raw text of the add-item form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddItemForm {
    pub name: String,
    pub barcode: String,
    pub brand: String,
    pub item_type: String,
    pub unit_size: String,
    pub total_cost: String,
    pub stock_level: String,
    pub min_stock: String,
    pub max_stock: String,
    /// `key: value` pairs separated by newlines or commas
    pub attributes: String,
}

impl AddItemForm {
    /// Parse and validate into a create request
    pub fn to_request(&self) -> Result<NewItemRequest, FormError> {
        let total_cost = Decimal::from_str(self.total_cost.trim())
            .map_err(|_| FormError::Invalid("Invalid numeric values provided".to_string()))?;
        if total_cost < Decimal::ZERO {
            return Err(FormError::Invalid("Total cost cannot be negative".to_string()));
        }

        let request = NewItemRequest {
            barcode: self.barcode.trim().to_string(),
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            item_type: self.item_type.trim().to_string(),
            unit_size: self.unit_size.trim().to_string(),
            total_cost,
            stock_level: parse_whole(&self.stock_level)?,
            min_stock: parse_whole(&self.min_stock)?,
            max_stock: parse_whole(&self.max_stock)?,
            attributes: parse_attributes(&self.attributes),
        };
        request
            .validate()
            .map_err(|e| FormError::from_validation(e, &ADD_ITEM_FIELDS))?;
        Ok(request)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Raw text of the adjust-stock form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdjustForm {
    pub barcode: String,
    /// Positive adds stock, negative deducts
    pub delta: String,
    pub reason: String,
}

impl AdjustForm {
    pub fn to_request(&self) -> Result<AdjustRequest, FormError> {
        let delta = self
            .delta
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::Invalid("Quantity change must be a whole number".to_string()))?;

        let request = AdjustRequest {
            barcode: self.barcode.trim().to_string(),
            delta,
            reason: self.reason.trim().to_string(),
        };
        request
            .validate()
            .map_err(|e| FormError::from_validation(e, &ADJUST_FIELDS))?;
        Ok(request)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_whole(raw: &str) -> Result<i64, FormError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| FormError::Invalid("Invalid numeric values provided".to_string()))
}
