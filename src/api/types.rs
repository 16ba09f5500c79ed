//! API Wire Types
//!
//! Shapes exchanged with the inventory JSON API. Decoding is lenient on
//! numbers: a malformed or missing numeric field becomes zero instead of
//! failing the whole response.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use validator::Validate;

/// Item attributes; keeps the order they were entered or received in
pub type Attributes = Map<String, Value>;

/// Stock classification computed server-side from thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    Low,
    Overstock,
    #[default]
    Healthy,
}

impl StockStatus {
    /// Badge label shown in the inventory table
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Low => "Low Stock",
            StockStatus::Overstock => "Overstock",
            StockStatus::Healthy => "Healthy",
        }
    }
}

impl<'de> Deserialize<'de> for StockStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.to_ascii_lowercase().as_str() {
            "low" => StockStatus::Low,
            "overstock" => StockStatus::Overstock,
            // server emits "ok"
            _ => StockStatus::Healthy,
        })
    }
}

/// An inventory item as cached by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub barcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub unit_size: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub unit_cost: Decimal,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stock_level: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub stock_value: Decimal,
    #[serde(default)]
    pub status: StockStatus,
    /// Free-form `key: value` pairs, in server order
    #[serde(default, deserialize_with = "lenient_attributes")]
    pub attributes: Attributes,
    #[serde(
        default,
        deserialize_with = "lenient_opt_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_stock: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_opt_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_stock: Option<i64>,
}

/// One stock movement in the activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub change_amount: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

/// One recorded usage event in the usage feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub client_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub details: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_cost: Decimal,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

/// An item waiting to be repurchased
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub barcode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub added_at: String,
}

/// `GET /api/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_value: Decimal,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_units: i64,
    #[serde(default)]
    pub low_stock: Vec<InventoryItem>,
    #[serde(default)]
    pub overstock: Vec<InventoryItem>,
    #[serde(default)]
    pub movements: Vec<ActivityEntry>,
    #[serde(default)]
    pub recent_usage: Vec<UsageEntry>,
}

/// `GET /api/shopping-list`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListResponse {
    #[serde(default)]
    pub items: Vec<ShoppingEntry>,
}

/// `POST /api/items`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewItemRequest {
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Item type is required"))]
    pub item_type: String,
    #[validate(length(min = 1, message = "Unit size is required"))]
    pub unit_size: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Decimal,
    #[validate(range(min = 1, message = "Initial stock must be at least 1"))]
    pub stock_level: i64,
    #[validate(range(min = 0, message = "Minimum threshold cannot be negative"))]
    pub min_stock: i64,
    #[validate(range(min = 1, message = "Maximum threshold must be at least 1"))]
    pub max_stock: i64,
    pub attributes: Attributes,
}

/// `POST /api/items/adjust`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct AdjustRequest {
    #[validate(length(min = 1, message = "Barcode is required"))]
    pub barcode: String,
    pub delta: i64,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

/// One `{barcode, amount}` line of a usage submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLineInput {
    pub barcode: String,
    pub amount: u32,
}

/// `POST /api/usage`
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct UsageRequest {
    #[validate(length(min = 1, message = "Client / project name is required"))]
    pub client_name: String,
    #[validate(length(min = 1, message = "Usage date is required"))]
    pub usage_date: String,
    #[validate(length(min = 1, message = "Before state is required"))]
    pub before_state: String,
    #[validate(length(min = 1, message = "After state is required"))]
    pub after_state: String,
    #[validate(length(min = 1, message = "Add at least one item with a barcode and amount"))]
    pub items: Vec<UsageLineInput>,
}

/// Response to `POST /api/usage`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UsageReceipt {
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_cost: Decimal,
}

/// Generic `{message}` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub new_stock: Option<i64>,
}

/// Error body of a non-2xx response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// `error` wins over `message`; empty strings count as absent
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|s| !s.is_empty())
            .or(self.message.filter(|s| !s.is_empty()))
    }
}

// ============================================
// Lenient decoders
// ============================================

/// Coerce a JSON value to a decimal; anything unusable is zero
pub fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else {
                n.as_f64().and_then(Decimal::from_f64).unwrap_or(Decimal::ZERO)
            }
        }
        Value::String(s) => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Coerce a JSON value to an integer; fractional numbers truncate
pub fn coerce_i64(value: &Value) -> i64 {
    coerce_opt_i64(value).unwrap_or(0)
}

/// Like [`coerce_i64`], but `None` for null or unparseable input
pub fn coerce_opt_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Coerce a JSON value to text: null is empty, scalars are stringified
pub fn coerce_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(coerce_decimal(&Value::deserialize(deserializer)?))
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(coerce_i64(&Value::deserialize(deserializer)?))
}

fn lenient_opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(coerce_opt_i64(&Value::deserialize(deserializer)?))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(coerce_string(Value::deserialize(deserializer)?))
}

fn lenient_attributes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Attributes, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map,
        _ => Attributes::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_item_decodes_server_shape() {
        let item: InventoryItem = serde_json::from_value(json!({
            "barcode": "A",
            "name": "Shampoo",
            "item_type": "liquid",
            "brand": "Acme",
            "unit_size": "500ml",
            "unit_cost": 2.5,
            "stock_level": 4,
            "stock_value": 10.0,
            "status": "ok",
            "attributes": {"scent": "mint", "vegan": true},
            "min_stock": 2,
            "max_stock": 10
        }))
        .unwrap();

        assert_eq!(item.unit_cost, dec!(2.5));
        assert_eq!(item.stock_level, 4);
        assert_eq!(item.status, StockStatus::Healthy);
        assert_eq!(item.attributes["vegan"], json!(true));
        assert_eq!(item.attributes.keys().collect::<Vec<_>>(), vec!["scent", "vegan"]);
        assert_eq!(item.max_stock, Some(10));
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let item: InventoryItem = serde_json::from_value(json!({
            "barcode": "B",
            "unit_cost": "abc",
            "stock_level": null,
            "stock_value": "7.25",
            "status": "low",
            "attributes": null
        }))
        .unwrap();

        assert_eq!(item.unit_cost, Decimal::ZERO);
        assert_eq!(item.stock_level, 0);
        assert_eq!(item.stock_value, dec!(7.25));
        assert_eq!(item.status, StockStatus::Low);
        assert!(item.attributes.is_empty());
    }

    #[test]
    fn test_one_sloppy_item_does_not_fail_dashboard() {
        let dashboard: DashboardResponse = serde_json::from_value(json!({
            "items": [
                {"barcode": "A", "name": "Shampoo", "stock_level": 4},
                {
                    "barcode": 1001,
                    "name": "Gel",
                    "brand": null,
                    "unit_size": 250,
                    "min_stock": "2",
                    "max_stock": "lots"
                }
            ],
            "movements": [{"name": null, "reason": "Restock", "change_amount": "3"}],
            "total_units": 4
        }))
        .unwrap();

        let sloppy = &dashboard.items[1];
        assert_eq!(sloppy.barcode, "1001");
        assert_eq!(sloppy.brand, "");
        assert_eq!(sloppy.unit_size, "250");
        assert_eq!(sloppy.min_stock, Some(2));
        assert_eq!(sloppy.max_stock, None);
        assert_eq!(dashboard.movements[0].name, "");
        assert_eq!(dashboard.movements[0].change_amount, 3);
    }

    #[test]
    fn test_coerce_opt_i64() {
        assert_eq!(coerce_opt_i64(&json!(7)), Some(7));
        assert_eq!(coerce_opt_i64(&json!("7.9")), Some(7));
        assert_eq!(coerce_opt_i64(&json!(null)), None);
        assert_eq!(coerce_opt_i64(&json!("many")), None);
        assert_eq!(coerce_i64(&json!("many")), 0);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(StockStatus::Low.label(), "Low Stock");
        assert_eq!(StockStatus::Overstock.label(), "Overstock");
        assert_eq!(StockStatus::Healthy.label(), "Healthy");
    }

    #[test]
    fn test_error_body_precedence() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "Item not found", "message": "x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Item not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"message": "Bad input"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Bad input"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.into_message().is_none());
    }

    #[test]
    fn test_usage_request_requires_items() {
        let request = UsageRequest {
            client_name: "Salon".to_string(),
            usage_date: "2026-10-15".to_string(),
            before_state: "dry".to_string(),
            after_state: "styled".to_string(),
            items: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_new_item_serializes_cost_as_number() {
        let request = NewItemRequest {
            barcode: "A".to_string(),
            name: "Shampoo".to_string(),
            brand: "Acme".to_string(),
            item_type: "liquid".to_string(),
            unit_size: "500ml".to_string(),
            total_cost: dec!(25.5),
            stock_level: 10,
            min_stock: 2,
            max_stock: 20,
            attributes: Attributes::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["total_cost"], json!(25.5));
        assert!(request.validate().is_ok());
    }
}
