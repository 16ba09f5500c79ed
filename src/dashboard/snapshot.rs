//! Dashboard Snapshot
//!
//! One consistent fetch result. Renderers only ever see a whole snapshot;
//! a refresh builds a new one rather than patching the old.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::api::{
    ActivityEntry, DashboardResponse, InventoryItem, ShoppingEntry, ShoppingListResponse,
    UsageEntry,
};
use crate::chart::{BarDatum, BarStyle, DonutSegment};
use crate::format::format_currency;
use crate::forms::Catalog;

/// Headline numbers shown in the metric cards
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_value: Decimal,
    pub total_units: i64,
    pub low_stock: usize,
    pub overstock: usize,
}

impl Summary {
    /// `(title, value)` pairs in card order
    pub fn cards(&self) -> [(&'static str, String); 4] {
        [
            ("Total Inventory Value", format_currency(self.total_value)),
            ("Total Units", self.total_units.to_string()),
            ("Low Stock Items", self.low_stock.to_string()),
            ("Overstocked Items", self.overstock.to_string()),
        ]
    }
}

/// Immutable view of the inventory at one refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub items: Vec<InventoryItem>,
    pub total_value: Decimal,
    pub total_units: i64,
    pub low_stock: Vec<InventoryItem>,
    pub overstock: Vec<InventoryItem>,
    pub movements: Vec<ActivityEntry>,
    pub recent_usage: Vec<UsageEntry>,
    pub shopping: Vec<ShoppingEntry>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Combine a dashboard and shopping-list response from the same refresh
    pub fn from_responses(dashboard: DashboardResponse, shopping: ShoppingListResponse) -> Self {
        Self {
            items: dashboard.items,
            total_value: dashboard.total_value,
            total_units: dashboard.total_units,
            low_stock: dashboard.low_stock,
            overstock: dashboard.overstock,
            movements: dashboard.movements,
            recent_usage: dashboard.recent_usage,
            shopping: shopping.items,
            fetched_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            total_value: self.total_value,
            total_units: self.total_units,
            low_stock: self.low_stock.len(),
            overstock: self.overstock.len(),
        }
    }

    /// Stock level per item, in item order
    pub fn distribution_series(&self) -> Vec<BarDatum> {
        self.items
            .iter()
            .map(|item| BarDatum::new(item.name.clone(), item.stock_level as f64))
            .collect()
    }

    /// Gradient used for the distribution bars
    pub fn distribution_style() -> BarStyle {
        BarStyle {
            color_start: "#4b7bec".to_string(),
            color_end: "#a855f7".to_string(),
        }
    }

    /// Low stock, overstock, healthy - always in that order
    pub fn health_segments(&self) -> Vec<DonutSegment> {
        let low = self.low_stock.len();
        let over = self.overstock.len();
        let healthy = self.items.len().saturating_sub(low + over);

        vec![
            DonutSegment::new(low as f64, "#f97316", "#facc15"),
            DonutSegment::new(over as f64, "#22d3ee", "#3b82f6"),
            DonutSegment::new(healthy as f64, "#34d399", "#10b981"),
        ]
    }

    /// Barcode → unit cost lookup for the usage form
    pub fn catalog(&self) -> Catalog {
        Catalog::from_items(&self.items)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::api::StockStatus;
    use crate::api::Attributes;

    pub fn item(barcode: &str, name: &str, unit_cost: Decimal, stock: i64, status: StockStatus) -> InventoryItem {
        InventoryItem {
            barcode: barcode.to_string(),
            name: name.to_string(),
            item_type: "liquid".to_string(),
            brand: "Acme".to_string(),
            unit_size: "500ml".to_string(),
            unit_cost,
            stock_level: stock,
            stock_value: unit_cost * Decimal::from(stock),
            status,
            attributes: Attributes::new(),
            min_stock: None,
            max_stock: None,
        }
    }

    pub fn dashboard_response() -> DashboardResponse {
        let low = item("B", "Gel", Decimal::new(125, 2), 1, StockStatus::Low);
        let items = vec![
            item("A", "Shampoo", Decimal::new(250, 2), 4, StockStatus::Healthy),
            low.clone(),
            item("C", "Wax", Decimal::new(300, 2), 7, StockStatus::Healthy),
        ];
        DashboardResponse {
            total_value: items.iter().map(|i| i.stock_value).sum(),
            total_units: items.iter().map(|i| i.stock_level).sum(),
            items,
            low_stock: vec![low],
            overstock: vec![],
            movements: vec![ActivityEntry {
                name: "Shampoo".to_string(),
                reason: "Initial stock".to_string(),
                change_amount: 4,
                created_at: "2026-10-15T09:00:00".to_string(),
            }],
            recent_usage: vec![],
        }
    }

    pub fn shopping_response() -> ShoppingListResponse {
        ShoppingListResponse {
            items: vec![ShoppingEntry {
                name: "Gel".to_string(),
                barcode: "B".to_string(),
                brand: "Acme".to_string(),
                item_type: "liquid".to_string(),
                added_at: "2026-10-15T10:00:00".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary() {
        let snapshot = DashboardSnapshot::from_responses(dashboard_response(), shopping_response());
        let summary = snapshot.summary();

        assert_eq!(summary.total_units, 12);
        assert_eq!(summary.total_value, dec!(32.25));
        assert_eq!(summary.low_stock, 1);
        assert_eq!(
            summary.cards()[0],
            ("Total Inventory Value", "$32.25".to_string())
        );
    }

    #[test]
    fn test_chart_series() {
        let snapshot = DashboardSnapshot::from_responses(dashboard_response(), shopping_response());

        let bars = snapshot.distribution_series();
        assert_eq!(bars.iter().map(|b| b.value).collect::<Vec<_>>(), vec![4.0, 1.0, 7.0]);
        assert_eq!(bars[0].label, "Shampoo");

        let segments: Vec<f64> = snapshot.health_segments().iter().map(|s| s.value).collect();
        assert_eq!(segments, vec![1.0, 0.0, 2.0]);
        assert_eq!(segments.iter().sum::<f64>(), snapshot.items.len() as f64);
    }

    #[test]
    fn test_healthy_count_never_negative() {
        let mut dashboard = dashboard_response();
        dashboard.overstock = dashboard.items.clone();
        let snapshot = DashboardSnapshot::from_responses(dashboard, shopping_response());

        assert_eq!(snapshot.health_segments()[2].value, 0.0);
    }

    #[test]
    fn test_catalog_from_items() {
        let snapshot = DashboardSnapshot::from_responses(dashboard_response(), shopping_response());
        assert_eq!(snapshot.catalog().unit_cost("A"), Some(dec!(2.50)));
    }
}
