//! # Inventory Dashboard
//!
//! Client side of an inventory management dashboard: fetches inventory
//! data from a JSON API, renders it into tables, feeds and charts, and
//! drives the add-item, adjust-stock and usage forms.
//!
//! ## Modules
//!
//! - [`api`]: Wire types and the HTTP client
//! - [`chart`]: Bar and donut charts over a [`chart::Canvas`]
//! - [`render`]: Inventory/shopping tables and activity/usage feeds
//! - [`forms`]: Usage form with live costing, item forms
//! - [`dashboard`]: Snapshot, view, toasts, orchestration and scheduling
//! - [`format`]: Currency, date and attribute formatting
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inventory_dashboard::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let api = HttpInventoryApi::new(config.api.client_config())?;
//!     let view = MemoryView::new(config.dashboard.chart_width, config.dashboard.chart_height);
//!
//!     let mut dashboard = Dashboard::new(api, view, config.dashboard.toast_duration());
//!     let snapshot = dashboard.refresh().await?;
//!
//!     println!("{} items, {} low on stock", snapshot.items.len(), snapshot.low_stock.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod format;
pub mod forms;
pub mod render;

// Re-export top-level types for convenience
pub use api::{
    ApiError, ApiResult, ClientConfig, HttpInventoryApi, InventoryApi, InventoryItem,
    StockStatus,
};

pub use chart::{draw_bar_chart, draw_donut_chart, BarDatum, Canvas, DonutSegment, RecordingCanvas};

pub use dashboard::{
    Dashboard, DashboardError, DashboardSnapshot, DashboardView, MemoryView, RefreshHandle,
    RefreshScheduler, Toast, ToastVariant,
};

pub use forms::{AddItemForm, AdjustForm, Catalog, FormError, UsageForm};

pub use config::{Config, ConfigError};
