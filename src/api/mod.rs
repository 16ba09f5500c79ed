//! Inventory API
//!
//! Wire types and the HTTP client for the inventory server.
//!
//! ## Endpoints
//!
//! - `GET /api/dashboard` - items, totals, alerts, recent activity
//! - `GET /api/shopping-list` - items awaiting repurchase
//! - `POST /api/items` - create an item
//! - `POST /api/items/adjust` - adjust stock by a signed delta
//! - `POST /api/usage` - record a usage event

mod client;
mod error;
mod types;

pub use client::{ClientConfig, HttpInventoryApi, InventoryApi};
pub use error::{ApiError, ApiResult};
pub use types::{
    coerce_decimal, coerce_i64, coerce_opt_i64, coerce_string, Ack, Attributes, ActivityEntry, AdjustRequest, DashboardResponse, ErrorBody,
    InventoryItem, NewItemRequest, ShoppingEntry, ShoppingListResponse, StockStatus, UsageEntry,
    UsageLineInput, UsageReceipt, UsageRequest,
};
