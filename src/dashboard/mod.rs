//! Dashboard Orchestration
//!
//! Ties the API client, snapshot, renderers, forms and toasts together,
//! and runs periodic refreshes.

mod controller;
mod scheduler;
mod snapshot;
mod toast;
mod view;

pub use controller::{Dashboard, DashboardError};
pub use scheduler::{
    RefreshHandle, RefreshScheduler, SharedDashboard, DEFAULT_REFRESH_INTERVAL,
    MIN_REFRESH_INTERVAL,
};
pub use snapshot::{DashboardSnapshot, Summary};
pub use toast::{Toast, ToastVariant, Toasts, DEFAULT_TOAST_DURATION};
pub use view::{render_snapshot, DashboardView, MemoryView};
