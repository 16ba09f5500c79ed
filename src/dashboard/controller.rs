//! Dashboard Controller
//!
//! Owns the API client, the view, the latest snapshot and the form state.
//! Refreshes fetch both endpoints together and only replace the snapshot
//! when both succeed.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::snapshot::DashboardSnapshot;
use super::toast::{Toast, Toasts};
use super::view::{render_snapshot, DashboardView};
use crate::api::{ApiError, InventoryApi, UsageReceipt};
use crate::format::format_currency;
use crate::forms::{AddItemForm, AdjustForm, Catalog, FormError, RowId, UsageForm};

/// Errors from dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] FormError),
}

/// Dashboard state and actions
pub struct Dashboard<A, V> {
    api: A,
    view: V,
    snapshot: Option<Arc<DashboardSnapshot>>,
    catalog: Catalog,
    usage_form: UsageForm,
    add_item_form: AddItemForm,
    adjust_form: AdjustForm,
    toasts: Toasts,
}

impl<A: InventoryApi, V: DashboardView> Dashboard<A, V> {
    pub fn new(api: A, view: V, toast_duration: Duration) -> Self {
        Self {
            api,
            view,
            snapshot: None,
            catalog: Catalog::default(),
            usage_form: UsageForm::new(),
            add_item_form: AddItemForm::default(),
            adjust_form: AdjustForm::default(),
            toasts: Toasts::new(toast_duration),
        }
    }

    /// Last successfully fetched snapshot
    pub fn snapshot(&self) -> Option<Arc<DashboardSnapshot>> {
        self.snapshot.clone()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The visible toast, if any
    pub fn toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    /// Fetch both endpoints and re-render everything.
    ///
    /// On failure nothing is replaced: the previous snapshot and render
    /// stay as they were, and the error is shown as a toast.
    pub async fn refresh(&mut self) -> Result<Arc<DashboardSnapshot>, DashboardError> {
        let fetched = tokio::try_join!(self.api.dashboard(), self.api.shopping_list());

        let (dashboard, shopping) = match fetched {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!(error = %e, "Dashboard refresh failed, keeping previous data");
                self.toasts.error(e.to_string());
                return Err(e.into());
            }
        };

        let snapshot = Arc::new(DashboardSnapshot::from_responses(dashboard, shopping));
        render_snapshot(&mut self.view, &snapshot);

        self.catalog = snapshot.catalog();
        self.usage_form.recompute(&self.catalog);
        self.snapshot = Some(Arc::clone(&snapshot));

        tracing::debug!(
            items = snapshot.items.len(),
            low_stock = snapshot.low_stock.len(),
            shopping = snapshot.shopping.len(),
            "Dashboard refreshed"
        );

        Ok(snapshot)
    }

    // ============ Usage form ============

    pub fn usage_form(&self) -> &UsageForm {
        &self.usage_form
    }

    /// Header fields (client, date, before/after state)
    pub fn usage_details_mut(&mut self) -> &mut crate::forms::UsageDetails {
        &mut self.usage_form.details
    }

    pub fn add_usage_row(&mut self) -> RowId {
        self.usage_form.add_row(&self.catalog)
    }

    pub fn remove_usage_row(&mut self, id: RowId) -> bool {
        self.usage_form.remove_row(id, &self.catalog)
    }

    pub fn set_usage_barcode(&mut self, id: RowId, value: &str) -> bool {
        self.usage_form.set_barcode(id, value, &self.catalog)
    }

    pub fn set_usage_amount(&mut self, id: RowId, value: &str) -> bool {
        self.usage_form.set_amount(id, value, &self.catalog)
    }

    /// Submit the usage form; on success the form resets and data refreshes
    pub async fn record_usage(&mut self) -> Result<UsageReceipt, DashboardError> {
        let request = self.usage_form.submission().map_err(|e| self.fail(e))?;
        tracing::info!(
            client = %request.client_name,
            lines = request.items.len(),
            "Recording usage"
        );

        let receipt = self.api.record_usage(&request).await.map_err(|e| self.fail(e))?;

        self.toasts.success(format!(
            "Usage recorded. Total {}",
            format_currency(receipt.total_cost)
        ));
        self.usage_form.reset();
        self.refresh_after_action().await;
        Ok(receipt)
    }

    // ============ Item forms ============

    pub fn add_item_form_mut(&mut self) -> &mut AddItemForm {
        &mut self.add_item_form
    }

    pub fn adjust_form_mut(&mut self) -> &mut AdjustForm {
        &mut self.adjust_form
    }

    /// Submit the add-item form
    pub async fn add_item(&mut self) -> Result<(), DashboardError> {
        let request = self.add_item_form.to_request().map_err(|e| self.fail(e))?;
        tracing::info!(barcode = %request.barcode, "Adding item");

        self.api.create_item(&request).await.map_err(|e| self.fail(e))?;

        self.add_item_form.reset();
        self.toasts.success("Item added successfully");
        self.refresh_after_action().await;
        Ok(())
    }

    /// Submit the adjust-stock form
    pub async fn adjust_stock(&mut self) -> Result<(), DashboardError> {
        let request = self.adjust_form.to_request().map_err(|e| self.fail(e))?;
        tracing::info!(barcode = %request.barcode, delta = request.delta, "Adjusting stock");

        self.api.adjust_stock(&request).await.map_err(|e| self.fail(e))?;

        self.adjust_form.reset();
        self.toasts.success("Stock updated");
        self.refresh_after_action().await;
        Ok(())
    }

    fn fail(&mut self, error: impl Into<DashboardError>) -> DashboardError {
        let error = error.into();
        self.toasts.error(error.to_string());
        error
    }

    // A failed follow-up refresh already shows its own toast
    async fn refresh_after_action(&mut self) {
        let _ = self.refresh().await;
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::FakeApi;
    use super::*;
    use crate::dashboard::toast::ToastVariant;
    use crate::dashboard::view::MemoryView;
    use crate::api::UsageLineInput;
    use std::sync::atomic::Ordering;

    fn dashboard() -> (Arc<FakeApi>, Dashboard<Arc<FakeApi>, MemoryView>) {
        let api = Arc::new(FakeApi::default());
        let dashboard = Dashboard::new(
            Arc::clone(&api),
            MemoryView::new(600.0, 300.0),
            Duration::from_secs(3),
        );
        (api, dashboard)
    }

    fn fill_usage_details<A: InventoryApi, V: DashboardView>(dashboard: &mut Dashboard<A, V>) {
        let details = dashboard.usage_details_mut();
        details.client_name = "Salon".to_string();
        details.usage_date = "2026-10-15".to_string();
        details.before_state = "dry".to_string();
        details.after_state = "styled".to_string();
    }

    #[tokio::test]
    async fn test_refresh_renders_snapshot() {
        let (_api, mut dashboard) = dashboard();
        let snapshot = dashboard.refresh().await.unwrap();

        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(dashboard.view().inventory.rows.len(), 3);
        assert_eq!(dashboard.view().shopping.rows.len(), 1);
        assert_eq!(dashboard.catalog().len(), 3);
        assert!(dashboard.toast().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_render() {
        let (api, mut dashboard) = dashboard();
        dashboard.refresh().await.unwrap();
        let before_view = dashboard.view().clone();
        let before_snapshot = dashboard.snapshot().unwrap();

        // dashboard succeeds with new data, shopping list fails
        *api.dashboard.lock().unwrap() = Some(Default::default());
        api.fail_shopping.store(true, Ordering::SeqCst);

        let err = dashboard.refresh().await.unwrap_err();
        assert!(matches!(err, DashboardError::Api(ApiError::Timeout)));
        assert_eq!(dashboard.view(), &before_view);
        assert!(Arc::ptr_eq(&dashboard.snapshot().unwrap(), &before_snapshot));

        let toast = dashboard.toast().unwrap();
        assert_eq!(toast.variant, ToastVariant::Error);
        assert_eq!(toast.message, "Request timed out");
    }

    #[tokio::test]
    async fn test_failed_first_refresh_leaves_view_empty() {
        let (api, mut dashboard) = dashboard();
        api.fail_dashboard.store(true, Ordering::SeqCst);

        assert!(dashboard.refresh().await.is_err());
        assert!(dashboard.snapshot().is_none());
        assert!(dashboard.view().inventory.rows.is_empty());
        assert!(dashboard.view().distribution.commands().is_empty());
    }

    #[tokio::test]
    async fn test_usage_preview_uses_refreshed_catalog() {
        let (_api, mut dashboard) = dashboard();
        let row = dashboard.usage_form().rows()[0].id;
        dashboard.set_usage_barcode(row, "A");
        dashboard.set_usage_amount(row, "4");
        assert_eq!(dashboard.usage_form().total_display(), "$0.00");

        dashboard.refresh().await.unwrap();
        assert_eq!(dashboard.usage_form().total_display(), "$10.00");
    }

    #[tokio::test]
    async fn test_record_usage_submits_valid_rows_and_resets() {
        let (api, mut dashboard) = dashboard();
        dashboard.refresh().await.unwrap();
        fill_usage_details(&mut dashboard);

        let valid = dashboard.usage_form().rows()[0].id;
        dashboard.set_usage_barcode(valid, "A");
        dashboard.set_usage_amount(valid, "2");
        let invalid = dashboard.add_usage_row();
        dashboard.set_usage_barcode(invalid, "X");

        let receipt = dashboard.record_usage().await.unwrap();
        assert_eq!(format_currency(receipt.total_cost), "$5.00");

        let sent = api.usage_requests.lock().unwrap();
        assert_eq!(
            sent[0].items,
            vec![UsageLineInput {
                barcode: "A".to_string(),
                amount: 2
            }]
        );
        assert_eq!(dashboard.usage_form().rows().len(), 1);
        assert!(dashboard.usage_form().rows()[0].barcode.is_empty());
        assert_eq!(dashboard.toast().unwrap().message, "Usage recorded. Total $5.00");
        assert_eq!(api.dashboard_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rejected_usage_keeps_rows() {
        let (api, mut dashboard) = dashboard();
        dashboard.refresh().await.unwrap();
        fill_usage_details(&mut dashboard);
        let row = dashboard.usage_form().rows()[0].id;
        dashboard.set_usage_barcode(row, "A");
        dashboard.set_usage_amount(row, "2");
        api.fail_writes.store(true, Ordering::SeqCst);

        assert!(dashboard.record_usage().await.is_err());
        assert_eq!(dashboard.usage_form().rows()[0].barcode, "A");
        assert_eq!(
            dashboard.toast().unwrap().message,
            "Insufficient stock for Shampoo"
        );
    }

    #[tokio::test]
    async fn test_incomplete_usage_not_sent() {
        let (api, mut dashboard) = dashboard();
        fill_usage_details(&mut dashboard);

        let err = dashboard.record_usage().await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert!(api.usage_requests.lock().unwrap().is_empty());
        assert_eq!(dashboard.toast().unwrap().variant, ToastVariant::Error);
    }

    #[tokio::test]
    async fn test_adjust_stock_success_resets_form() {
        let (_api, mut dashboard) = dashboard();
        {
            let form = dashboard.adjust_form_mut();
            form.barcode = "A".to_string();
            form.delta = "5".to_string();
            form.reason = "Restock".to_string();
        }

        dashboard.adjust_stock().await.unwrap();
        assert!(dashboard.adjust_form_mut().barcode.is_empty());
        assert_eq!(dashboard.toast().unwrap().message, "Stock updated");
        assert!(dashboard.snapshot().is_some());
    }

    #[tokio::test]
    async fn test_add_item_validation_error_shown() {
        let (_api, mut dashboard) = dashboard();
        dashboard.add_item_form_mut().name = "Shampoo".to_string();

        assert!(dashboard.add_item().await.is_err());
        assert_eq!(dashboard.add_item_form_mut().name, "Shampoo");
        assert_eq!(dashboard.toast().unwrap().variant, ToastVariant::Error);
    }
}
