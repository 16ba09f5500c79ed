//! Dashboard Forms
//!
//! Client-side state for the three forms: the multi-row usage form with
//! live costing, and the add-item and adjust-stock forms. Each form turns
//! its raw text into a validated API request.

mod item;
mod usage;

pub use item::{AddItemForm, AdjustForm};
pub use usage::{parse_amount, Catalog, RowId, UsageDetails, UsageForm, UsageRow};

use thiserror::Error;
use validator::ValidationErrors;

/// A form that cannot be submitted as typed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{0}")]
    Invalid(String),
}

impl FormError {
    /// Message of the first failing field, in the order the form shows them.
    ///
    /// Fields missing from `field_order` rank after the listed ones, by name.
    pub fn from_validation(errors: ValidationErrors, field_order: &[&str]) -> Self {
        let rank = |field: &str| {
            field_order
                .iter()
                .position(|f| *f == field)
                .unwrap_or(field_order.len())
        };

        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| (rank(field), *field));

        let message = fields
            .into_iter()
            .flat_map(|(field, errs)| errs.iter().map(move |e| (field, e)))
            .next()
            .map(|(field, e)| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
            .unwrap_or_else(|| "Invalid form".to_string());

        FormError::Invalid(message)
    }
}

impl From<ValidationErrors> for FormError {
    fn from(errors: ValidationErrors) -> Self {
        Self::from_validation(errors, &[])
    }
}
