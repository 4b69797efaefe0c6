//! Receipt, report and label printing
//!
//! Payloads are composed into printer bytes here, then handed to the
//! device gateway by the [`PrintExecutor`]:
//! - Receipts and reports: ESC/POS for the 80mm thermal printer
//! - Labels: TSPL blocks, one per valid item

pub mod executor;
pub mod label;
pub mod layout;
pub mod money;
pub mod receipt;
pub mod report;
pub mod types;
pub mod upi;

use thiserror::Error;

pub use executor::{LabelSummary, PrintExecutor, PrintExecutorError, PrintExecutorResult};
pub use label::{LabelBatch, LabelRenderer};
pub use layout::{ReceiptLayout, ReportLayout};
pub use money::MoneyError;
pub use receipt::{ReceiptFooter, ReceiptRenderer};
pub use report::ReportRenderer;
pub use types::*;

/// A payload that cannot be composed into a document
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0} is missing")]
    MissingField(&'static str),

    #[error("{field} is {source}")]
    InvalidAmount {
        field: &'static str,
        source: MoneyError,
    },

    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl RenderError {
    /// Attach the payload field name to a money error
    pub fn amount(field: &'static str) -> impl FnOnce(MoneyError) -> Self {
        move |source| match source {
            MoneyError::Missing => Self::MissingField(field),
            source => Self::InvalidAmount { field, source },
        }
    }
}
