//! Print job executor
//!
//! Composes a document, then hands it to the device gateway. A document
//! that cannot be composed never opens the printer.

use std::sync::Arc;

use chrono_tz::Tz;
use markit_printer::{DeviceGateway, PrintError, print_batch, print_job};
use thiserror::Error;
use tracing::{info, instrument};

use super::label::LabelRenderer;
use super::layout::{ReceiptLayout, ReportLayout};
use super::receipt::{ReceiptFooter, ReceiptRenderer};
use super::report::ReportRenderer;
use super::types::{Bill, LabelItem, Report, cell};
use super::RenderError;

#[derive(Debug, Error)]
pub enum PrintExecutorError {
    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Device(#[from] PrintError),
}

pub type PrintExecutorResult<T> = Result<T, PrintExecutorError>;

/// Outcome of a label job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSummary {
    pub printed: usize,
    pub skipped: usize,
}

/// Print job executor
///
/// Owns the renderers and the device gateway shared by all requests.
pub struct PrintExecutor {
    gateway: Arc<dyn DeviceGateway>,
    receipt: ReceiptRenderer,
    report: ReportRenderer,
    labels: LabelRenderer,
}

impl PrintExecutor {
    /// Create an executor with default 80mm layouts
    pub fn new(gateway: Arc<dyn DeviceGateway>, footer: ReceiptFooter, timezone: Tz) -> Self {
        Self {
            gateway,
            receipt: ReceiptRenderer::new(ReceiptLayout::default(), footer, timezone),
            report: ReportRenderer::new(ReportLayout::default(), timezone),
            labels: LabelRenderer::new(),
        }
    }

    /// Description of the printer jobs are sent to
    pub fn device(&self) -> String {
        self.gateway.describe()
    }

    /// Print a sales receipt
    #[instrument(skip(self, bill), fields(invoice = %cell(bill.invoice_number.as_ref())))]
    pub async fn print_bill(&self, bill: &Bill) -> PrintExecutorResult<()> {
        let data = self.receipt.render(bill)?;
        print_job(self.gateway.as_ref(), &data).await?;
        info!(bytes = data.len(), "Receipt sent");
        Ok(())
    }

    /// Print a sales report
    #[instrument(skip(self, report))]
    pub async fn print_report(&self, report: &Report) -> PrintExecutorResult<()> {
        let data = self.report.render(report)?;
        print_job(self.gateway.as_ref(), &data).await?;
        info!(bytes = data.len(), "Report sent");
        Ok(())
    }

    /// Print one label per valid item
    ///
    /// The device is not opened when no item is printable.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn print_labels(&self, items: &[LabelItem]) -> PrintExecutorResult<LabelSummary> {
        let batch = self.labels.render_batch(items);
        if batch.blocks.is_empty() {
            info!(skipped = batch.skipped, "No printable labels");
            return Ok(LabelSummary {
                printed: 0,
                skipped: batch.skipped,
            });
        }

        let printed = print_batch(self.gateway.as_ref(), &batch.blocks).await?;
        info!(printed, skipped = batch.skipped, "Labels sent");
        Ok(LabelSummary {
            printed,
            skipped: batch.skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::types::Scalar;
    use markit_printer::{MemoryPrinter, MemoryPrinterMode};

    fn executor(printer: &MemoryPrinter) -> PrintExecutor {
        PrintExecutor::new(
            Arc::new(printer.clone()),
            ReceiptFooter::default(),
            chrono_tz::Asia::Kolkata,
        )
    }

    fn label(barcode: Option<&str>) -> LabelItem {
        LabelItem {
            shopname: Some("Markit".into()),
            barcode: barcode.map(Scalar::from),
            product_name: Some("Tee".into()),
            name: Some("Blue".into()),
            sprice: Some(Scalar::Number(499.0)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_labels_write_one_block_each() {
        let printer = MemoryPrinter::new();
        let summary = executor(&printer)
            .print_labels(&[label(Some("1")), label(None), label(Some("3"))])
            .await
            .unwrap();

        assert_eq!(summary, LabelSummary { printed: 2, skipped: 1 });
        assert_eq!(printer.writes().len(), 2);
        assert_eq!(printer.opens(), 1);
        assert_eq!(printer.closes(), 1);
    }

    #[tokio::test]
    async fn test_no_valid_labels_skips_device() {
        let printer = MemoryPrinter::with_mode(MemoryPrinterMode::Missing);
        let summary = executor(&printer).print_labels(&[label(None)]).await.unwrap();
        assert_eq!(summary.printed, 0);
        assert_eq!(printer.opens(), 0);
    }

    #[tokio::test]
    async fn test_render_error_never_opens_device() {
        let printer = MemoryPrinter::new();
        let bill = Bill {
            invoice_number: Some("INV-1".into()),
            entries: Some(vec![Default::default()]),
            ..Default::default()
        };
        let err = executor(&printer).print_bill(&bill).await.unwrap_err();
        assert!(matches!(err, PrintExecutorError::Render(_)));
        assert_eq!(printer.opens(), 0);
    }

    #[tokio::test]
    async fn test_busy_device_is_reported() {
        let printer = MemoryPrinter::with_mode(MemoryPrinterMode::Busy);
        let err = executor(&printer)
            .print_labels(&[label(Some("1"))])
            .await
            .unwrap_err();
        assert!(matches!(err, PrintExecutorError::Device(PrintError::Busy(_))));
    }
}
