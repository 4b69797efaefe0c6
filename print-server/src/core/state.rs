use std::sync::Arc;

use markit_printer::{DeviceGateway, UsbPrinter};

use crate::core::Config;
use crate::printing::{PrintExecutor, ReceiptFooter};

/// Shared server state
///
/// Cloned into every handler; the executor sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub executor: Arc<PrintExecutor>,
}

impl ServerState {
    /// Build state for the USB printer named by the configuration
    pub fn initialize(config: &Config) -> Self {
        let printer = match &config.printer_device {
            Some(path) => UsbPrinter::with_path(path),
            None => UsbPrinter::auto_detect(),
        };
        Self::with_gateway(config, Arc::new(printer))
    }

    /// Build state around any device gateway
    pub fn with_gateway(config: &Config, gateway: Arc<dyn DeviceGateway>) -> Self {
        let footer = ReceiptFooter {
            customer_care: config.customer_care_phone.clone(),
            return_days: config.return_days,
        };
        let executor = PrintExecutor::new(gateway, footer, config.timezone);
        tracing::info!(device = %executor.device(), "Printer gateway ready");

        Self {
            config: config.clone(),
            executor: Arc::new(executor),
        }
    }
}
