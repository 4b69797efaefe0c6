//! # markit-printer
//!
//! Receipt and label printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - ESC/POS command building (receipt printers)
//! - TSPL command building (label printers)
//! - Fixed-width column cells
//! - Text encoding for single-byte printer code pages
//! - USB device printing (usblp device nodes)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Bill, report and label rendering → print-server
//!
//! ## Example
//!
//! ```ignore
//! use markit_printer::{EscPosBuilder, UsbPrinter, print_job};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("MARKIT");
//! builder.reset_size();
//! builder.separator();
//! builder.cut();
//!
//! let printer = UsbPrinter::auto_detect();
//! print_job(&printer, &builder.build()).await?;
//! ```

mod device;
mod encoding;
mod error;
mod escpos;
pub mod layout;
mod tspl;

// Re-exports
pub use device::{DeviceGateway, DeviceHandle, UsbPrinter, print_batch, print_job};
pub use encoding::{encode_for_printer, text_width};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use layout::{align_center, align_start};
pub use tspl::TsplBuilder;

#[cfg(any(test, feature = "memory"))]
pub use device::memory::{MemoryPrinter, MemoryPrinterMode};
