//! Device gateway for sending print data
//!
//! Supports USB printers exposed by the kernel printer class driver
//! (`/dev/usb/lp*` on Linux). A handle is opened per job and released on
//! every exit path: explicitly through [`DeviceHandle::close`], or by drop.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::error::{PrintError, PrintResult};

/// Number of usblp minors probed during auto-detection
const USB_LP_MINORS: usize = 16;

/// Something that can hand out an exclusive printer handle
#[async_trait]
pub trait DeviceGateway: Send + Sync {
    /// Acquire an exclusive handle to the printer
    async fn open(&self) -> PrintResult<Box<dyn DeviceHandle>>;

    /// Human readable description for logs
    fn describe(&self) -> String;
}

/// An open printer connection
#[async_trait]
pub trait DeviceHandle: Send {
    /// Stream raw command bytes to the device
    async fn write(&mut self, data: &[u8]) -> PrintResult<()>;

    /// Flush and release the device
    async fn close(self: Box<Self>) -> PrintResult<()>;
}

/// USB printer reached through its device node
#[derive(Debug, Clone)]
pub struct UsbPrinter {
    candidates: Vec<PathBuf>,
}

impl UsbPrinter {
    /// Probe `/dev/usb/lp0` .. `/dev/usb/lp15` and use the first one present
    pub fn auto_detect() -> Self {
        let candidates = (0..USB_LP_MINORS)
            .map(|i| PathBuf::from(format!("/dev/usb/lp{}", i)))
            .collect();
        Self { candidates }
    }

    /// Use an explicit device path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![path.into()],
        }
    }

    /// Probe the given paths in order
    pub fn with_candidates(candidates: Vec<PathBuf>) -> PrintResult<Self> {
        if candidates.is_empty() {
            return Err(PrintError::InvalidConfig(
                "No device paths to probe".to_string(),
            ));
        }
        Ok(Self { candidates })
    }

    /// First candidate path that exists
    async fn detect(&self) -> Option<&PathBuf> {
        for path in &self.candidates {
            if tokio::fs::try_exists(path).await.unwrap_or(false) {
                return Some(path);
            }
        }
        None
    }
}

#[async_trait]
impl DeviceGateway for UsbPrinter {
    #[instrument(skip(self), fields(device = %self.describe()))]
    async fn open(&self) -> PrintResult<Box<dyn DeviceHandle>> {
        let path = self
            .detect()
            .await
            .ok_or_else(|| PrintError::NotFound("No USB printer attached".to_string()))?;

        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .await
            .map_err(|e| {
                let target = path.display();
                match e.kind() {
                    std::io::ErrorKind::NotFound => {
                        PrintError::NotFound(format!("{} disappeared", target))
                    }
                    std::io::ErrorKind::ResourceBusy => {
                        PrintError::Busy(format!("{}: {}", target, e))
                    }
                    _ => PrintError::OpenFailed(format!("{}: {}", target, e)),
                }
            })?;

        info!(path = %path.display(), "Printer opened");
        Ok(Box::new(UsbHandle {
            path: path.clone(),
            file,
        }))
    }

    fn describe(&self) -> String {
        match self.candidates.as_slice() {
            [single] => single.display().to_string(),
            _ => "usb auto-detect".to_string(),
        }
    }
}

/// Open USB device node; the file descriptor is the exclusive handle
struct UsbHandle {
    path: PathBuf,
    file: File,
}

#[async_trait]
impl DeviceHandle for UsbHandle {
    async fn write(&mut self, data: &[u8]) -> PrintResult<()> {
        self.file.write_all(data).await.map_err(|e| {
            PrintError::Io(std::io::Error::new(
                e.kind(),
                format!("Write to {} failed: {}", self.path.display(), e),
            ))
        })
    }

    async fn close(self: Box<Self>) -> PrintResult<()> {
        let mut this = self;
        this.file.flush().await?;
        info!(path = %this.path.display(), "Printer closed");
        Ok(())
    }
}

/// Send one complete command sequence: acquire, write, release
///
/// The handle is closed even when the write fails; the write error wins.
#[instrument(skip(gateway, data), fields(device = %gateway.describe(), data_len = data.len()))]
pub async fn print_job(gateway: &dyn DeviceGateway, data: &[u8]) -> PrintResult<()> {
    let mut handle = gateway.open().await?;
    let written = handle.write(data).await;
    let closed = handle.close().await;

    if let Err(e) = &written {
        warn!(error = %e, "Print job failed");
    }
    written?;
    closed?;

    info!("Print job sent successfully");
    Ok(())
}

/// Send independent blocks (one per label) over a single handle
///
/// Stops at the first failed block; the handle is closed before the error
/// is returned. Returns the number of blocks written.
#[instrument(skip(gateway, blocks), fields(device = %gateway.describe(), blocks = blocks.len()))]
pub async fn print_batch(gateway: &dyn DeviceGateway, blocks: &[Vec<u8>]) -> PrintResult<usize> {
    let mut handle = gateway.open().await?;

    for (index, block) in blocks.iter().enumerate() {
        if let Err(e) = handle.write(block).await {
            warn!(index, error = %e, "Block write failed, closing printer");
            if let Err(close_err) = handle.close().await {
                warn!(error = %close_err, "Close after failed write also failed");
            }
            return Err(e);
        }
    }

    handle.close().await?;
    info!("Print batch sent successfully");
    Ok(blocks.len())
}

#[cfg(any(test, feature = "memory"))]
pub mod memory {
    //! In-memory gateway that records what would have been printed

    use std::sync::{Arc, Mutex};

    use super::*;

    /// Behaviour of a [`MemoryPrinter`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MemoryPrinterMode {
        Ready,
        /// No device attached
        Missing,
        /// Device held by someone else
        Busy,
        /// Writes succeed this many times, then fail
        FailAfter(usize),
    }

    #[derive(Debug, Default)]
    struct Recorded {
        opens: usize,
        closes: usize,
        writes: Vec<Vec<u8>>,
    }

    /// Gateway that keeps every write in memory
    #[derive(Debug, Clone)]
    pub struct MemoryPrinter {
        mode: MemoryPrinterMode,
        recorded: Arc<Mutex<Recorded>>,
    }

    impl MemoryPrinter {
        pub fn new() -> Self {
            Self::with_mode(MemoryPrinterMode::Ready)
        }

        pub fn with_mode(mode: MemoryPrinterMode) -> Self {
            Self {
                mode,
                recorded: Arc::new(Mutex::new(Recorded::default())),
            }
        }

        /// Successful opens
        pub fn opens(&self) -> usize {
            self.lock().opens
        }

        pub fn closes(&self) -> usize {
            self.lock().closes
        }

        /// Every successful write, in order
        pub fn writes(&self) -> Vec<Vec<u8>> {
            self.lock().writes.clone()
        }

        /// All written bytes concatenated
        pub fn output(&self) -> Vec<u8> {
            self.lock().writes.concat()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
            // A poisoned lock only means another test thread panicked
            self.recorded.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    impl Default for MemoryPrinter {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl DeviceGateway for MemoryPrinter {
        async fn open(&self) -> PrintResult<Box<dyn DeviceHandle>> {
            match self.mode {
                MemoryPrinterMode::Missing => {
                    return Err(PrintError::NotFound("No USB printer attached".to_string()));
                }
                MemoryPrinterMode::Busy => {
                    return Err(PrintError::Busy("memory printer in use".to_string()));
                }
                _ => {}
            }
            self.lock().opens += 1;
            Ok(Box::new(MemoryHandle {
                printer: self.clone(),
            }))
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }
    }

    struct MemoryHandle {
        printer: MemoryPrinter,
    }

    #[async_trait]
    impl DeviceHandle for MemoryHandle {
        async fn write(&mut self, data: &[u8]) -> PrintResult<()> {
            let mut recorded = self.printer.lock();
            if let MemoryPrinterMode::FailAfter(limit) = self.printer.mode
                && recorded.writes.len() >= limit
            {
                return Err(PrintError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "memory printer unplugged",
                )));
            }
            recorded.writes.push(data.to_vec());
            Ok(())
        }

        async fn close(self: Box<Self>) -> PrintResult<()> {
            self.printer.lock().closes += 1;
            Ok(())
        }
    }
}
