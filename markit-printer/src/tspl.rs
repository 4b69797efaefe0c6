//! TSPL command builder
//!
//! TSPL is the line-oriented command language spoken by most thermal label
//! printers. Each command is one text line terminated by CRLF; one label is
//! a `SIZE`..`PRINT` block.

use crate::encoding::encode_for_printer;

/// TSPL command builder for one label
#[derive(Debug, Default)]
pub struct TsplBuilder {
    buf: Vec<u8>,
}

impl TsplBuilder {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(512),
        }
    }

    fn command(&mut self, cmd: &str) -> &mut Self {
        self.buf.extend_from_slice(&encode_for_printer(cmd));
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    // === Label Setup ===

    /// Label stock size in millimetres
    pub fn size_mm(&mut self, width: u32, height: u32) -> &mut Self {
        self.command(&format!("SIZE {} mm,{} mm", width, height))
    }

    /// Gap between labels and its offset, in millimetres
    pub fn gap_mm(&mut self, gap: f32, offset: f32) -> &mut Self {
        self.command(&format!("GAP {} mm,{} mm", gap, offset))
    }

    /// Print direction (0 or 1)
    pub fn direction(&mut self, direction: u8) -> &mut Self {
        self.command(&format!("DIRECTION {}", direction))
    }

    /// Clear the image buffer
    pub fn cls(&mut self) -> &mut Self {
        self.command("CLS")
    }

    // === Drawing ===

    /// Draw text with a built-in font
    ///
    /// `font` is the TSPL font name ("1".."8"); multipliers scale each axis.
    pub fn text(&mut self, x: u32, y: u32, font: &str, content: &str) -> &mut Self {
        self.command(&format!(
            "TEXT {},{},\"{}\",0,1,1,\"{}\"",
            x,
            y,
            font,
            escape(content)
        ))
    }

    /// Draw a filled bar
    pub fn bar(&mut self, x: u32, y: u32, width: u32, height: u32) -> &mut Self {
        self.command(&format!("BAR {},{},{},{}", x, y, width, height))
    }

    /// Draw a code-128 barcode without human readable text
    pub fn barcode_128(&mut self, x: u32, y: u32, height: u32, content: &str) -> &mut Self {
        self.command(&format!(
            "BARCODE {},{},\"128\",{},0,0,3,3,\"{}\"",
            x,
            y,
            height,
            escape(content)
        ))
    }

    /// Print the buffer: `sets` labels, `copies` of each
    pub fn print(&mut self, sets: u32, copies: u32) -> &mut Self {
        self.command(&format!("PRINT {},{}", sets, copies))
    }

    // === Build ===

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// Escape a double quote inside a quoted TSPL string
fn escape(content: &str) -> String {
    content.replace('"', "\\[\"]")
}
