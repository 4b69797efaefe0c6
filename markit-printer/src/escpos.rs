//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data.

use crate::encoding::{SELECT_WPC1252, encode_for_printer, text_width};

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal receipt printers.
/// Text is encoded for the printer code page as it is written, so command
/// parameters are never touched by the text conversion.
pub struct EscPosBuilder {
    buf: Vec<u8>,
    width: usize,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(4096);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        buf.extend_from_slice(&SELECT_WPC1252);
        Self { buf, width }
    }

    // === Text Output ===

    /// Write text without a line break
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&encode_for_printer(s));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(b'\n');
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        self
    }

    /// Print and feed paper by n motion units (dots)
    pub fn feed_dots(&mut self, dots: u8) -> &mut Self {
        // ESC J n
        self.buf.extend_from_slice(&[0x1B, 0x4A, dots]);
        self
    }

    // === Alignment ===

    /// Align text to center
    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self
    }

    /// Align text to left (default)
    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Reset to normal size
    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    /// White-on-black printing
    pub fn inverse(&mut self) -> &mut Self {
        // GS B 1
        self.buf.extend_from_slice(&[0x1D, 0x42, 0x01]);
        self
    }

    /// Back to black-on-white printing
    pub fn inverse_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x42, 0x00]);
        self
    }

    // === Separators ===

    /// Print a line of '-' characters across the paper
    pub fn separator(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    ///
    /// Left text is left-aligned, right text is right-aligned,
    /// with spaces filling the gap.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = text_width(left);
        let rw = text_width(right);

        if lw + rw >= self.width {
            // Too long, just print with space
            self.text(left);
            self.text(" ");
            self.line(right);
        } else {
            let spaces = self.width - lw - rw;
            self.text(left);
            self.text(&" ".repeat(spaces));
            self.line(right);
        }
        self
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        // GS V 0
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    // === QR Code ===

    /// Print a QR code with the printer's native QR renderer
    ///
    /// Size: 1-16 (module size in dots)
    pub fn qr_code(&mut self, data: &str, size: u8) -> &mut Self {
        let size = size.clamp(1, 16);

        // Function 165: Select model (Model 2)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x04, 0x00, 0x31, 0x41, 0x32, 0x00]);

        // Function 167: Set module size
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, size]);

        // Function 169: Set error correction (M)
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x45, 0x31]);

        // Function 180: Store data
        let data_bytes = data.as_bytes();
        let len = data_bytes.len() + 3;
        let p_l = (len & 0xFF) as u8;
        let p_h = ((len >> 8) & 0xFF) as u8;
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, p_l, p_h, 0x31, 0x50, 0x30]);
        self.buf.extend_from_slice(data_bytes);

        // Function 181: Print
        self.buf
            .extend_from_slice(&[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x51, 0x30]);

        self
    }

    // === Build ===

    /// Finish the command sequence
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_builder_starts_with_init() {
        let data = EscPosBuilder::new(32).build();
        assert_eq!(&data[..2], &[0x1B, 0x40]);
        assert_eq!(&data[2..5], &[0x1B, 0x74, 16]);
    }

    #[test]
    fn test_builder_basic() {
        let mut b = EscPosBuilder::new(32);
        b.center()
            .double_size()
            .line("TITLE")
            .reset_size()
            .left()
            .line("body");

        let data = b.build();
        assert!(contains(&data, b"TITLE\n"));
        assert!(contains(&data, &[0x1D, 0x21, 0x11]));
        assert!(contains(&data, &[0x1B, 0x61, 0x00]));
    }

    #[test]
    fn test_line_lr() {
        let mut b = EscPosBuilder::new(20);
        b.line_lr("Cash", "120");

        let data = b.build();
        let s = String::from_utf8_lossy(&data);
        assert!(s.contains(&format!("Cash{}120\n", " ".repeat(13))));
    }

    #[test]
    fn test_separator() {
        let mut b = EscPosBuilder::new(10);
        b.separator();

        let data = b.build();
        assert!(contains(&data, b"----------\n"));
    }

    #[test]
    fn test_inverse_and_feed_dots() {
        let mut b = EscPosBuilder::new(10);
        b.inverse().feed_dots(10).inverse_off();
        let data = b.build();
        assert!(contains(
            &data,
            &[0x1D, 0x42, 0x01, 0x1B, 0x4A, 10, 0x1D, 0x42, 0x00]
        ));
    }

    #[test]
    fn test_qr_code_store_length() {
        let payload = "upi://pay?pa=x@bank";
        let mut b = EscPosBuilder::new(48);
        b.qr_code(payload, 6);
        let data = b.build();

        let len = (payload.len() + 3) as u8;
        let mut store = vec![0x1D, 0x28, 0x6B, len, 0x00, 0x31, 0x50, 0x30];
        store.extend_from_slice(payload.as_bytes());
        assert!(contains(&data, &store));
        assert!(contains(&data, &[0x1D, 0x28, 0x6B, 0x03, 0x00, 0x31, 0x43, 6]));
    }

    #[test]
    fn test_text_is_encoded() {
        let mut b = EscPosBuilder::new(10);
        b.text("₹");
        assert!(contains(&b.build(), b"Rs."));
    }
}
