//! Text encoding utilities for receipt and label printers
//!
//! Thermal printers sold for Indian retail ship with single-byte code pages.
//! This module provides utilities for:
//! - Calculating column widths of text
//! - Converting UTF-8 text to Windows-1252 (ESC/POS code page 16)

use encoding_rs::WINDOWS_1252;

/// ESC t n - select character code table (16 = WPC1252)
pub(crate) const SELECT_WPC1252: [u8; 3] = [0x1B, 0x74, 16];

/// Printed in place of the rupee sign, which no single-byte code page has
const RUPEE_FALLBACK: &[u8] = b"Rs.";

/// Get the printed width of a string in character cells
///
/// Every character occupies one cell on the supported code page, except
/// the rupee sign which prints as `Rs.`.
pub fn text_width(s: &str) -> usize {
    s.chars()
        .map(|c| if c == '₹' { RUPEE_FALLBACK.len() } else { 1 })
        .sum()
}

/// Encode text for the printer
///
/// Printable ASCII passes through untouched. Control characters become a
/// space so text can never carry printer commands. Other characters are
/// mapped to Windows-1252; the rupee sign becomes `Rs.` and anything
/// without a mapping becomes `?`.
pub fn encode_for_printer(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for c in s.chars() {
        if c.is_control() {
            out.push(b' ');
            continue;
        }
        if c.is_ascii() {
            out.push(c as u8);
            continue;
        }
        if c == '₹' {
            out.extend_from_slice(RUPEE_FALLBACK);
            continue;
        }
        let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
        if had_errors {
            out.push(b'?');
        } else {
            out.extend_from_slice(&bytes);
        }
    }
    out
}
