//! Fixed-width column cells
//!
//! Receipts are laid out as rows of left-justified or centered cells. Cells
//! grow past their width instead of truncating, so a long value pushes the
//! rest of the row to the right rather than losing characters.

use std::borrow::Cow;

use crate::encoding::text_width;

/// Stringify an optional cell value; a missing value prints as one space
pub fn cell_text(value: Option<&str>) -> Cow<'_, str> {
    match value {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Borrowed(" "),
    }
}

/// Left-justify `text` in a cell of `width` characters
///
/// Returns the text unchanged when it already fills the cell.
pub fn align_start(text: &str, width: usize) -> String {
    let len = text_width(text);
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", text, blank(width - len))
}

/// Center `text` in a cell of `width` characters
///
/// An odd leftover space goes to the right-hand side.
pub fn align_center(text: &str, width: usize) -> String {
    let len = text_width(text);
    if len >= width {
        return text.to_string();
    }
    let extra = width - len;
    let left = extra / 2;
    format!("{}{}{}", blank(left), text, blank(extra - left))
}

/// A cell of spaces
pub fn blank(width: usize) -> String {
    " ".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &["", "a", "SL", "DESCRIPTION", "12.50", "Chai Patti 250g", "café"];

    #[test]
    fn test_wide_text_is_unchanged() {
        for s in SAMPLES {
            for w in 0..=text_width(s) {
                assert_eq!(align_start(s, w), *s);
                assert_eq!(align_center(s, w), *s);
            }
        }
    }

    #[test]
    fn test_narrow_text_fills_width() {
        for s in SAMPLES {
            for w in text_width(s) + 1..text_width(s) + 12 {
                assert_eq!(text_width(&align_start(s, w)), w);
                assert_eq!(text_width(&align_center(s, w)), w);
            }
        }
    }

    #[test]
    fn test_align_start_pads_right() {
        assert_eq!(align_start("QTY", 6), "QTY   ");
        assert_eq!(align_start("12", 4), "12  ");
    }

    #[test]
    fn test_center_biases_right() {
        assert_eq!(align_center("ab", 5), " ab  ");
        assert_eq!(align_center("abc", 5), " abc ");
        assert_eq!(align_center("", 3), "   ");
    }

    #[test]
    fn test_rupee_pads_by_printed_width() {
        assert_eq!(align_start("₹10", 6), "₹10");
        assert_eq!(align_start("₹10", 8), "₹10   ");
        assert_eq!(crate::encode_for_printer(&align_start("₹10", 8)).len(), 8);
    }

    #[test]
    fn test_missing_cell_is_single_space() {
        assert_eq!(cell_text(None), " ");
        assert_eq!(align_start(&cell_text(None), 4), "    ");
        assert_eq!(cell_text(Some("HSN")), "HSN");
    }
}
