//! Shelf label renderer (TSPL)
//!
//! Labels are rendered one block per item for 50x38mm stock. Items that
//! fail validation are skipped, never failing the batch.

use markit_printer::TsplBuilder;
use tracing::warn;

use super::money::{MoneyError, format_money};
use super::types::{LabelItem, Scalar, cell, present};

/// Rendered label batch
#[derive(Debug, Default)]
pub struct LabelBatch {
    /// One TSPL block per printable item, in input order
    pub blocks: Vec<Vec<u8>>,
    pub skipped: usize,
}

/// TSPL label renderer
#[derive(Debug, Default)]
pub struct LabelRenderer;

impl LabelRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render every valid item, skipping the rest with a warning
    pub fn render_batch(&self, items: &[LabelItem]) -> LabelBatch {
        let mut batch = LabelBatch::default();

        for (index, item) in items.iter().enumerate() {
            let missing = item.missing_fields();
            if !missing.is_empty() {
                warn!(index, missing = ?missing, "Skipping label with missing required fields");
                batch.skipped += 1;
                continue;
            }

            match self.render(item) {
                Ok(block) => batch.blocks.push(block),
                Err(e) => {
                    warn!(index, error = %e, "Skipping label with invalid price");
                    batch.skipped += 1;
                }
            }
        }

        batch
    }

    /// Render a single validated item
    pub fn render(&self, item: &LabelItem) -> Result<Vec<u8>, MoneyError> {
        let sprice = format_money(item.sprice.as_ref().ok_or(MoneyError::Missing)?)?;
        let dprice = present(item.dprice.as_ref()).map(format_money).transpose()?;

        let mut variant = cell_or_empty(item.name.as_ref());
        if let Some(size) = present(item.size.as_ref()) {
            variant.push_str(&format!(" - {}", size));
        }
        let barcode = cell(item.barcode.as_ref());

        let mut t = TsplBuilder::new();
        t.size_mm(50, 38);
        t.gap_mm(3.0, 0.7);
        t.direction(0);
        t.cls();

        t.text(10, 18, "3", &cell(item.shopname.as_ref()));
        t.bar(0, 48, 400, 2);

        t.text(10, 58, "2", &cell(item.product_name.as_ref()));
        t.text(10, 83, "2", &variant);
        t.text(10, 110, "2", &format!("MRP Rs.{}", sprice));

        if let Some(dprice) = dprice {
            // Strike through the regular price
            t.bar(10, 116, 220, 4);
            t.text(10, 136, "2", &format!("Discount Rs.{}", dprice));
        }

        t.text(
            10,
            168,
            "1",
            &format!(
                "{}-{}",
                cell_or_empty(item.code.as_ref()),
                cell_or_empty(item.brand.as_ref())
            ),
        );
        t.barcode_128(10, 185, 100, &barcode);
        t.text(10, 292, "1", &barcode);
        t.print(1, 1);

        Ok(t.build())
    }
}

/// Optional label text; missing prints nothing
fn cell_or_empty(value: Option<&Scalar>) -> String {
    value.map(Scalar::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(json: &str) -> LabelItem {
        serde_json::from_str(json).unwrap()
    }

    fn tee() -> LabelItem {
        item(
            r#"{
                "shopname": "Markit", "barcode": "8901234567890", "code": "TS01",
                "productName": "Cotton Tee", "name": "Blue", "size": "M",
                "brand": "Acme", "sprice": 499
            }"#,
        )
    }

    #[test]
    fn test_label_block() {
        let block = LabelRenderer::new().render(&tee()).unwrap();
        let expected = [
            "SIZE 50 mm,38 mm",
            "GAP 3 mm,0.7 mm",
            "DIRECTION 0",
            "CLS",
            "TEXT 10,18,\"3\",0,1,1,\"Markit\"",
            "BAR 0,48,400,2",
            "TEXT 10,58,\"2\",0,1,1,\"Cotton Tee\"",
            "TEXT 10,83,\"2\",0,1,1,\"Blue - M\"",
            "TEXT 10,110,\"2\",0,1,1,\"MRP Rs.499.00\"",
            "TEXT 10,168,\"1\",0,1,1,\"TS01-Acme\"",
            "BARCODE 10,185,\"128\",100,0,0,3,3,\"8901234567890\"",
            "TEXT 10,292,\"1\",0,1,1,\"8901234567890\"",
            "PRINT 1,1",
        ]
        .map(|line| format!("{line}\r\n"))
        .concat();
        assert_eq!(String::from_utf8(block).unwrap(), expected);
    }

    #[test]
    fn test_discount_price_strikes_through() {
        let mut tee = tee();
        tee.dprice = Some(Scalar::from("399.5"));
        let text = String::from_utf8(LabelRenderer::new().render(&tee).unwrap()).unwrap();
        assert!(text.contains(
            "TEXT 10,110,\"2\",0,1,1,\"MRP Rs.499.00\"\r\nBAR 10,116,220,4\r\nTEXT 10,136,\"2\",0,1,1,\"Discount Rs.399.50\"\r\n"
        ));
    }

    #[test]
    fn test_no_size_suffix_when_missing() {
        let mut tee = tee();
        tee.size = Some(Scalar::from(""));
        let text = String::from_utf8(LabelRenderer::new().render(&tee).unwrap()).unwrap();
        assert!(text.contains("\"Blue\"\r\n"));
    }

    #[test]
    fn test_batch_skips_invalid_items() {
        let mut no_barcode = tee();
        no_barcode.barcode = None;
        let items = vec![tee(), no_barcode, tee()];

        let batch = LabelRenderer::new().render_batch(&items);
        assert_eq!(batch.blocks.len(), 2);
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn test_batch_skips_non_numeric_price() {
        let mut bad_price = tee();
        bad_price.sprice = Some(Scalar::from("free"));
        let batch = LabelRenderer::new().render_batch(&[bad_price, tee()]);
        assert_eq!(batch.blocks.len(), 1);
        assert_eq!(batch.skipped, 1);
    }

    #[test]
    fn test_field_line_breaks_stay_inside_text() {
        let mut tee = tee();
        tee.product_name = Some(Scalar::from("Tee\r\nPRINT 5,1"));
        let text = String::from_utf8(LabelRenderer::new().render(&tee).unwrap()).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("PRINT")).count(), 1);
        assert_eq!(text.matches("\r\n").count(), 13);
    }

    #[test]
    fn test_quotes_are_escaped() {
        let mut tee = tee();
        tee.product_name = Some(Scalar::from("12\" Frame"));
        let text = String::from_utf8(LabelRenderer::new().render(&tee).unwrap()).unwrap();
        assert!(text.contains("\"12\\[\"] Frame\""));
    }
}
