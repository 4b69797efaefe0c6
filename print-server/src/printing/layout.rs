//! Column geometry per document type
//!
//! Layouts are plain immutable values handed to each renderer, so receipts
//! and reports can use different column sets side by side.

/// Receipt column widths in characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptColumns {
    // Row 1
    pub sl: usize,
    pub description: usize,
    pub hsn: usize,
    pub tax: usize,
    // Row 2
    pub qty: usize,
    pub mrp: usize,
    pub value: usize,
    pub disc: usize,
    pub tvalue: usize,
}

impl Default for ReceiptColumns {
    fn default() -> Self {
        Self {
            sl: 4,
            description: 24,
            hsn: 10,
            tax: 10,
            qty: 4,
            mrp: 10,
            value: 10,
            disc: 10,
            tvalue: 10,
        }
    }
}

/// Receipt geometry (80mm paper)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLayout {
    /// Characters per line
    pub line_width: usize,
    pub columns: ReceiptColumns,
    /// Indent of the second row of each item
    pub row_indent: usize,
    /// Cell the `DISC/ROUND OFF` caption is centered in
    pub round_off_width: usize,
    /// Paper feed after single-spaced rows, in dots
    pub row_gap_dots: u8,
    /// QR module size in dots
    pub qr_module_size: u8,
}

impl Default for ReceiptLayout {
    fn default() -> Self {
        Self {
            line_width: 48,
            columns: ReceiptColumns::default(),
            row_indent: 4,
            round_off_width: 38,
            row_gap_dots: 10,
            qr_module_size: 6,
        }
    }
}

/// Expense table column widths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseColumns {
    pub date: usize,
    pub category: usize,
    pub note: usize,
    pub amount: usize,
}

impl Default for ExpenseColumns {
    fn default() -> Self {
        Self {
            date: 8,
            category: 14,
            note: 16,
            amount: 10,
        }
    }
}

/// Report geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub line_width: usize,
    pub expenses: ExpenseColumns,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            line_width: 48,
            expenses: ExpenseColumns::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rows_fit_paper() {
        let layout = ReceiptLayout::default();
        let c = &layout.columns;
        assert_eq!(c.sl + c.description + c.hsn + c.tax, layout.line_width);
        assert_eq!(
            layout.row_indent + c.qty + c.mrp + c.value + c.disc + c.tvalue,
            layout.line_width
        );

        let report = ReportLayout::default();
        let e = &report.expenses;
        assert_eq!(e.date + e.category + e.note + e.amount, report.line_width);
    }
}
