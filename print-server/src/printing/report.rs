//! Sales report renderer
//!
//! Summary figures are printed exactly as the till computed them; only
//! expense dates are reformatted.

use chrono_tz::Tz;
use markit_printer::EscPosBuilder;
use markit_printer::layout::align_start;

use super::RenderError;
use super::layout::ReportLayout;
use super::types::{ExpenseEntry, Report, Scalar, cell, present};
use crate::utils::time::{format_day_month, parse_timestamp};

const DEFAULT_TITLE: &str = "SALES REPORT";

/// Sales/expense report renderer
pub struct ReportRenderer {
    layout: ReportLayout,
    timezone: Tz,
}

impl ReportRenderer {
    pub fn new(layout: ReportLayout, timezone: Tz) -> Self {
        Self { layout, timezone }
    }

    /// Render a report to ESC/POS bytes
    pub fn render(&self, report: &Report) -> Result<Vec<u8>, RenderError> {
        let mut b = EscPosBuilder::new(self.layout.line_width);

        self.render_header(&mut b, report);
        self.render_summary(&mut b, report);
        self.render_expenses(&mut b, &report.expenses)?;

        b.feed(4);
        b.cut();
        Ok(b.build())
    }

    fn render_header(&self, b: &mut EscPosBuilder, report: &Report) {
        let title = report
            .company_name
            .as_deref()
            .filter(|name| !name.is_empty());

        b.center();
        b.bold();
        b.double_size();
        b.line(title.unwrap_or(DEFAULT_TITLE));
        b.reset_size();
        if title.is_some() {
            b.line(DEFAULT_TITLE);
        }
        b.bold_off();
        b.line(&format!("From: {}  To: {}", report.from_date, report.to_date));
        b.left();
        b.separator();
    }

    fn render_summary(&self, b: &mut EscPosBuilder, report: &Report) {
        b.bold();
        b.line_lr("Total Revenue", &report.total_revenue.to_string());
        b.bold_off();
        b.line_lr("  Cash", &report.cash_revenue.to_string());
        b.line_lr("  UPI", &report.upi_revenue.to_string());
        optional_line(b, "  Card", report.card_revenue.as_ref());
        b.separator();

        b.bold();
        b.line_lr("Total Expenses", &report.total_expenses.to_string());
        b.bold_off();
        optional_line(b, "  Cash", report.cash_expenses.as_ref());
        optional_line(b, "  UPI", report.upi_expenses.as_ref());
        b.separator();

        b.bold();
        b.line_lr("Cash in Drawer", &report.cash_in_drawer.to_string());
        b.bold_off();
        b.separator();
    }

    fn render_expenses(
        &self,
        b: &mut EscPosBuilder,
        expenses: &[ExpenseEntry],
    ) -> Result<(), RenderError> {
        let c = &self.layout.expenses;

        b.center();
        b.bold();
        b.line("EXPENSES");
        b.bold_off();
        b.left();

        if expenses.is_empty() {
            b.line("No expenses recorded");
            return Ok(());
        }

        b.line(&format!(
            "{}{}{}{}",
            align_start("DATE", c.date),
            align_start("CATEGORY", c.category),
            align_start("NOTE", c.note),
            align_start("AMOUNT", c.amount)
        ));
        b.separator();

        for expense in expenses {
            let date = parse_timestamp(&expense.date, self.timezone)?;
            b.line(&format!(
                "{}{}{}{}",
                align_start(&format_day_month(&date), c.date),
                align_start(&cell(expense.category.as_ref()), c.category),
                align_start(&cell(expense.note.as_ref()), c.note),
                align_start(&expense.amount.to_string(), c.amount)
            ));
        }
        b.separator();
        Ok(())
    }
}

/// Summary line printed only when the till sent the figure
fn optional_line(b: &mut EscPosBuilder, label: &str, value: Option<&Scalar>) {
    if let Some(value) = present(value) {
        b.line_lr(label, &value.to_string());
    }
}
