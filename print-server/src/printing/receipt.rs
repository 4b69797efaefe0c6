//! Sales receipt renderer
//!
//! Renders a [`Bill`] into ESC/POS bytes for the 80mm receipt printer.
//! Every amount goes through the money formatter before any byte is
//! produced, so a bad amount fails the whole receipt.

use chrono_tz::Tz;
use markit_printer::EscPosBuilder;
use markit_printer::layout::{align_center, align_start, blank};
use rust_decimal::Decimal;

use super::layout::ReceiptLayout;
use super::money::{
    add_amounts, amount_or_zero, format_decimal, format_money, require_amount, resolve_discount,
};
use super::types::{Bill, LineItem, Scalar, SplitPayment, cell, present};
use super::upi::upi_payload;
use super::RenderError;
use crate::utils::time::{format_invoice_time, now_local, parse_timestamp};

const ROUND_OFF_CAPTION: &str = "DISC/ROUND OFF(+/-)";

/// Store policy printed at the bottom of every receipt
#[derive(Debug, Clone)]
pub struct ReceiptFooter {
    pub customer_care: String,
    pub return_days: u32,
}

impl Default for ReceiptFooter {
    fn default() -> Self {
        Self {
            customer_care: "9876543210".to_string(),
            return_days: 7,
        }
    }
}

/// Sales receipt renderer
pub struct ReceiptRenderer {
    layout: ReceiptLayout,
    footer: ReceiptFooter,
    timezone: Tz,
}

impl ReceiptRenderer {
    pub fn new(layout: ReceiptLayout, footer: ReceiptFooter, timezone: Tz) -> Self {
        Self {
            layout,
            footer,
            timezone,
        }
    }

    /// Render a bill to ESC/POS bytes
    pub fn render(&self, bill: &Bill) -> Result<Vec<u8>, RenderError> {
        let mut b = EscPosBuilder::new(self.layout.line_width);

        self.render_header(&mut b, bill);
        self.render_meta(&mut b, bill)?;
        self.render_column_headers(&mut b);
        for (index, item) in bill.entries().iter().enumerate() {
            self.render_item(&mut b, index + 1, item)?;
        }
        self.render_totals(&mut b, bill)?;

        let qr = upi_payload(bill);
        self.render_closing(&mut b, qr.as_deref());

        Ok(b.build())
    }

    /// Bill-level discount resolved to currency units
    pub fn bill_discount(bill: &Bill) -> Result<Decimal, RenderError> {
        let discount =
            amount_or_zero(bill.discount.as_ref()).map_err(RenderError::amount("discount"))?;
        let subtotal =
            require_amount(bill.subtotal.as_ref()).map_err(RenderError::amount("subtotal"))?;
        resolve_discount(discount, subtotal).map_err(RenderError::amount("discount"))
    }

    fn render_header(&self, b: &mut EscPosBuilder, bill: &Bill) {
        b.center();
        b.bold();
        b.double_size();
        b.line(bill.company_name.as_deref().unwrap_or_default());
        b.bold_off();
        b.reset_size();

        let address = bill
            .company_address
            .as_ref()
            .map(|a| a.formatted())
            .unwrap_or_default();
        if !address.is_empty() {
            b.line(&address);
        }
        if let Some(gstin) = present(bill.gstin.as_ref()) {
            b.line(&format!("GSTIN:{} ", gstin));
        }

        b.feed(1);
        b.separator();
        b.left();
    }

    fn render_meta(&self, b: &mut EscPosBuilder, bill: &Bill) -> Result<(), RenderError> {
        let gap = self.layout.row_gap_dots;

        b.line(&format!("Invoice: #{}", cell(bill.invoice_number.as_ref())));
        b.feed_dots(gap);

        let issued = match present(bill.date.as_ref()) {
            Some(date) => parse_timestamp(date, self.timezone)?,
            None => now_local(self.timezone),
        };
        b.line(&format!("Date  : {}", format_invoice_time(&issued)));
        b.feed_dots(gap);

        b.line(&format!(
            "Payment Method: {}",
            bill.payment_method.as_deref().unwrap_or_default()
        ));
        if let Some(split) = &bill.split_payment {
            self.render_split(b, split)?;
        }

        if let Some(name) = bill.customer_name.as_deref().filter(|n| !n.is_empty()) {
            b.line(&format!("Customer: {}", name));
        }
        if let Some(phone) = present(bill.customer_phone.as_ref()) {
            b.line(&format!("Phone: {}", phone));
        }

        b.separator();
        Ok(())
    }

    /// One indented line per paid leg
    fn render_split(&self, b: &mut EscPosBuilder, split: &SplitPayment) -> Result<(), RenderError> {
        let legs = [
            ("Cash", "splitPayment.cash", &split.cash),
            ("Card", "splitPayment.card", &split.card),
            ("UPI", "splitPayment.upi", &split.upi),
        ];
        for (label, field, amount) in legs {
            let Some(amount) = present(amount.as_ref()) else {
                continue;
            };
            let amount = format_money(amount).map_err(RenderError::amount(field))?;
            b.line(&format!("  {}: {}", label, amount));
        }
        Ok(())
    }

    fn render_column_headers(&self, b: &mut EscPosBuilder) {
        let c = &self.layout.columns;

        b.line(&format!(
            "{}{}{}{}",
            align_start("SL", c.sl),
            align_start("DESCRIPTION", c.description),
            align_start("HSN", c.hsn),
            align_start("TAX", c.tax)
        ));
        b.feed_dots(self.layout.row_gap_dots);
        b.line(&format!(
            "{}{}{}{}{}{}",
            blank(self.layout.row_indent),
            align_start("QTY", c.qty),
            align_start("MRP", c.mrp),
            align_start("VALUE", c.value),
            align_start("DISC", c.disc),
            align_start("T.VALUE", c.tvalue)
        ));
        b.separator();
    }

    fn render_item(
        &self,
        b: &mut EscPosBuilder,
        sl: usize,
        item: &LineItem,
    ) -> Result<(), RenderError> {
        let c = &self.layout.columns;

        b.line(&format!(
            "{}{}{}{}",
            align_start(&sl.to_string(), c.sl),
            align_start(&cell(item.description.as_ref()), c.description),
            align_start(&cell(item.hsn.as_ref()), c.hsn),
            align_start(&percent(item.tax.as_ref()), c.tax)
        ));
        b.feed_dots(self.layout.row_gap_dots);

        let mrp = require_amount(item.mrp.as_ref()).map_err(RenderError::amount("mrp"))?;
        let value = require_amount(item.value.as_ref()).map_err(RenderError::amount("value"))?;
        let tvalue = require_amount(item.tvalue.as_ref()).map_err(RenderError::amount("tvalue"))?;
        b.line(&format!(
            "{}{}{}{}{}{}",
            blank(self.layout.row_indent),
            align_start(&cell(item.qty.as_ref()), c.qty),
            align_start(&format_decimal(mrp), c.mrp),
            align_start(&format_decimal(value), c.value),
            align_start(&percent(item.discount.as_ref()), c.disc),
            align_start(&format_decimal(tvalue), c.tvalue)
        ));
        Ok(())
    }

    fn render_totals(&self, b: &mut EscPosBuilder, bill: &Bill) -> Result<(), RenderError> {
        let c = &self.layout.columns;

        let tvalue = require_amount(bill.tvalue.as_ref()).map_err(RenderError::amount("tvalue"))?;
        let tdiscount =
            amount_or_zero(bill.tdiscount.as_ref()).map_err(RenderError::amount("tdiscount"))?;
        let subtotal =
            require_amount(bill.subtotal.as_ref()).map_err(RenderError::amount("subtotal"))?;
        let grand_total = require_amount(bill.grand_total.as_ref())
            .map_err(RenderError::amount("grandTotal"))?;
        let discount = Self::bill_discount(bill)?;
        let savings =
            add_amounts(discount, tdiscount).map_err(RenderError::amount("tdiscount"))?;

        b.separator();
        b.bold();
        b.line(&format!(
            "{}{}{}{}{}{}",
            blank(self.layout.row_indent),
            align_start(&cell(bill.tqty.as_ref()), c.qty),
            blank(c.mrp),
            align_start(&format_decimal(tvalue), c.value),
            align_start(&format_decimal(tdiscount), c.disc),
            align_start(&format_decimal(subtotal), c.tvalue)
        ));
        b.bold_off();
        b.separator();

        b.line(&format!(
            "{}{}",
            align_center(ROUND_OFF_CAPTION, self.layout.round_off_width),
            format_decimal(discount)
        ));
        b.feed(1);

        b.bold();
        b.center();
        b.double_size();
        b.line(&format!(" GRAND TOTAL:{}", format_decimal(grand_total)));
        b.bold_off();
        b.reset_size();
        b.feed(1);

        b.separator();
        b.inverse();
        b.double_size();
        b.bold();
        b.line(&format!(" YOUR SAVING:{}", format_decimal(savings)));
        b.inverse_off();
        b.reset_size();
        b.bold_off();
        b.separator();
        Ok(())
    }

    /// Closing block; an optional UPI link is printed as a QR code first
    fn render_closing(&self, b: &mut EscPosBuilder, qr: Option<&str>) {
        b.center();
        b.feed(1);
        if let Some(link) = qr {
            b.line("Scan to pay via UPI");
            b.qr_code(link, self.layout.qr_module_size);
            b.feed(1);
        }

        b.line("Thank you for shopping!");
        b.feed(1);
        b.line(&format!(
            "Returns accepted within {} days",
            self.footer.return_days
        ));
        b.line("with original receipt");
        b.feed(2);
        b.line(&format!("Customer care: {}", self.footer.customer_care));
        b.feed(8);
        b.cut();
    }
}

/// Rate column such as `18%`; a missing rate prints as `0%`
fn percent(rate: Option<&Scalar>) -> String {
    match rate {
        Some(rate) => format!("{}%", rate),
        None => "0%".to_string(),
    }
}
