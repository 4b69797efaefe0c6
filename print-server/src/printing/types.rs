//! Print job payloads
//!
//! Front-end tills send numbers either as JSON numbers or as strings, so
//! every value that ends up on paper is a [`Scalar`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON number, string or boolean as sent by the till
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// Whether the value counts as filled in (empty strings and zero do not)
    pub fn is_present(&self) -> bool {
        match self {
            Scalar::Number(n) => *n != 0.0 && !n.is_nan(),
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Bool(b) => *b,
        }
    }

    /// Numeric value, if the scalar holds one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Scalar::Bool(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

/// Stringify an optional value for a table cell
pub fn cell(value: Option<&Scalar>) -> String {
    let text = value.map(Scalar::to_string);
    markit_printer::layout::cell_text(text.as_deref()).into_owned()
}

/// Present (truthy) value of an optional field
pub fn present(value: Option<&Scalar>) -> Option<&Scalar> {
    value.filter(|v| v.is_present())
}

// ========== Bill ==========

/// Store address printed under the company name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyAddress {
    pub name: Option<String>,
    pub street: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<Scalar>,
}

impl CompanyAddress {
    /// `name, street, locality, city, state, - pincode` without empty parts
    pub fn formatted(&self) -> String {
        let pincode = self
            .pincode
            .as_ref()
            .filter(|p| p.is_present())
            .map(|p| format!("- {}", p));

        [
            self.name.clone(),
            self.street.clone(),
            self.locality.clone(),
            self.city.clone(),
            self.state.clone(),
            pincode,
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// One invoice line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: Option<Scalar>,
    pub hsn: Option<Scalar>,
    /// Tax rate in percent
    pub tax: Option<Scalar>,
    pub qty: Option<Scalar>,
    pub mrp: Option<Scalar>,
    pub value: Option<Scalar>,
    /// Line discount in percent
    pub discount: Option<Scalar>,
    /// Line total after discount
    pub tvalue: Option<Scalar>,
}

/// Amounts per payment channel when a bill is paid in parts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitPayment {
    pub cash: Option<Scalar>,
    pub card: Option<Scalar>,
    pub upi: Option<Scalar>,
}

/// Sales invoice sent to `/api/print-bill`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub invoice_number: Option<Scalar>,
    pub date: Option<Scalar>,
    pub payment_method: Option<String>,
    pub company_name: Option<String>,
    pub company_address: Option<CompanyAddress>,
    pub gstin: Option<Scalar>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<Scalar>,
    pub entries: Option<Vec<LineItem>>,

    // Totals precomputed by the till
    pub tqty: Option<Scalar>,
    pub tvalue: Option<Scalar>,
    pub tdiscount: Option<Scalar>,
    pub subtotal: Option<Scalar>,
    /// Negative: absolute amount; otherwise percent of subtotal
    pub discount: Option<Scalar>,
    pub grand_total: Option<Scalar>,

    // UPI collection
    pub upi_id: Option<String>,
    pub acc_holder_name: Option<String>,
    pub split_payment: Option<SplitPayment>,
}

impl Bill {
    pub fn entries(&self) -> &[LineItem] {
        self.entries.as_deref().unwrap_or_default()
    }

    /// Invoice number and at least one entry are required before printing
    pub fn is_printable(&self) -> bool {
        present(self.invoice_number.as_ref()).is_some() && !self.entries().is_empty()
    }
}

// ========== Report ==========

/// Sales/expense summary sent to `/api/print-report`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub company_name: Option<String>,
    pub from_date: Scalar,
    pub to_date: Scalar,

    pub total_revenue: Scalar,
    pub cash_revenue: Scalar,
    pub upi_revenue: Scalar,
    pub card_revenue: Option<Scalar>,

    pub total_expenses: Scalar,
    pub cash_expenses: Option<Scalar>,
    pub upi_expenses: Option<Scalar>,

    pub cash_in_drawer: Scalar,

    #[serde(default)]
    pub expenses: Vec<ExpenseEntry>,
}

/// One expense row of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub date: Scalar,
    pub category: Option<Scalar>,
    pub note: Option<Scalar>,
    pub amount: Scalar,
}

// ========== Label ==========

/// Shelf label sent (as an array) to `/api/print-label`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelItem {
    pub shopname: Option<Scalar>,
    pub barcode: Option<Scalar>,
    pub code: Option<Scalar>,
    pub product_name: Option<Scalar>,
    /// Variant name
    pub name: Option<Scalar>,
    pub size: Option<Scalar>,
    pub brand: Option<Scalar>,
    /// Regular selling price
    pub sprice: Option<Scalar>,
    /// Discounted price
    pub dprice: Option<Scalar>,
}

impl LabelItem {
    /// Required fields that are missing or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("barcode", &self.barcode),
            ("productName", &self.product_name),
            ("name", &self.name),
            ("sprice", &self.sprice),
            ("shopname", &self.shopname),
        ]
        .into_iter()
        .filter(|(_, v)| present(v.as_ref()).is_none())
        .map(|(field, _)| field)
        .collect()
    }
}
