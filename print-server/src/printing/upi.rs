//! UPI payment link for the receipt QR code

use super::types::{Bill, Scalar};

/// Payment method that collects the full grand total over UPI
const METHOD_UPI: &str = "upi";
/// Payment method with per-channel legs; only the UPI leg goes in the QR
const METHOD_SPLIT: &str = "split";

/// Build the `upi://pay` link a customer scans to pay this bill
///
/// `None` when the bill is not (partly) paid over UPI or no payee is set.
pub fn upi_payload(bill: &Bill) -> Option<String> {
    let payee = bill.upi_id.as_deref().filter(|id| !id.is_empty())?;
    let amount = upi_amount(bill)?;
    let invoice = bill.invoice_number.as_ref()?;

    let holder = bill.acc_holder_name.as_deref().unwrap_or_default();
    let note = format!("Payment for Invoice ID {}", invoice);

    Some(format!(
        "upi://pay?pa={}&pn={}&tn={}&am={}&cu=INR",
        payee,
        urlencoding::encode(holder),
        urlencoding::encode(&note),
        amount
    ))
}

/// Amount requested over UPI, printed as supplied
fn upi_amount(bill: &Bill) -> Option<&Scalar> {
    let method = bill.payment_method.as_deref()?.trim().to_lowercase();
    match method.as_str() {
        METHOD_UPI => bill.grand_total.as_ref(),
        METHOD_SPLIT => bill
            .split_payment
            .as_ref()?
            .upi
            .as_ref()
            .filter(|leg| leg.as_f64().is_some_and(|n| n > 0.0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::types::SplitPayment;

    fn upi_bill() -> Bill {
        Bill {
            invoice_number: Some(Scalar::from("INV-42")),
            payment_method: Some("UPI".into()),
            grand_total: Some(Scalar::Number(190.0)),
            upi_id: Some("x@bank".into()),
            acc_holder_name: Some("Shop".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_upi_payment() {
        assert_eq!(
            upi_payload(&upi_bill()).unwrap(),
            "upi://pay?pa=x@bank&pn=Shop&tn=Payment%20for%20Invoice%20ID%20INV-42&am=190&cu=INR"
        );
    }

    #[test]
    fn test_split_payment_uses_upi_leg() {
        let bill = Bill {
            payment_method: Some("split".into()),
            split_payment: Some(SplitPayment {
                cash: Some(Scalar::Number(100.0)),
                card: None,
                upi: Some(Scalar::from("90")),
            }),
            ..upi_bill()
        };
        assert!(upi_payload(&bill).unwrap().contains("&am=90&"));
    }

    #[test]
    fn test_split_without_upi_leg() {
        let bill = Bill {
            payment_method: Some("split".into()),
            split_payment: Some(SplitPayment {
                cash: Some(Scalar::Number(190.0)),
                card: None,
                upi: Some(Scalar::Number(0.0)),
            }),
            ..upi_bill()
        };
        assert_eq!(upi_payload(&bill), None);
    }

    #[test]
    fn test_cash_and_missing_payee() {
        let cash = Bill {
            payment_method: Some("cash".into()),
            ..upi_bill()
        };
        assert_eq!(upi_payload(&cash), None);

        let no_payee = Bill {
            upi_id: None,
            ..upi_bill()
        };
        assert_eq!(upi_payload(&no_payee), None);
    }

    #[test]
    fn test_holder_name_is_encoded() {
        let bill = Bill {
            acc_holder_name: Some("Markit Stores".into()),
            ..upi_bill()
        };
        assert!(upi_payload(&bill).unwrap().contains("&pn=Markit%20Stores&"));
    }
}
