//! Print job handlers
//!
//! Each handler validates its payload, then runs one print job. Payloads
//! rejected here never reach the printer.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;

use crate::core::ServerState;
use crate::printing::{Bill, LabelItem, Report};
use crate::utils::{AppError, AppResult, MessageResponse};

/// POST /api/print-bill - print a sales receipt
pub async fn print_bill(
    State(state): State<ServerState>,
    payload: Result<Json<Bill>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(bill) = payload.map_err(|e| {
        tracing::warn!(error = %e.body_text(), "Unreadable bill payload");
        AppError::invalid("Invalid bill data")
    })?;

    if !bill.is_printable() {
        return Err(AppError::invalid("Invalid bill data"));
    }

    state
        .executor
        .print_bill(&bill)
        .await
        .map_err(|e| AppError::from_job("receipt", e))?;

    Ok(Json(MessageResponse::new("Receipt printed successfully")))
}

/// POST /api/print-report - print a sales report
///
/// The report is not validated up front; an unreadable body is a print
/// failure.
pub async fn print_report(
    State(state): State<ServerState>,
    payload: Result<Json<Report>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let Json(report) = payload.map_err(|e| AppError::PrintFailure {
        message: "Failed to print report".to_string(),
        details: e.body_text(),
    })?;

    state
        .executor
        .print_report(&report)
        .await
        .map_err(|e| AppError::from_job("report", e))?;

    Ok(Json(MessageResponse::new("Report printed successfully")))
}

/// POST /api/print-label - print one label per valid item
///
/// Items that cannot be read as labels count as skipped, like items
/// missing required fields.
pub async fn print_label(
    State(state): State<ServerState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<MessageResponse>> {
    let raw_items = match payload {
        Ok(Json(Value::Array(items))) if !items.is_empty() => items,
        _ => return Err(AppError::invalid("No label data provided")),
    };

    let total = raw_items.len();
    let items: Vec<LabelItem> = raw_items
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| match serde_json::from_value(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable label");
                None
            }
        })
        .collect();
    let unreadable = total - items.len();

    let summary = state
        .executor
        .print_labels(&items)
        .await
        .map_err(|e| AppError::from_job("labels", e))?;

    Ok(Json(MessageResponse {
        message: "Labels printed successfully".to_string(),
        printed: Some(summary.printed),
        skipped: Some(summary.skipped + unreadable),
    }))
}
