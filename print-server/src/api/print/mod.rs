//! Print job API
//!
//! | Path | Body | Success |
//! |------|------|---------|
//! | POST /api/print-bill | Bill | `{message}` |
//! | POST /api/print-report | Report | `{message}` |
//! | POST /api/print-label | [LabelItem] | `{message, printed, skipped}` |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/print-bill", post(handler::print_bill))
        .route("/api/print-report", post(handler::print_report))
        .route("/api/print-label", post(handler::print_label))
}
