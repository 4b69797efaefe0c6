//! HTTP API
//!
//! | Path | Method | Module |
//! |------|--------|--------|
//! | /api/print-bill | POST | [`print`] |
//! | /api/print-report | POST | [`print`] |
//! | /api/print-label | POST | [`print`] |
//! | /health | GET | [`health`] |

pub mod health;
pub mod print;
