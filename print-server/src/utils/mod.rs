//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] - application error type
//! - [`MessageResponse`] - success body
//! - logging and time helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{AppError, ErrorResponse, MessageResponse};
pub use result::AppResult;
