//! Utilities
//!
//! - [`logger`] - logging setup
//! - [`validation`] - request validation

pub mod logger;
pub mod validation;
