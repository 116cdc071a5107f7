//! Shared utilities.

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
