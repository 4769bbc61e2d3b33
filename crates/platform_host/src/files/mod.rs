//! Backend file records, endpoint layout, display formatting, and the file API contract.

pub mod endpoints;
pub mod format;
pub mod service;
pub mod types;
