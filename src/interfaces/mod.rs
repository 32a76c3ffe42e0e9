//! Adapters between the outside world and the receipt core: reading records
//! and writing finished documents.

pub mod json;
pub mod pdf;
