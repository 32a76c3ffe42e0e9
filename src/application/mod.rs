//! Application layer: the receipt generation flow and draft handling that a
//! user interface drives.
//!
//! `ReceiptService` is the primary entry point; `DraftService` and
//! `Autosaver` cover the locally saved form.

pub mod drafts;
pub mod receipt;

pub use drafts::{Autosaver, DraftService};
pub use receipt::{Receipt, ReceiptService, receipt_file_name};
