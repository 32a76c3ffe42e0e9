use crate::domain::ports::{DocumentRenderer, DocumentRendererBox};
use crate::domain::record::ServiceRecord;
use crate::domain::tax::{TaxBreakdown, compute_taxes};
use crate::error::Result;
use crate::interfaces::pdf::PdfRenderer;
use crate::layout::layout_receipt;
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// A finished receipt, ready to be handed to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub breakdown: TaxBreakdown,
    pub page_count: usize,
}

impl Receipt {
    /// Writes the receipt into `dir` under its file name and returns the path.
    ///
    /// The file appears complete or not at all.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.bytes)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        info!(path = %path.display(), bytes = self.bytes.len(), "receipt written");
        Ok(path)
    }
}

/// `RPA_<provider name>_<YYYY-MM-DD>.pdf`, with each run of whitespace (and
/// any path separator) in the name replaced by `_`.
pub fn receipt_file_name(provider_name: &str, date: NaiveDate) -> String {
    let mut name = String::with_capacity(provider_name.len());
    let mut in_gap = false;
    for ch in provider_name.chars() {
        if ch.is_whitespace() {
            if !in_gap {
                name.push('_');
            }
            in_gap = true;
        } else {
            name.push(if matches!(ch, '/' | '\\') { '_' } else { ch });
            in_gap = false;
        }
    }
    format!("RPA_{}_{}.pdf", name, date.format("%Y-%m-%d"))
}

/// Computes the withholdings for a record, lays the receipt out and renders it.
pub struct ReceiptService {
    renderer: DocumentRendererBox,
}

impl Default for ReceiptService {
    fn default() -> Self {
        Self::new(Box::new(PdfRenderer::new()))
    }
}

impl ReceiptService {
    pub fn new(renderer: DocumentRendererBox) -> Self {
        Self { renderer }
    }

    /// Generates the receipt issued on `issued_on`.
    ///
    /// The record is expected to be validated already. A rendering failure is
    /// returned as is; calling again with the same record is a valid retry.
    pub fn generate(&self, record: &ServiceRecord, issued_on: NaiveDate) -> Result<Receipt> {
        let breakdown = compute_taxes(record.service.gross_value, record.service.iss_percent);
        let document = layout_receipt(record, &breakdown, issued_on);
        let bytes = self.renderer.render(&document)?;

        let receipt = Receipt {
            file_name: receipt_file_name(&record.provider.name, issued_on),
            bytes,
            breakdown,
            page_count: document.page_count(),
        };
        info!(
            file_name = %receipt.file_name,
            pages = receipt.page_count,
            net = %receipt.breakdown.net_value,
            "receipt generated"
        );
        Ok(receipt)
    }
}
