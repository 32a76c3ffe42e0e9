use crate::domain::record::ServiceRecord;
use crate::error::{RpaError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a service record from JSON, as the entry form exports it.
pub struct RecordReader<R: Read> {
    source: R,
}

impl<R: Read> RecordReader<R> {
    /// Creates a new `RecordReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn record(self) -> Result<ServiceRecord> {
        serde_json::from_reader(self.source).map_err(RpaError::from)
    }
}

impl RecordReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_record() {
        let data = r#"{
            "provider": {"name": "Maria", "document": "1", "address": "Rua 1", "pixKey": "maria@pix"},
            "contractor": {"name": "ACME", "document": "2", "address": "Rua 2"},
            "service": {"description": "Pintura", "date": "2025-03-01", "location": "Recife", "grossValue": "2500.50", "issPercent": 2},
            "payment": {"amount": 2000, "date": "2025-03-02", "method": "Transferência"},
            "observations": "ok"
        }"#;
        let record = RecordReader::new(data.as_bytes()).record().unwrap();

        assert_eq!(record.provider.pix_key.as_deref(), Some("maria@pix"));
        assert_eq!(record.service.gross_value, Money::new(dec!(2500.50)));
        assert_eq!(record.service.iss_percent, dec!(2));
        assert_eq!(record.payment.amount, Money::new(dec!(2000)));
    }

    #[test]
    fn test_reader_malformed_record() {
        let data = r#"{"provider": {"name": "Maria"}}"#;
        let result = RecordReader::new(data.as_bytes()).record();
        assert!(matches!(result, Err(RpaError::SerializationError(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordReader::open("definitely/not/here.json");
        assert!(matches!(result, Err(RpaError::IoError(_))));
    }
}
