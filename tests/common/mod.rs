#![allow(dead_code)]

use rpa_receipt::domain::record::{Contractor, Payment, Provider, Service, ServiceRecord};
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};

pub fn sample_record() -> ServiceRecord {
    ServiceRecord {
        provider: Provider {
            name: "Maria Souza".to_string(),
            document: "987.654.321-00".to_string(),
            address: "Rua Augusta, 500".to_string(),
            ..Default::default()
        },
        contractor: Contractor {
            name: "Beta Tecnologia Ltda".to_string(),
            document: "98.765.432/0001-10".to_string(),
            address: "Rua XV de Novembro, 200".to_string(),
            email: None,
        },
        service: Service {
            description: "Desenvolvimento de software".to_string(),
            date: "2025-02-14".to_string(),
            location: "Curitiba".to_string(),
            gross_value: dec!(1000).into(),
            iss_percent: dec!(5),
        },
        payment: Payment {
            amount: dec!(840).into(),
            date: "2025-02-20".to_string(),
            method: "Transferência".to_string(),
            note: None,
        },
        observations: None,
        signatures: None,
    }
}

/// Writes `record` as JSON into `dir` and returns the file path.
pub fn write_record(dir: &Path, record: &ServiceRecord) -> PathBuf {
    let path = dir.join("record.json");
    std::fs::write(&path, serde_json::to_vec_pretty(record).unwrap()).unwrap();
    path
}
