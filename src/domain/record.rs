use super::format::format_date;
use super::money::Money;
use super::tax::DEFAULT_ISS_PERCENT;
use crate::error::{Result, RpaError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Smallest gross or paid value the form accepts.
pub const MINIMUM_AMOUNT: Decimal = dec!(0.01);

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum AccountType {
    #[serde(rename = "Corrente")]
    Checking,
    #[serde(rename = "Poupança")]
    Savings,
}

impl AccountType {
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Checking => "Corrente",
            AccountType::Savings => "Poupança",
        }
    }
}

/// The autonomous worker being paid.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub name: String,
    /// CPF.
    pub document: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    /// Agência.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_account_type"
    )]
    pub account_type: Option<AccountType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
}

/// The company or person paying for the service.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub name: String,
    /// CNPJ or CPF.
    pub document: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub description: String,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub location: String,
    pub gross_value: Money,
    #[serde(default = "default_iss_percent")]
    pub iss_percent: Decimal,
}

impl Default for Service {
    fn default() -> Self {
        Self {
            description: String::new(),
            date: String::new(),
            location: String::new(),
            gross_value: Money::ZERO,
            iss_percent: DEFAULT_ISS_PERCENT,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub amount: Money,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Signature images captured outside the core, kept verbatim (data URLs).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Signatures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor: Option<String>,
}

/// Everything printed on one receipt.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub provider: Provider,
    pub contractor: Contractor,
    pub service: Service,
    pub payment: Payment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<Signatures>,
}

fn default_iss_percent() -> Decimal {
    DEFAULT_ISS_PERCENT
}

// The form stores an unselected account type as "".
fn deserialize_account_type<'de, D>(deserializer: D) -> std::result::Result<Option<AccountType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("Corrente") => Ok(Some(AccountType::Checking)),
        Some("Poupança") => Ok(Some(AccountType::Savings)),
        Some(other) => Err(serde::de::Error::unknown_variant(
            other,
            &["Corrente", "Poupança"],
        )),
    }
}

/// Treats a blank optional field the same as an absent one.
pub fn present(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl ServiceRecord {
    /// Whether any of the identifying fields has been filled in.
    pub fn has_content(&self) -> bool {
        [
            &self.provider.name,
            &self.contractor.name,
            &self.service.description,
        ]
        .iter()
        .any(|field| !field.trim().is_empty())
    }

    /// Checks the rules the entry form enforces before a receipt is generated.
    ///
    /// All violations are reported together, one per line.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        let required = [
            ("provider.name", &self.provider.name),
            ("provider.document", &self.provider.document),
            ("provider.address", &self.provider.address),
            ("contractor.name", &self.contractor.name),
            ("contractor.document", &self.contractor.document),
            ("contractor.address", &self.contractor.address),
            ("service.description", &self.service.description),
            ("service.date", &self.service.date),
            ("service.location", &self.service.location),
            ("payment.date", &self.payment.date),
            ("payment.method", &self.payment.method),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                problems.push(format!("{field} is required"));
            }
        }

        for (field, email) in [
            ("provider.email", &self.provider.email),
            ("contractor.email", &self.contractor.email),
        ] {
            if let Some(email) = present(email)
                && !looks_like_email(email)
            {
                problems.push(format!("{field} is not a valid e-mail address"));
            }
        }

        if self.service.gross_value.value() < MINIMUM_AMOUNT {
            problems.push("service.grossValue must be at least 0.01".to_string());
        }
        if self.payment.amount.value() < MINIMUM_AMOUNT {
            problems.push("payment.amount must be at least 0.01".to_string());
        }
        if self.service.iss_percent < Decimal::ZERO
            || self.service.iss_percent > Decimal::ONE_HUNDRED
        {
            problems.push("service.issPercent must be between 0 and 100".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(RpaError::ValidationError(problems.join("\n")))
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Standard observation stating that the net value was paid in full and the
/// withheld taxes remain with the contractor.
pub fn default_observation(payment: &Payment) -> Result<String> {
    if payment.date.trim().is_empty() || payment.method.trim().is_empty() {
        return Err(RpaError::ValidationError(
            "payment.date and payment.method are required to fill the observations".to_string(),
        ));
    }

    Ok(format!(
        "O valor líquido foi pago integralmente em {} via {}, sendo os tributos (INSS e ISS) \
         de responsabilidade do tomador, a recolher posteriormente.",
        format_date(&payment.date),
        payment.method.trim()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> ServiceRecord {
        ServiceRecord {
            provider: Provider {
                name: "João Silva".to_string(),
                document: "123.456.789-00".to_string(),
                address: "Rua A, 1".to_string(),
                ..Default::default()
            },
            contractor: Contractor {
                name: "ACME Ltda".to_string(),
                document: "12.345.678/0001-00".to_string(),
                address: "Av. B, 2".to_string(),
                email: None,
            },
            service: Service {
                description: "Consultoria".to_string(),
                date: "2025-03-01".to_string(),
                location: "São Paulo".to_string(),
                gross_value: Money::new(dec!(1000)),
                iss_percent: dec!(5),
            },
            payment: Payment {
                amount: Money::new(dec!(840)),
                date: "2025-03-10".to_string(),
                method: "Pix".to_string(),
                note: None,
            },
            observations: None,
            signatures: None,
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_validation_collects_every_problem() {
        let mut record = valid_record();
        record.provider.name = "  ".to_string();
        record.service.gross_value = Money::ZERO;
        record.service.iss_percent = dec!(101);
        record.contractor.email = Some("not-an-email".to_string());

        let Err(RpaError::ValidationError(message)) = record.validate() else {
            panic!("expected a validation error");
        };
        assert!(message.contains("provider.name is required"));
        assert!(message.contains("service.grossValue"));
        assert!(message.contains("service.issPercent"));
        assert!(message.contains("contractor.email"));
    }

    #[test]
    fn test_blank_optional_email_is_ignored() {
        let mut record = valid_record();
        record.provider.email = Some(String::new());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_form_json_with_empty_account_type() {
        let json = r#"{
            "provider": {"name": "A", "document": "1", "address": "x", "accountType": ""},
            "contractor": {"name": "B", "document": "2", "address": "y"},
            "service": {"description": "d", "date": "2025-01-01", "location": "l", "grossValue": 1000},
            "payment": {"amount": 840, "date": "2025-01-02", "method": "Pix"}
        }"#;
        let record: ServiceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.provider.account_type, None);
        assert_eq!(record.service.iss_percent, dec!(5));
        assert_eq!(record.service.gross_value, Money::new(dec!(1000)));
    }

    #[test]
    fn test_has_content() {
        assert!(!ServiceRecord::default().has_content());
        let mut record = ServiceRecord::default();
        record.service.description = "Pintura".to_string();
        assert!(record.has_content());
    }

    #[test]
    fn test_default_observation() {
        let record = valid_record();
        let text = default_observation(&record.payment).unwrap();
        assert!(text.starts_with("O valor líquido foi pago integralmente em 10/03/2025 via Pix,"));

        let mut payment = record.payment.clone();
        payment.method.clear();
        assert!(matches!(
            default_observation(&payment),
            Err(RpaError::ValidationError(_))
        ));
    }
}
