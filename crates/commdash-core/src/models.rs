//! Commission API response models.
//!
//! The backend wraps every payload in a `{status, ...}` envelope:
//! `/api/commission-data` carries `data` and `count`,
//! `/api/commission-summary` carries `summary`, and failures carry `message`.
//!
//! Amounts and counts arrive either as JSON numbers or as decimal strings
//! (`"1234.50"`), depending on the database driver, so numeric fields accept
//! both.

use crate::error::{CoreError, Result};
use crate::format::parse_amount;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Envelope status flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Server response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: EnvelopeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn check_status(&self) -> Result<()> {
        match self.status {
            EnvelopeStatus::Success => Ok(()),
            EnvelopeStatus::Error => Err(CoreError::Envelope(
                self.message
                    .clone()
                    .unwrap_or_else(|| "unspecified server error".to_string()),
            )),
        }
    }

    /// Unwrap the `data` payload of a successful envelope.
    pub fn into_data(self) -> Result<T> {
        self.check_status()?;
        self.data.ok_or(CoreError::MissingPayload("data"))
    }

    /// Unwrap the `summary` payload of a successful envelope.
    pub fn into_summary(self) -> Result<T> {
        self.check_status()?;
        self.summary.ok_or(CoreError::MissingPayload("summary"))
    }
}

/// Aggregated commission totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionSummary {
    #[serde(default, deserialize_with = "amount")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "amount")]
    pub total_new_business_premium: f64,
    #[serde(default, deserialize_with = "count")]
    pub total_clients: u64,
    #[serde(default, deserialize_with = "count")]
    pub total_products: u64,
    #[serde(default, deserialize_with = "count")]
    pub product_categories_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub personality_types_count: u64,
    #[serde(default, deserialize_with = "count")]
    pub total_records: u64,
}

/// One grouped commission row (per year, month, category, type and personality).
///
/// Field names follow the backend's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "ProductCategoryDescription")]
    pub product_category: Option<String>,
    #[serde(rename = "InternalReplacement")]
    pub internal_replacement: Option<bool>,
    #[serde(rename = "Type")]
    pub commission_type: Option<String>,
    #[serde(rename = "Personality_To_Use")]
    pub personality: Option<String>,
    #[serde(rename = "Amount", default, deserialize_with = "opt_amount")]
    pub amount: Option<f64>,
    #[serde(rename = "NewBusinessMonthlyPremium", default, deserialize_with = "opt_amount")]
    pub new_business_monthly_premium: Option<f64>,
    #[serde(rename = "SalesCount_Client", default, deserialize_with = "opt_count")]
    pub sales_count_client: Option<u64>,
    #[serde(rename = "SalesCount_Product", default, deserialize_with = "opt_count")]
    pub sales_count_product: Option<u64>,
}

impl CommissionRecord {
    /// `YYYY-MM` period key.
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// A number or numeric string. `null` is absent.
fn lenient_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    match parse_amount(&value) {
        None => Ok(None),
        Some(n) if n.is_finite() => Ok(Some(n)),
        Some(_) => Err(D::Error::custom(format!("expected a number, got {value}"))),
    }
}

fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

fn opt_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<f64>, D::Error> {
    lenient_number(deserializer)
}

fn to_count<E: serde::de::Error>(n: f64) -> std::result::Result<u64, E> {
    if n < 0.0 || n.fract() != 0.0 {
        return Err(E::custom(format!("expected a non-negative whole count, got {n}")));
    }
    Ok(n as u64)
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    lenient_number(deserializer)?.map_or(Ok(0), to_count)
}

fn opt_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u64>, D::Error> {
    lenient_number(deserializer)?.map(to_count).transpose()
}
