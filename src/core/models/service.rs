use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A billable service sold to a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BillableService {
    pub id: i64,
    pub client: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// A payment recorded against a service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceTransaction {
    pub id: i64,
    pub service: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}
