use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A partner of the organization. The aggregate fields are API-computed
/// roll-ups; the client treats them as read-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub transaction_count: i64,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub transaction_total_amount: Option<Decimal>,
}
