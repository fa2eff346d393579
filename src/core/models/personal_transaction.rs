use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Online,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Online => "online",
            PaymentMethod::Card => "card",
        }
    }
}

/// One partner's contribution toward a split company transaction.
///
/// `pending_balance` is non-null and positive only while the entry is not yet
/// completed; the server owns both it and `is_completed`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonalTransaction {
    pub id: i64,
    /// Partner identifier or display name, as the API sends it.
    pub user: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Owning company transaction.
    pub transaction: i64,
    pub is_completed: bool,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub pending_balance: Option<Decimal>,
}
