use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

/// One ledger entry owned by the organization. Amounts travel as JSON strings.
///
/// When `split_amount` is set the server supplies the settlement aggregates
/// (`total_split_amount`, `total_received_amount`, `remaining_amount`) and it
/// alone decides `is_closed`; the client never computes closure locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyTransaction {
    pub id: i64,
    pub transaction_type: TransactionType,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Receipt image reference, if one was uploaded.
    #[serde(default)]
    pub image: Option<String>,
    /// Partner this was paid by/to, if any.
    #[serde(default)]
    pub person: Option<i64>,
    /// Denormalized partner name; the API may send this, only an id, or neither.
    #[serde(default)]
    pub person_name: Option<String>,
    pub split_amount: bool,
    pub is_closed: bool,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_split_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_received_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub remaining_amount: Option<Decimal>,
}

impl CompanyTransaction {
    /// True iff this entry is divided among partners for settlement.
    pub fn is_split(&self) -> bool {
        self.split_amount
    }
}
