//! Request and response bodies for the accounts API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::models::{
    CompanyTransaction, PaymentMethod, Partner, PersonalTransaction, TransactionType,
};

// ── auth ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Profile as the login endpoint sends it; the role arrives separately as
/// `is_admin` on the envelope.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserPayload,
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

// ── clients / services / todos ──────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ClientPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServicePayload {
    pub client: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceTransactionPayload {
    pub service: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub date_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<chrono::NaiveDate>,
}

// ── company transactions ────────────────────────────────────────────

/// Filters for the paginated company ledger listing.
#[derive(Debug, Clone, Default)]
pub struct CompanyTransactionFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub person: Option<i64>,
    pub page: Option<u32>,
}

impl CompanyTransactionFilter {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(month) = self.month {
            query.push(("month", month.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(person) = self.person {
            query.push(("person", person.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

/// Optional receipt image attached to a company transaction.
#[derive(Debug, Clone)]
pub struct ReceiptImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Create/update form for a company transaction. Sent as multipart because of
/// the optional receipt image.
#[derive(Debug, Clone)]
pub struct CompanyTransactionForm {
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date_time: DateTime<Utc>,
    pub notes: Option<String>,
    pub person: Option<i64>,
    pub split_amount: bool,
    pub image: Option<ReceiptImage>,
}

// ── partners / settlements ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PartnerListResponse {
    pub partners: Vec<Partner>,
    /// Chart fodder; passed through untyped since rendering is out of scope.
    #[serde(default)]
    pub transaction_stats: serde_json::Value,
}

/// Parent transaction plus all partner payments against it, fetched together
/// so a view can refresh both after any write to either.
#[derive(Debug, Deserialize)]
pub struct SettlementDetail {
    pub data: Vec<PersonalTransaction>,
    pub details: CompanyTransaction,
}

/// Body for recording a partner payment. `payment_date` defaults to the
/// moment of creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewPersonalTransaction {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub payment_date: DateTime<Utc>,
}

impl NewPersonalTransaction {
    pub fn new(amount: Decimal, payment_method: PaymentMethod, notes: Option<String>) -> Self {
        Self {
            amount,
            payment_method,
            notes,
            payment_date: Utc::now(),
        }
    }
}

/// Partial update for a partner payment. Fields left `None` are not sent, so
/// an edit that does not touch `payment_date` preserves the original date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonalTransactionPatch {
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::str_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
}
