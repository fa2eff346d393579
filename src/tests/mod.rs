mod settlement_tests;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::client::ApiClient;
use crate::config::Config;
use crate::core::models::{CompanyTransaction, PaymentMethod, PersonalTransaction, TransactionType};
use crate::infrastructure::storage::SessionVault;
use crate::infrastructure::storage::in_memory::InMemoryStore;

/// A client wired to a mock server, with handles on both session stores so
/// tests can observe exactly where the blob lands.
pub(crate) struct TestHarness {
    pub server: MockServer,
    pub client: ApiClient<InMemoryStore, InMemoryStore>,
    pub durable: InMemoryStore,
    pub ephemeral: InMemoryStore,
}

pub(crate) async fn harness() -> TestHarness {
    let server = MockServer::start().await;
    let durable = InMemoryStore::new();
    let ephemeral = InMemoryStore::new();
    let config = Config::new(server.uri(), "unused-session.json");
    let client =
        ApiClient::with_vault(config, SessionVault::new(durable.clone(), ephemeral.clone()));
    TestHarness {
        server,
        client,
        durable,
        ephemeral,
    }
}

pub(crate) fn login_body(access: &str, refresh: &str) -> serde_json::Value {
    json!({
        "access": access,
        "refresh": refresh,
        "user": { "id": 7, "name": "Ada", "email": "ada@example.com" },
        "is_admin": false,
    })
}

pub(crate) async fn mount_login(server: &MockServer, access: &str, refresh: &str) {
    Mock::given(method("POST"))
        .and(path("/accounts/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(access, refresh)))
        .mount(server)
        .await;
}

pub(crate) fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

pub(crate) fn company_tx(id: i64, split: bool, closed: bool) -> CompanyTransaction {
    CompanyTransaction {
        id,
        transaction_type: TransactionType::Expense,
        amount: dec("100.00"),
        date_time: Utc.with_ymd_and_hms(2026, 7, 4, 12, 0, 0).unwrap(),
        notes: None,
        image: None,
        person: None,
        person_name: None,
        split_amount: split,
        is_closed: closed,
        total_split_amount: None,
        total_received_amount: None,
        remaining_amount: None,
    }
}

pub(crate) fn personal_tx(id: i64, parent: i64, amount: &str) -> PersonalTransaction {
    PersonalTransaction {
        id,
        user: format!("partner-{id}"),
        amount: dec(amount),
        payment_method: PaymentMethod::Cash,
        payment_date: Utc.with_ymd_and_hms(2026, 7, 10, 9, 30, 0).unwrap(),
        notes: None,
        transaction: parent,
        is_completed: false,
        pending_balance: None,
    }
}
