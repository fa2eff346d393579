//! Company ledger, partners and per-partner settlement endpoints.

use reqwest::multipart::{Form, Part};

use crate::api::client::ApiClient;
use crate::api::payloads::{
    CompanyTransactionFilter, CompanyTransactionForm, NewPersonalTransaction, PartnerListResponse,
    PersonalTransactionPatch, SettlementDetail,
};
use crate::core::errors::ApiError;
use crate::core::models::{CompanyTransaction, Paginated, PersonalTransaction};
use crate::infrastructure::storage::SessionStore;

/// Multipart forms cannot be cloned, so the send path rebuilds one per
/// attempt from the owned form data.
fn multipart_form(form: &CompanyTransactionForm) -> Form {
    let mut parts = Form::new()
        .text("transaction_type", form.transaction_type.as_str())
        .text("amount", form.amount.to_string())
        .text("date_time", form.date_time.to_rfc3339())
        .text("split_amount", form.split_amount.to_string());
    if let Some(notes) = &form.notes {
        parts = parts.text("notes", notes.clone());
    }
    if let Some(person) = form.person {
        parts = parts.text("person", person.to_string());
    }
    if let Some(image) = &form.image {
        parts = parts.part(
            "image",
            Part::bytes(image.bytes.clone()).file_name(image.file_name.clone()),
        );
    }
    parts
}

impl<D: SessionStore, E: SessionStore> ApiClient<D, E> {
    // ── company transactions ────────────────────────────────────────

    pub async fn list_company_transactions(
        &self,
        filter: &CompanyTransactionFilter,
    ) -> Result<Paginated<CompanyTransaction>, ApiError> {
        self.get_json("accounts/company-transactions/", &filter.to_query())
            .await
    }

    pub async fn create_company_transaction(
        &self,
        form: &CompanyTransactionForm,
    ) -> Result<CompanyTransaction, ApiError> {
        let response = self
            .send(|http| {
                http.post(self.url("accounts/company-transactions/create/"))
                    .multipart(multipart_form(form))
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn update_company_transaction(
        &self,
        id: i64,
        form: &CompanyTransactionForm,
    ) -> Result<CompanyTransaction, ApiError> {
        let response = self
            .send(|http| {
                http.patch(self.url(&format!("accounts/company-transactions/{id}/")))
                    .multipart(multipart_form(form))
            })
            .await?;
        self.expect_json(response).await
    }

    pub async fn delete_company_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("accounts/company-transactions/{id}/"))
            .await
    }

    // ── partners ────────────────────────────────────────────────────

    pub async fn list_partners(&self) -> Result<PartnerListResponse, ApiError> {
        self.get_json("accounts/partners/", &[]).await
    }

    pub async fn partner_transactions(
        &self,
        partner_id: i64,
    ) -> Result<Vec<CompanyTransaction>, ApiError> {
        self.get_json(
            "accounts/partners/transactions/",
            &[("partner", partner_id.to_string())],
        )
        .await
    }

    pub async fn partner_transaction(
        &self,
        partner_id: i64,
        tx_id: i64,
    ) -> Result<CompanyTransaction, ApiError> {
        self.get_json(
            &format!("accounts/partners/{partner_id}/transactions/{tx_id}/"),
            &[],
        )
        .await
    }

    // ── settlements (personal transactions) ─────────────────────────

    /// Parent transaction and all payments against it, in one fetch. Call
    /// again after any write to either side; the split aggregates and
    /// `is_closed` on the parent are server-computed and go stale otherwise.
    pub async fn settlement_detail(
        &self,
        company_tx_id: i64,
    ) -> Result<SettlementDetail, ApiError> {
        self.get_json(
            &format!("accounts/personal-transactions/{company_tx_id}/"),
            &[],
        )
        .await
    }

    pub async fn personal_transaction_detail(
        &self,
        partner_id: i64,
        tx_id: i64,
    ) -> Result<PersonalTransaction, ApiError> {
        self.get_json(
            &format!("accounts/personal-transactions/details/{partner_id}/{tx_id}/"),
            &[],
        )
        .await
    }

    /// Record a partner payment against a split transaction. The pair is
    /// addressed through query params, matching the API contract.
    pub async fn create_personal_transaction(
        &self,
        partner_id: i64,
        company_tx_id: i64,
        payload: &NewPersonalTransaction,
    ) -> Result<PersonalTransaction, ApiError> {
        self.post_json(
            "accounts/personal-transactions/create/",
            &[
                ("user", partner_id.to_string()),
                ("transaction", company_tx_id.to_string()),
            ],
            payload,
        )
        .await
    }

    pub async fn update_personal_transaction(
        &self,
        id: i64,
        patch: &PersonalTransactionPatch,
    ) -> Result<PersonalTransaction, ApiError> {
        self.patch_json(&format!("accounts/personal-transactions/edit/{id}/"), patch)
            .await
    }

    pub async fn delete_personal_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("accounts/personal-transactions/edit/{id}/"))
            .await
    }
}
