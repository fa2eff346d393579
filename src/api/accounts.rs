//! Clients, billable services, service transactions and todos.

use crate::api::client::ApiClient;
use crate::api::payloads::{
    ClientPayload, ServicePayload, ServiceTransactionPayload, TodoPayload,
};
use crate::core::errors::ApiError;
use crate::core::models::{BillableService, Client, ServiceTransaction, Todo};
use crate::infrastructure::storage::SessionStore;

impl<D: SessionStore, E: SessionStore> ApiClient<D, E> {
    // ── clients ─────────────────────────────────────────────────────

    pub async fn list_clients(&self) -> Result<Vec<Client>, ApiError> {
        self.get_json("accounts/clients/", &[]).await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, ApiError> {
        self.get_json(&format!("accounts/clients/{id}/"), &[]).await
    }

    pub async fn create_client(&self, payload: &ClientPayload) -> Result<Client, ApiError> {
        self.post_json("accounts/clients/", &[], payload).await
    }

    pub async fn update_client(
        &self,
        id: i64,
        payload: &ClientPayload,
    ) -> Result<Client, ApiError> {
        self.patch_json(&format!("accounts/clients/{id}/"), payload)
            .await
    }

    pub async fn delete_client(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("accounts/clients/{id}/")).await
    }

    // ── services ────────────────────────────────────────────────────

    pub async fn list_services(
        &self,
        client: Option<i64>,
    ) -> Result<Vec<BillableService>, ApiError> {
        let mut query = Vec::new();
        if let Some(client) = client {
            query.push(("client", client.to_string()));
        }
        self.get_json("accounts/services/", &query).await
    }

    pub async fn get_service(&self, id: i64) -> Result<BillableService, ApiError> {
        self.get_json(&format!("accounts/services/{id}/"), &[])
            .await
    }

    pub async fn create_service(
        &self,
        payload: &ServicePayload,
    ) -> Result<BillableService, ApiError> {
        self.post_json("accounts/services/", &[], payload).await
    }

    pub async fn update_service(
        &self,
        id: i64,
        payload: &ServicePayload,
    ) -> Result<BillableService, ApiError> {
        self.patch_json(&format!("accounts/services/{id}/"), payload)
            .await
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("accounts/services/{id}/")).await
    }

    // ── service transactions ────────────────────────────────────────

    pub async fn list_service_transactions(
        &self,
        service: Option<i64>,
    ) -> Result<Vec<ServiceTransaction>, ApiError> {
        let mut query = Vec::new();
        if let Some(service) = service {
            query.push(("service", service.to_string()));
        }
        self.get_json("accounts/service-transactions/", &query)
            .await
    }

    pub async fn get_service_transaction(&self, id: i64) -> Result<ServiceTransaction, ApiError> {
        self.get_json(&format!("accounts/service-transactions/{id}/"), &[])
            .await
    }

    pub async fn create_service_transaction(
        &self,
        payload: &ServiceTransactionPayload,
    ) -> Result<ServiceTransaction, ApiError> {
        self.post_json("accounts/service-transactions/", &[], payload)
            .await
    }

    pub async fn update_service_transaction(
        &self,
        id: i64,
        payload: &ServiceTransactionPayload,
    ) -> Result<ServiceTransaction, ApiError> {
        self.patch_json(&format!("accounts/service-transactions/{id}/"), payload)
            .await
    }

    pub async fn delete_service_transaction(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("accounts/service-transactions/{id}/"))
            .await
    }

    // ── todos ───────────────────────────────────────────────────────

    pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        self.get_json("accounts/todos/", &[]).await
    }

    pub async fn get_todo(&self, id: i64) -> Result<Todo, ApiError> {
        self.get_json(&format!("accounts/todos/{id}/"), &[]).await
    }

    pub async fn create_todo(&self, payload: &TodoPayload) -> Result<Todo, ApiError> {
        self.post_json("accounts/todos/", &[], payload).await
    }

    pub async fn update_todo(&self, id: i64, payload: &TodoPayload) -> Result<Todo, ApiError> {
        self.patch_json(&format!("accounts/todos/{id}/"), payload)
            .await
    }

    pub async fn delete_todo(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("accounts/todos/{id}/")).await
    }
}
