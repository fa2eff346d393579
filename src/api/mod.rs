pub mod accounts;
pub mod client;
pub mod payloads;
pub mod transactions;
