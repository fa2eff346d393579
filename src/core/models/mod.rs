pub mod client;
pub mod company_transaction;
pub mod page;
pub mod partner;
pub mod personal_transaction;
pub mod service;
pub mod todo;
pub mod user;

pub use client::Client;
pub use company_transaction::{CompanyTransaction, TransactionType};
pub use page::Paginated;
pub use partner::Partner;
pub use personal_transaction::{PaymentMethod, PersonalTransaction};
pub use service::{BillableService, ServiceTransaction};
pub use todo::Todo;
pub use user::{Role, User};
