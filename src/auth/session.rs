use serde::{Deserialize, Serialize};

use crate::core::models::User;

/// The session blob: cached profile, token pair, and the persistence choice.
///
/// Always serialized and persisted as a single unit, never partially. Tokens
/// are opaque; the server mints and validates them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Governs whether the blob lands in durable or ephemeral storage.
    pub remember_me: bool,
}

impl Session {
    /// Derived: authenticated iff both tokens are present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }

    /// Reset to the anonymous state. Storage cleanup is the vault's job.
    pub fn clear(&mut self) {
        *self = Session::default();
    }
}
