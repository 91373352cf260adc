use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::admin::{AdminAuthority, AdminCredential};
use crate::error::SessionError;
use crate::storage::KeyValueStore;
use crate::validation::validate_email;

/// A signed-in member and whether they have used their one spin.
///
/// The email is self-asserted; nothing here checks it against a member list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub email: String,
    pub has_spun: bool,
}

/// Member login, admin login, and the one-spin rule.
pub struct SessionGate<S> {
    credential: AdminCredential,
    authority: AdminAuthority<S>,
}

impl<S: KeyValueStore> SessionGate<S> {
    /// Restores admin mode from `storage` and checks admin logins against the
    /// built-in secret.
    pub fn new(storage: S) -> Self {
        Self::with_credential(storage, AdminCredential::default())
    }

    pub fn with_credential(storage: S, credential: AdminCredential) -> Self {
        Self {
            credential,
            authority: AdminAuthority::restore(storage),
        }
    }

    pub fn login(&self, email: &str) -> Result<UserSession, SessionError> {
        validate_email(email).map_err(|_| SessionError::InvalidEmail)?;
        Ok(UserSession {
            email: email.trim().to_string(),
            has_spun: false,
        })
    }

    /// Enables admin mode on a matching credential. A wrong credential
    /// changes nothing.
    pub fn login_as_admin(&mut self, credential: &str) -> bool {
        if !self.credential.verify(credential) {
            warn!("Rejected admin login");
            return false;
        }
        self.authority.grant();
        true
    }

    pub fn logout_admin(&mut self) {
        self.authority.revoke();
    }

    pub fn record_spin(&self, session: &UserSession) -> Result<UserSession, SessionError> {
        if session.has_spun {
            return Err(SessionError::AlreadySpun);
        }
        info!("Spin recorded for {}", session.email);
        Ok(UserSession {
            email: session.email.clone(),
            has_spun: true,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.authority.is_granted()
    }

    pub fn authority(&self) -> &AdminAuthority<S> {
        &self.authority
    }
}
