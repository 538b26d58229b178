// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication against a configured credential table.
//!
//! The table replaces a hardcoded user list: each entry carries a login, a
//! display name, a role, the subject a teacher is responsible for, and a
//! bcrypt password hash. Authentication yields the `Actor` every scheduling
//! operation is performed as.

use agenda_domain::{Actor, Role, Subject};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AuthError;

/// One configured user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Login name, compared case-insensitively.
    pub login: String,
    /// Name shown in the UI and matched against assignment teacher names.
    pub display_name: String,
    /// The user's role.
    pub role: Role,
    /// The subject a teacher is responsible for. Ignored for coordinators.
    #[serde(default)]
    pub subject: Option<String>,
    /// bcrypt hash of the password.
    pub password_hash: String,
}

/// The validated set of users allowed to sign in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialTable {
    entries: Vec<Credential>,
}

impl CredentialTable {
    /// Builds a table from configured entries.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentialEntry` if a login is empty or
    /// repeated, a display name or hash is empty, or a teacher has no
    /// subject.
    pub fn new(entries: Vec<Credential>) -> Result<Self, AuthError> {
        for (index, entry) in entries.iter().enumerate() {
            let reject = |reason: &str| AuthError::InvalidCredentialEntry {
                login: entry.login.clone(),
                reason: String::from(reason),
            };

            if entry.login.trim().is_empty() {
                return Err(reject("login cannot be empty"));
            }
            if entry.display_name.trim().is_empty() {
                return Err(reject("display name cannot be empty"));
            }
            if entry.password_hash.trim().is_empty() {
                return Err(reject("password hash cannot be empty"));
            }
            let has_subject: bool = entry
                .subject
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty());
            if entry.role == Role::Teacher && !has_subject {
                return Err(reject("teachers must have a subject"));
            }
            if entries[..index]
                .iter()
                .any(|other| other.login.trim().eq_ignore_ascii_case(entry.login.trim()))
            {
                return Err(reject("login is listed more than once"));
            }
        }
        Ok(Self { entries })
    }

    /// Returns the number of configured users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no users are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, login: &str) -> Option<&Credential> {
        let wanted: &str = login.trim();
        self.entries
            .iter()
            .find(|entry| entry.login.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Authentication service.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks a login and password against the table.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either value is empty and
    /// `AuthError::InvalidCredentials` if the login is unknown or the
    /// password does not match.
    pub fn authenticate(
        table: &CredentialTable,
        login: &str,
        password: &str,
    ) -> Result<Actor, AuthError> {
        if login.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let Some(entry) = table.find(login) else {
            debug!(login, "Unknown login");
            return Err(AuthError::InvalidCredentials);
        };

        match bcrypt::verify(password, &entry.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                debug!(login = %entry.login, "Password mismatch");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                warn!(login = %entry.login, error = %e, "Stored password hash is unusable");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let login: &str = entry.login.trim();
        let actor: Actor = match (entry.role, entry.subject.as_deref()) {
            (Role::Teacher, Some(subject)) => {
                Actor::teacher(login, &entry.display_name, Subject::new(subject))
            }
            (Role::Teacher, None) => {
                return Err(AuthError::InvalidCredentialEntry {
                    login: entry.login.clone(),
                    reason: String::from("teachers must have a subject"),
                });
            }
            (Role::Coordinator, _) => Actor::coordinator(login, &entry.display_name),
        };

        debug!(login, role = %actor.role(), "Authenticated");
        Ok(actor)
    }
}

/// Hashes a password for storage in the credential table.
///
/// # Errors
///
/// Returns `AuthError::Hashing` if bcrypt fails (e.g. an out-of-range cost).
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}
