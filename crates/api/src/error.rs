// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use agenda::CoreError;
use agenda_domain::{DomainError, format_date};
use agenda_persistence::PersistenceError;
use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No login or password was supplied.
    #[error("Missing credentials")]
    MissingCredentials,

    /// The login is unknown or the password does not match.
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// A configured credential entry is unusable.
    #[error("Invalid credential entry for '{login}': {reason}")]
    InvalidCredentialEntry { login: String, reason: String },

    /// Hashing a password failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A submitted or queried value is invalid.
    ValidationFailed {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The (course, day) already holds the maximum number of assignments.
    QuotaExceeded {
        /// The course name.
        course: String,
        /// The due date (`YYYY-MM-DD`).
        due_date: String,
        /// Assignments already on that day.
        count: usize,
        /// The limit in force.
        limit: usize,
    },
    /// The actor may not perform this action.
    Forbidden {
        /// Why the action was refused.
        reason: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The record store failed. The caller may retry.
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::ValidationFailed { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::QuotaExceeded {
                course,
                due_date,
                count,
                limit,
            } => write!(
                f,
                "Course '{course}' already has {count} assignments on {due_date} (limit {limit})"
            ),
            Self::Forbidden { reason } => write!(f, "Forbidden: {reason}"),
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::StoreUnavailable { message } => {
                write!(f, "Record store unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Hashing(message) => Self::Internal { message },
            other => Self::AuthenticationFailed {
                reason: other.to_string(),
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::ValidationFailed {
        field: String::from(field),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::UnknownCourse { .. } => invalid("course", &err),
        DomainError::InvalidSubject(_) => invalid("subject", &err),
        DomainError::InvalidTeacherName(_) => invalid("teacher_name", &err),
        DomainError::InvalidTaskType(_) => invalid("task_type", &err),
        DomainError::InvalidDuration { .. } => invalid("duration_minutes", &err),
        DomainError::DateParseError { .. } => invalid("due_date", &err),
        DomainError::TimeParseError { .. } => invalid("due_time", &err),
        DomainError::InvalidRole(_) => invalid("role", &err),
        DomainError::InvalidCalendarWindow { .. } => invalid("due_time", &err),
        DomainError::InvalidCourseCatalog(_)
        | DomainError::InvalidTimezone(_)
        | DomainError::InvalidColor(_)
        | DomainError::InvalidQuotaLimit { .. } => ApiError::Internal {
            message: format!("Misconfigured scheduler: {err}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::QuotaExceeded {
            course,
            due_date,
            count,
            limit,
        } => ApiError::QuotaExceeded {
            course,
            due_date: format_date(due_date),
            count,
            limit,
        },
        CoreError::Forbidden {
            assignment_id,
            reason,
        } => ApiError::Forbidden {
            reason: format!("assignment {assignment_id}: {reason}"),
        },
        CoreError::AssignmentNotFound(id) => not_found(id),
    }
}

/// Translates a persistence error into an API error.
///
/// Everything except a missing record is a store failure.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(id) => not_found(id),
        other => ApiError::StoreUnavailable {
            message: other.to_string(),
        },
    }
}

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound {
        resource_type: String::from("Assignment"),
        message: format!("Assignment {id} does not exist"),
    }
}
