// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod config;
mod error;
mod request_response;
mod service;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, Credential, CredentialTable, hash_password};
pub use config::{AgendaConfig, ConfigError, StoreConfig};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use request_response::{
    AssignmentListResponse, AssignmentView, CalendarResponse, CatalogResponse,
    DailyLoadResponse, DailyLoadView, DeleteAssignmentResponse, SubmitAssignmentResponse,
    WeekView,
};
pub use service::SchedulingService;
