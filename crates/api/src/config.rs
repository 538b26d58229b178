// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduler configuration.
//!
//! Configuration is a JSON document. Every field is optional; omitted
//! fields take the defaults below.
//!
//! ```json
//! {
//!   "courses": ["First", "Second", "Third", "Fourth", "Fifth"],
//!   "daily_limit": 3,
//!   "timezone": "America/Santiago",
//!   "default_event_minutes": 60,
//!   "default_start_time": "08:00",
//!   "subject_colors": { "Math": "#1E88E5" },
//!   "store": { "backend": "csv", "path": "agenda.csv", "variant": "timed" },
//!   "credentials": [
//!     { "login": "alopez", "display_name": "Ana Lopez", "role": "teacher",
//!       "subject": "Math", "password_hash": "$2b$12$..." }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use agenda::SchedulingRules;
use agenda_domain::{
    CalendarProjector, CourseCatalog, DEFAULT_COLOR, DEFAULT_EVENT_MINUTES, DomainError,
    QuotaPolicy, Subject, SubjectPalette, parse_time,
};
use agenda_persistence::{Persistence, PersistenceError, SchemaVariant};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::auth::{Credential, CredentialTable};
use crate::error::AuthError;

/// Errors raised while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configured value is out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] DomainError),

    /// The credential table is unusable.
    #[error("Invalid credential table: {0}")]
    Credentials(#[from] AuthError),

    /// The record store could not be opened.
    #[error("Failed to open record store: {0}")]
    Store(#[from] PersistenceError),
}

/// Where assignments are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Keep everything in memory; lost on restart.
    #[default]
    Memory,
    /// A CSV file.
    Csv {
        /// Path of the CSV file.
        path: PathBuf,
        /// Column layout used when writing.
        #[serde(default)]
        variant: SchemaVariant,
    },
    /// A `SQLite` database. No path means a private in-memory database.
    Sqlite {
        /// Path of the database file.
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl StoreConfig {
    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened.
    pub fn open(&self) -> Result<Persistence, PersistenceError> {
        let persistence: Persistence = match self {
            Self::Memory => Persistence::new_memory(),
            Self::Csv { path, variant } => Persistence::new_csv(path, *variant)?,
            Self::Sqlite { path: Some(path) } => Persistence::new_sqlite_file(path)?,
            Self::Sqlite { path: None } => Persistence::new_sqlite_in_memory()?,
        };
        info!(backend = persistence.backend_name(), "Opened record store");
        Ok(persistence)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgendaConfig {
    /// Course names, in display order.
    pub courses: Vec<String>,
    /// Maximum assignments per course per day for teachers.
    pub daily_limit: usize,
    /// IANA timezone the school's wall-clock times are in.
    pub timezone: String,
    /// Event length for assignments without a declared duration.
    pub default_event_minutes: u16,
    /// Start time (`HH:MM`) for assignments without a time of day.
    pub default_start_time: String,
    /// Subject to `#RRGGBB` color.
    pub subject_colors: BTreeMap<String, String>,
    /// Color for subjects not listed in `subject_colors`.
    pub default_color: String,
    /// Record store selection.
    pub store: StoreConfig,
    /// Users allowed to sign in.
    pub credentials: Vec<Credential>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            courses: CourseCatalog::default()
                .courses()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            daily_limit: agenda_domain::DAILY_ASSIGNMENT_LIMIT,
            timezone: String::from("UTC"),
            default_event_minutes: DEFAULT_EVENT_MINUTES,
            default_start_time: format!("{:02}:00", agenda_domain::DEFAULT_START_HOUR),
            subject_colors: BTreeMap::new(),
            default_color: String::from(DEFAULT_COLOR),
            store: StoreConfig::default(),
            credentials: Vec::new(),
        }
    }
}

impl AgendaConfig {
    /// Parses configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text: String = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = Self::from_json_str(&text)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Builds the course catalog and quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the course list or daily limit is invalid.
    pub fn scheduling_rules(&self) -> Result<SchedulingRules, ConfigError> {
        let catalog: CourseCatalog = CourseCatalog::new(&self.courses)?;
        let quota: QuotaPolicy = QuotaPolicy::new(self.daily_limit)?;
        Ok(SchedulingRules::new(catalog, quota))
    }

    /// Builds the calendar projector.
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone, default start time, default length
    /// or a color is invalid.
    pub fn calendar_projector(&self) -> Result<CalendarProjector, ConfigError> {
        let palette: SubjectPalette = SubjectPalette::new(
            self.subject_colors
                .iter()
                .map(|(subject, color)| (Subject::new(subject), color.clone()))
                .collect(),
            self.default_color.clone(),
        )?;
        let default_start = parse_time(&self.default_start_time)?;
        Ok(CalendarProjector::new(
            &self.timezone,
            default_start,
            self.default_event_minutes,
            palette,
        )?)
    }

    /// Builds the credential table.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is invalid.
    pub fn credential_table(&self) -> Result<CredentialTable, ConfigError> {
        Ok(CredentialTable::new(self.credentials.clone())?)
    }

    /// Checks every section without opening the store.
    ///
    /// # Errors
    ///
    /// Returns the first invalid section found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduling_rules()?;
        self.calendar_projector()?;
        self.credential_table()?;
        Ok(())
    }
}
