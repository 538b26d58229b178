// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV-backed record store.
//!
//! The file is read once when the store is opened and rewritten in full on
//! every change. Rewrites go to a temporary file in the same directory that
//! is then renamed over the original, so a failed write leaves the previous
//! contents in place.
//!
//! The next id is kept in a `.seq` sidecar next to the CSV file. Without it,
//! deleting the newest record and restarting would hand out its id again.
//!
//! The store assumes it is the only writer of the file.

mod columns;

pub use columns::SchemaVariant;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use agenda_domain::{Assignment, AssignmentId, NewAssignment};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::RecordStore;
use crate::error::PersistenceError;
use columns::HeaderMap;

#[derive(Debug)]
struct CsvState {
    records: Vec<Assignment>,
    next_id: i64,
}

/// A record store over one CSV file.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    sequence_path: PathBuf,
    variant: SchemaVariant,
    state: Mutex<CsvState>,
}

impl CsvStore {
    /// Opens the store at `path`, loading any existing records.
    ///
    /// A missing or empty file is an empty store; the file is created on
    /// the first write. Rows without an id are numbered in file order after
    /// the highest stored id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a required column is
    /// missing, or a row cannot be parsed.
    pub fn open<P: AsRef<Path>>(path: P, variant: SchemaVariant) -> Result<Self, PersistenceError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let sequence_path: PathBuf = sequence_path_for(&path);

        let (records, high_water) = load_records(&path)?;
        let stored_next: i64 = read_sequence(&sequence_path)?;
        let next_id: i64 = stored_next.max(high_water + 1);

        info!(
            path = %path.display(),
            variant = %variant,
            count = records.len(),
            next_id,
            "Opened CSV record store"
        );

        Ok(Self {
            path,
            sequence_path,
            variant,
            state: Mutex::new(CsvState { records, next_id }),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the schema variant the file is written with.
    #[must_use]
    pub const fn variant(&self) -> SchemaVariant {
        self.variant
    }

    fn lock(&self) -> Result<MutexGuard<'_, CsvState>, PersistenceError> {
        self.state.lock().map_err(|_| PersistenceError::LockPoisoned)
    }

    fn write_records(&self, records: &[Assignment]) -> Result<(), PersistenceError> {
        let variant: SchemaVariant = self.variant;
        write_atomically(&self.path, |file| {
            let mut writer = WriterBuilder::new().from_writer(file);
            writer.write_record(variant.headers())?;
            for record in records {
                writer.write_record(variant.encode(record))?;
            }
            writer.flush()?;
            Ok(())
        })?;
        debug!(path = %self.path.display(), count = records.len(), "Rewrote CSV file");
        Ok(())
    }

    fn write_sequence(&self, next_id: i64) -> Result<(), PersistenceError> {
        write_atomically(&self.sequence_path, |file| {
            writeln!(file, "{next_id}")?;
            Ok(())
        })
    }
}

impl RecordStore for CsvStore {
    fn list_all(&self) -> Result<Vec<Assignment>, PersistenceError> {
        Ok(self.lock()?.records.clone())
    }

    fn append(&self, record: &NewAssignment) -> Result<AssignmentId, PersistenceError> {
        let mut state = self.lock()?;
        let id: AssignmentId = AssignmentId::new(state.next_id);

        let mut records: Vec<Assignment> = state.records.clone();
        records.push(self.variant.retained(record.clone().with_id(id)));

        // Sequence first: a lost CSV write then only skips an id.
        self.write_sequence(id.value() + 1)?;
        self.write_records(&records)?;

        state.records = records;
        state.next_id = id.value() + 1;
        info!(assignment_id = id.value(), course = %record.course, "Appended assignment to CSV");
        Ok(id)
    }

    fn delete_by_id(&self, id: AssignmentId) -> Result<(), PersistenceError> {
        let mut state = self.lock()?;
        if !state.records.iter().any(|r| r.id == id) {
            return Err(PersistenceError::NotFound(id.value()));
        }

        let records: Vec<Assignment> = state
            .records
            .iter()
            .filter(|r| r.id != id)
            .cloned()
            .collect();
        self.write_sequence(state.next_id)?;
        self.write_records(&records)?;

        state.records = records;
        info!(assignment_id = id.value(), "Deleted assignment from CSV");
        Ok(())
    }
}

fn sequence_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".seq");
    path.with_file_name(name)
}

// Returns the records and the highest id among them (0 when empty).
fn load_records(path: &Path) -> Result<(Vec<Assignment>, i64), PersistenceError> {
    let contents: String = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "CSV file does not exist yet, starting empty");
            return Ok((Vec::new(), 0));
        }
        Err(e) => return Err(e.into()),
    };
    if contents.trim().is_empty() {
        return Ok((Vec::new(), 0));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(contents.as_bytes());
    let headers: StringRecord = reader.headers()?.clone();
    let header_map: HeaderMap = HeaderMap::from_headers(&headers)?;

    let mut decoded: Vec<(Option<AssignmentId>, NewAssignment)> = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record: StringRecord = result?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        decoded.push(header_map.decode(&record, index + 1)?);
    }

    let mut high_water: i64 = decoded
        .iter()
        .filter_map(|(id, _)| id.map(|id| id.value()))
        .max()
        .unwrap_or(0);

    let mut seen: std::collections::HashSet<i64> = std::collections::HashSet::new();
    let mut records: Vec<Assignment> = Vec::with_capacity(decoded.len());
    for (index, (id, record)) in decoded.into_iter().enumerate() {
        let id: AssignmentId = if let Some(id) = id {
            id
        } else {
            high_water += 1;
            AssignmentId::new(high_water)
        };
        if !seen.insert(id.value()) {
            return Err(PersistenceError::CorruptRecord {
                location: format!("row {}", index + 1),
                reason: format!("duplicate id {id}"),
            });
        }
        records.push(record.with_id(id));
    }

    Ok((records, high_water))
}

fn read_sequence(path: &Path) -> Result<i64, PersistenceError> {
    match fs::read_to_string(path) {
        Ok(contents) => contents.trim().parse::<i64>().or_else(|e| {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable id sequence file");
            Ok(0)
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn write_atomically<F>(path: &Path, write: F) -> Result<(), PersistenceError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), PersistenceError>,
{
    let directory: &Path = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file: NamedTempFile = NamedTempFile::new_in(directory)?;
    write(&mut file)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| PersistenceError::Io(e.error.to_string()))?;
    Ok(())
}
