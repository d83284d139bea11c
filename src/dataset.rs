//! # Dataset Module
//!
//! Loads the medicine reference table from a delimited file into memory.
//!
//! The table is read once at startup and never mutated afterwards, so it can be
//! shared between any number of request handlers behind an `Arc` without locking.
//!
//! ## Accepted layouts
//!
//! Columns are resolved by header name (case-insensitive). Several spellings are
//! accepted for each field so that both the short layout (`Drug Name`, `Class`,
//! `Indication`, ...) and the patient-friendly layout (`Generic Name`,
//! `Drug Class`, `Use (patient-friendly)`, ...) load without conversion.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::dataset_errors::DatasetError;

/// Default location of the dataset relative to the working directory
pub const DEFAULT_DATASET_PATH: &str = "data/medicines.csv";

// Header candidates per field, in priority order
const NAME_COLUMNS: &[&str] = &["Generic Name", "Drug Name", "Name"];
const CLASS_COLUMNS: &[&str] = &["Drug Class", "Class"];
const INDICATION_COLUMNS: &[&str] = &["Use (patient-friendly)", "Indication", "Use"];
const DOSAGE_COLUMNS: &[&str] = &["Typical Adult Dose (simple)", "Dosage", "Dose"];
const CAUTION_COLUMNS: &[&str] = &["One-line caution / safety note", "Side Effects", "Caution"];
const ADVICE_COLUMNS: &[&str] = &[
    "When to see doctor / red flags",
    "Special Instructions",
    "Red Flags",
];

/// One row of the medicine dataset
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MedicineRecord {
    /// Canonical name, used as the match key
    pub name: String,
    /// Pharmacological category
    pub class: Option<String>,
    /// What the medicine is used for
    pub indication: Option<String>,
    /// Free-text dosing guidance
    pub dosage: Option<String>,
    /// Side effects or one-line safety note
    pub caution: Option<String>,
    /// Special instructions or red flags that warrant seeing a doctor
    pub advice: Option<String>,
}

impl MedicineRecord {
    /// Create a record with only a name; optional fields start absent
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A record paired with its normalized lookup key
#[derive(Debug, Clone)]
struct DatasetEntry {
    lookup_key: String,
    record: MedicineRecord,
}

/// Normalize free text for matching: surrounding whitespace stripped, lower-cased
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Column positions resolved from the header row
#[derive(Debug)]
struct ColumnMap {
    name: usize,
    class: Option<usize>,
    indication: Option<usize>,
    dosage: Option<usize>,
    caution: Option<usize>,
    advice: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, DatasetError> {
        let normalized: Vec<String> = headers.iter().map(normalize).collect();
        let find = |candidates: &[&str]| {
            candidates.iter().find_map(|candidate| {
                let wanted = normalize(candidate);
                normalized.iter().position(|header| *header == wanted)
            })
        };

        let name = find(NAME_COLUMNS).ok_or_else(|| DatasetError::MissingNameColumn {
            headers: headers.iter().map(str::to_string).collect(),
        })?;

        Ok(Self {
            name,
            class: find(CLASS_COLUMNS),
            indication: find(INDICATION_COLUMNS),
            dosage: find(DOSAGE_COLUMNS),
            caution: find(CAUTION_COLUMNS),
            advice: find(ADVICE_COLUMNS),
        })
    }

    fn record_from_row(&self, row: &StringRecord) -> MedicineRecord {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        MedicineRecord {
            name: cell(Some(self.name)).unwrap_or_default(),
            class: cell(self.class),
            indication: cell(self.indication),
            dosage: cell(self.dosage),
            caution: cell(self.caution),
            advice: cell(self.advice),
        }
    }
}

/// Immutable, ordered medicine table
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    entries: Vec<DatasetEntry>,
}

impl Dataset {
    /// Load the dataset from a file on disk
    ///
    /// Tab-separated files are recognised by a `.tsv` or `.tab` extension;
    /// anything else is read as comma-separated.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Missing`] naming the path when the file does not
    /// exist, and the errors of [`Dataset::from_reader`] for malformed content.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        info!("Loading medicine dataset from: {}", path.display());

        let file = File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => DatasetError::Missing(path.to_path_buf()),
            _ => DatasetError::Unreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        })?;

        let dataset = Self::from_reader(file, delimiter_for(path))?;
        info!(
            "Loaded {} medicine records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from any reader; the first row must be the header
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, DatasetError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(reader.headers()?)?;
        debug!("Resolved dataset columns: {columns:?}");

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let record = columns.record_from_row(&row);
            if record.name.is_empty() {
                let line = row.position().map(|pos| pos.line()).unwrap_or_default();
                warn!("Skipping dataset row at line {line}: empty medicine name");
                continue;
            }
            records.push(record);
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self::from_records(records))
    }

    /// Build a dataset from records already in memory, preserving their order
    pub fn from_records(records: Vec<MedicineRecord>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| DatasetEntry {
                lookup_key: normalize(&record.name),
                record,
            })
            .collect();
        Self { entries }
    }

    /// First record whose lookup key equals `key`
    ///
    /// `key` is expected to be normalized already.
    pub fn find_exact(&self, key: &str) -> Option<&MedicineRecord> {
        self.entries
            .iter()
            .find(|entry| entry.lookup_key == key)
            .map(|entry| &entry.record)
    }

    /// First record whose lookup key contains `key`
    ///
    /// `key` is expected to be normalized already.
    pub fn find_containing(&self, key: &str) -> Option<&MedicineRecord> {
        self.entries
            .iter()
            .find(|entry| entry.lookup_key.contains(key))
            .map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records in file order
    pub fn iter(&self) -> impl Iterator<Item = &MedicineRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }
}

fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}
