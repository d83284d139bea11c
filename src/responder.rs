//! # Responder Module
//!
//! Maps a raw user query to the reply text. This is the only piece of reply logic
//! in the crate; both the polling and the webhook transport call into it.
//!
//! ## Matching
//!
//! 1. The query is trimmed and lower-cased.
//! 2. The first record (file order) whose lookup key equals the query wins.
//! 3. Otherwise the first record whose lookup key contains the query wins.
//! 4. Otherwise the fixed not-found message is returned.
//!
//! Replies use Telegram HTML markup. Field values are escaped, and absent fields
//! are rendered as [`PLACEHOLDER`] so the reply always has the same shape.

use std::sync::Arc;
use teloxide::utils::html;

use crate::dataset::{normalize, Dataset, MedicineRecord};
use crate::localization::{t, t_args};

/// Text shown for fields missing from a record
pub const PLACEHOLDER: &str = "-";

/// Outcome of matching a query against the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The query was empty or whitespace only
    EmptyQuery,
    /// A record name equals the query
    Exact(&'a MedicineRecord),
    /// A record name contains the query
    Partial(&'a MedicineRecord),
    NotFound,
}

/// Stateless lookup-and-format service over a shared, read-only dataset
#[derive(Debug, Clone)]
pub struct Responder {
    dataset: Arc<Dataset>,
}

impl Responder {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Match a query against the dataset without formatting the result
    pub fn lookup(&self, query: &str) -> Lookup<'_> {
        let key = normalize(query);
        if key.is_empty() {
            return Lookup::EmptyQuery;
        }

        if let Some(record) = self.dataset.find_exact(&key) {
            return Lookup::Exact(record);
        }

        match self.dataset.find_containing(&key) {
            Some(record) => Lookup::Partial(record),
            None => Lookup::NotFound,
        }
    }

    /// Produce the reply for a raw user query
    ///
    /// Never fails: empty input yields a prompt, unknown names yield the
    /// not-found message. The reply is Telegram HTML, so field values appear
    /// escaped (`&` becomes `&amp;`, `<` becomes `&lt;`).
    pub fn respond(&self, query: &str) -> String {
        match self.lookup(query) {
            Lookup::EmptyQuery => t("empty-query"),
            Lookup::Exact(record) | Lookup::Partial(record) => format_record(record),
            Lookup::NotFound => t("medicine-not-found"),
        }
    }
}

/// Render a record as an HTML-formatted information card
pub fn format_record(record: &MedicineRecord) -> String {
    let name = field_or_placeholder(Some(record.name.as_str()));
    let class = field_or_placeholder(record.class.as_deref());
    let indication = field_or_placeholder(record.indication.as_deref());
    let dosage = field_or_placeholder(record.dosage.as_deref());
    let caution = field_or_placeholder(record.caution.as_deref());
    let advice = field_or_placeholder(record.advice.as_deref());

    t_args(
        "medicine-card",
        &[
            ("name", name.as_str()),
            ("class", class.as_str()),
            ("indication", indication.as_str()),
            ("dosage", dosage.as_str()),
            ("caution", caution.as_str()),
            ("advice", advice.as_str()),
        ],
    )
}

fn field_or_placeholder(value: Option<&str>) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => html::escape(v),
        None => PLACEHOLDER.to_string(),
    }
}
