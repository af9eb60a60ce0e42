//! Core domain types for the documentation corpus.
//!
//! These structs define the persisted corpus format: a JSON array of
//! [`DocRecord`] objects with camelCase field names and `scrapedAt` as an
//! ISO-8601 timestamp. Records are immutable after extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter
// ---------------------------------------------------------------------------

/// One formal parameter of a method or constructor.
///
/// The extractor currently leaves parameter lists empty; the type exists so
/// the persisted format is stable when parameter extraction lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub param_type: String,
    /// Javadoc `@param` description, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Member
// ---------------------------------------------------------------------------

/// A method or constructor entry from a class summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Member name, without the parenthesized parameter list.
    pub name: String,
    /// Raw textual declaration as it appears on the page, or a synthesized
    /// `returnType name()` when the page yields no signature text.
    pub signature: String,
    /// Summary description, truncated to [`MAX_DESCRIPTION_CHARS`].
    pub description: String,
    /// Formal parameters in declaration order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Declared return type; empty for constructors.
    pub return_type: String,
    /// Modifier keywords found in the declaration text.
    #[serde(default)]
    pub modifiers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A field entry from a class summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Summary description, truncated to [`MAX_DESCRIPTION_CHARS`].
    pub description: String,
    /// Modifier keywords found in the type/declaration text.
    #[serde(default)]
    pub modifiers: Vec<String>,
}

// ---------------------------------------------------------------------------
// DocRecord
// ---------------------------------------------------------------------------

/// Maximum characters kept from a member or field description.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// Maximum code example snippets kept per record.
pub const MAX_EXAMPLES: usize = 5;

/// One extracted class reference page — the unit of the corpus.
///
/// `class_name` + `package_name` conceptually identify a record; duplicates
/// within a corpus are tolerated, never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRecord {
    /// Simple class name, e.g. `ArrayList`.
    pub class_name: String,
    /// Package name, e.g. `java.util`.
    pub package_name: String,
    /// Class-level description, or `"No description available"`.
    pub description: String,
    /// Method summary entries in page order.
    #[serde(default)]
    pub methods: Vec<Member>,
    /// Constructor summary entries in page order.
    #[serde(default)]
    pub constructors: Vec<Member>,
    /// Field summary entries in page order.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Code snippets found on the page, capped at [`MAX_EXAMPLES`].
    #[serde(default)]
    pub examples: Vec<String>,
    /// Canonical reference-site URL the record was extracted from.
    pub official_url: String,
    /// When the page was fetched.
    pub scraped_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

/// One class to extract: a `{package, name}` pair from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Package name, e.g. `java.util`.
    pub package: String,
    /// Simple class name, e.g. `ArrayList`.
    pub name: String,
}

impl CatalogEntry {
    /// Convenience constructor for catalog literals.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Truncate a string to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
