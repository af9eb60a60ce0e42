//! Javadoc reference-page extractor.
//!
//! Builds the canonical page URL for a class, fetches it with a bounded
//! timeout, and converts the HTML into a [`DocRecord`]. Every section is
//! located independently through ordered selector fallbacks, so a missing or
//! restructured section degrades to an empty/default value instead of
//! failing the class.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use docgrounder_shared::types::{MAX_DESCRIPTION_CHARS, MAX_EXAMPLES, truncate_chars};
use docgrounder_shared::{DocGrounderError, DocRecord, ExtractConfig, Field, Member, Result};

use crate::rules::{
    code_text, collect_text, first_matching_text, has_class, next_with_class, prev_with_class,
};

/// User-Agent string for extraction requests.
const USER_AGENT: &str = concat!("docgrounder/", env!("CARGO_PKG_VERSION"));

/// Minimum trimmed text length for a selector candidate to be accepted.
const MIN_TEXT_LEN: usize = 20;

/// Fallback class description when no candidate matches.
const DEFAULT_DESCRIPTION: &str = "No description available";

/// Selector candidates for the class description, in priority order.
const DESCRIPTION_SELECTORS: &[&str] = &[
    "section.class-description div.block",
    "div.type-signature + div.block",
    "div.block",
    ".description .block",
    "section.description div",
];

/// Modifier keywords scanned from raw declaration text.
const MODIFIER_KEYWORDS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "final",
    "abstract",
    "synchronized",
];

/// Substrings that mark a code block as a Java example.
const EXAMPLE_MARKERS: &[&str] = &["class", "public", "import", "new "];

// ---------------------------------------------------------------------------
// ExtractError
// ---------------------------------------------------------------------------

/// Typed per-class failure reason. The collector decides whether to
/// log-and-skip; extraction never panics or propagates further.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The fetch exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The reference site answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Fetches and parses one reference page per class.
pub struct Extractor {
    client: Client,
    base_url: String,
}

impl Extractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocGrounderError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Canonical documentation-page address for a class.
    pub fn page_url(&self, package: &str, class_name: &str) -> String {
        let package_path = package.replace('.', "/");
        format!("{}/java.base/{package_path}/{class_name}.html", self.base_url)
    }

    /// Fetch and extract one class.
    ///
    /// Soft-fails with a typed [`ExtractError`]; partial pages still yield a
    /// record with whatever sections were found.
    #[instrument(skip(self), fields(package = %package, class = %class_name))]
    pub async fn extract_one(
        &self,
        package: &str,
        class_name: &str,
    ) -> std::result::Result<DocRecord, ExtractError> {
        let url = self.page_url(package, class_name);
        debug!(%url, "fetching reference page");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ExtractError::Timeout
            } else {
                ExtractError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::Parse(format!("body read failed: {e}")))?;

        let record = parse_record(&body, package, class_name, &url);
        debug!(
            methods = record.methods.len(),
            constructors = record.constructors.len(),
            fields = record.fields.len(),
            examples = record.examples.len(),
            "page extracted"
        );

        Ok(record)
    }
}

// ---------------------------------------------------------------------------
// Page parsing
// ---------------------------------------------------------------------------

/// Convert a fetched page body into a record. Pure; never fails.
pub fn parse_record(html: &str, package: &str, class_name: &str, url: &str) -> DocRecord {
    let doc = Html::parse_document(html);

    DocRecord {
        class_name: class_name.to_string(),
        package_name: package.to_string(),
        description: extract_description(&doc),
        methods: extract_methods(&doc),
        constructors: extract_constructors(&doc),
        fields: extract_fields(&doc),
        examples: extract_examples(&doc),
        official_url: url.to_string(),
        scraped_at: Utc::now(),
    }
}

fn extract_description(doc: &Html) -> String {
    first_matching_text(doc, DESCRIPTION_SELECTORS, MIN_TEXT_LEN)
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())
}

fn extract_methods(doc: &Html) -> Vec<Member> {
    summary_rows(
        doc,
        "section.method-summary, #method-summary",
        ".summary-table, .three-column-summary",
        ".col-second",
    )
    .into_iter()
    .filter_map(member_from_row)
    .collect()
}

fn extract_constructors(doc: &Html) -> Vec<Member> {
    summary_rows(
        doc,
        "section.constructor-summary, #constructor-summary",
        ".summary-table, .two-column-summary",
        ".col-constructor-name",
    )
    .into_iter()
    .filter_map(constructor_from_row)
    .collect()
}

fn extract_fields(doc: &Html) -> Vec<Field> {
    summary_rows(
        doc,
        "section.field-summary, #field-summary",
        ".summary-table, .three-column-summary",
        ".col-second",
    )
    .into_iter()
    .filter_map(field_from_row)
    .collect()
}

fn extract_examples(doc: &Html) -> Vec<String> {
    let sel = Selector::parse("pre, code.language-java").unwrap();
    doc.select(&sel)
        .map(collect_text)
        .filter(|code| {
            code.len() > MIN_TEXT_LEN && EXAMPLE_MARKERS.iter().any(|m| code.contains(m))
        })
        .take(MAX_EXAMPLES)
        .collect()
}

/// Locate a named summary section, then its row-oriented table, and return
/// the data cells (header cells excluded).
fn summary_rows<'a>(
    doc: &'a Html,
    section_sel: &str,
    table_sel: &str,
    row_sel: &str,
) -> Vec<ElementRef<'a>> {
    let section = Selector::parse(section_sel).unwrap();
    let table = Selector::parse(table_sel).unwrap();
    let row = Selector::parse(row_sel).unwrap();

    let Some(section_el) = doc.select(&section).next() else {
        return Vec::new();
    };
    let Some(table_el) = section_el.select(&table).next() else {
        return Vec::new();
    };

    table_el
        .select(&row)
        .filter(|cell| !has_class(*cell, "table-header"))
        .collect()
}

/// Member name from the row's name link, with the trailing parameter list
/// stripped. Empty when the row has no usable link.
fn row_name(cell: ElementRef) -> String {
    let link_sel = Selector::parse("a.member-name-link").unwrap();
    let raw = cell.select(&link_sel).next().map(collect_text).unwrap_or_default();
    raw.split('(').next().unwrap_or("").trim().to_string()
}

/// Description from the row's trailing cell: prefer the `.block` summary,
/// fall back to the whole cell, truncated to the persisted maximum.
fn row_description(cell: ElementRef) -> String {
    let block_sel = Selector::parse(".block").unwrap();
    let text = next_with_class(cell, "col-last")
        .map(|desc_cell| {
            let block = desc_cell
                .select(&block_sel)
                .next()
                .map(collect_text)
                .unwrap_or_default();
            if block.is_empty() { collect_text(desc_cell) } else { block }
        })
        .unwrap_or_default();

    truncate_chars(&text, MAX_DESCRIPTION_CHARS).to_string()
}

fn member_from_row(cell: ElementRef) -> Option<Member> {
    let name = row_name(cell);
    if name.is_empty() {
        return None;
    }

    let type_cell = prev_with_class(cell, "col-first");
    let return_type = type_cell.map(code_text).unwrap_or_default();

    let signature = {
        let raw = code_text(cell);
        if raw.is_empty() { format!("{return_type} {name}()") } else { raw }
    };

    // Modifiers live in the "Modifier and Type" cell, e.g. "static void".
    let modifiers = scan_modifiers(&type_cell.map(collect_text).unwrap_or_default());

    Some(Member {
        name,
        signature,
        description: row_description(cell),
        parameters: Vec::new(),
        return_type,
        modifiers,
    })
}

fn constructor_from_row(cell: ElementRef) -> Option<Member> {
    let name = row_name(cell);
    if name.is_empty() {
        return None;
    }

    let signature = {
        let raw = code_text(cell);
        if raw.is_empty() { format!("{name}()") } else { raw }
    };

    Some(Member {
        name,
        signature,
        description: row_description(cell),
        parameters: Vec::new(),
        return_type: String::new(),
        modifiers: vec!["public".to_string()],
    })
}

fn field_from_row(cell: ElementRef) -> Option<Field> {
    let name = {
        let linked = row_name(cell);
        if linked.is_empty() { code_text(cell) } else { linked }
    };
    if name.is_empty() {
        return None;
    }

    let type_cell = prev_with_class(cell, "col-first");
    let field_type = type_cell.map(code_text).unwrap_or_default();
    let modifiers = scan_modifiers(&type_cell.map(collect_text).unwrap_or_default());

    Some(Field {
        name,
        field_type,
        description: row_description(cell),
        modifiers,
    })
}

/// Scan raw declaration text for the fixed modifier keyword set.
fn scan_modifiers(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    MODIFIER_KEYWORDS
        .iter()
        .filter(|keyword| lower.contains(**keyword))
        .map(ToString::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
