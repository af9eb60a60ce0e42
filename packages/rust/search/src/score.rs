//! Deterministic keyword-overlap relevance scoring.
//!
//! Scores accumulate additively across rules; the first rule to fire sets
//! the match reason and later rules never overwrite it. A record scoring
//! zero is excluded. The query path performs no I/O and allocates fresh
//! result structures per call, so concurrent searches are safe.

use docgrounder_shared::{DocRecord, Member};

use crate::corpus::Corpus;

/// Maximum matched methods carried per result.
pub const MAX_MATCHED_METHODS: usize = 5;

/// Common English function words plus domain filler terms; tokens in this
/// set never count as keywords.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can", "what", "how",
    "why", "when", "where", "which", "who", "whom", "this", "that", "these", "those", "i",
    "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "java", "use", "using", "example",
];

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// One ranked match, borrowing from the corpus. Created per query,
/// discarded after formatting.
#[derive(Debug)]
pub struct SearchResult<'a> {
    /// The matched record.
    pub doc: &'a DocRecord,
    /// Accumulated relevance score.
    pub relevance_score: u32,
    /// Methods that contributed to the score, insertion order, ≤ 5.
    pub matched_methods: Vec<&'a Member>,
    /// Explanation set by the first scoring rule that fired.
    pub match_reason: String,
}

// ---------------------------------------------------------------------------
// Query processing
// ---------------------------------------------------------------------------

/// Derive the keyword set from a raw query: lowercase, strip punctuation,
/// drop short tokens and stop words, dedupe preserving first occurrence.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c.is_whitespace() { c } else { ' ' })
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for word in cleaned.split_whitespace() {
        if word.len() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

impl Corpus {
    /// Rank the corpus against a query.
    ///
    /// Results are ordered by descending score; ties keep corpus load order
    /// (stable sort). At most `max_results` entries are returned, so
    /// `search(q, 0)` is always empty.
    pub fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult<'_>> {
        let lower_query = query.to_lowercase();
        let keywords = extract_keywords(&lower_query);

        let mut results: Vec<SearchResult<'_>> = self
            .all()
            .iter()
            .map(|doc| score_record(doc, &keywords, &lower_query))
            .filter(|result| result.relevance_score > 0)
            .collect();

        results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
        results.truncate(max_results);
        results
    }
}

/// Apply every scoring rule to one record.
fn score_record<'a>(doc: &'a DocRecord, keywords: &[String], full_query: &str) -> SearchResult<'a> {
    let mut score: u32 = 0;
    let mut reason = String::new();
    let mut matched: Vec<&'a Member> = Vec::new();

    let class_name = doc.class_name.to_lowercase();
    let description = doc.description.to_lowercase();
    let package_name = doc.package_name.to_lowercase();

    // Exact class-name match dominates everything else.
    if keywords.iter().any(|keyword| class_name == *keyword) {
        score += 100;
        reason = format!("Exact match: {}", doc.class_name);
    }

    for keyword in keywords {
        if class_name.contains(keyword) {
            score += 50;
            if reason.is_empty() {
                reason = format!("Class name contains: {keyword}");
            }
        }
    }

    for keyword in keywords {
        if description.contains(keyword) {
            score += 10;
            if reason.is_empty() {
                reason = format!("Description mentions: {keyword}");
            }
        }
    }

    for keyword in keywords {
        if package_name.contains(keyword) {
            score += 5;
        }
    }

    for method in &doc.methods {
        let method_name = method.name.to_lowercase();
        for keyword in keywords {
            if method_name.contains(keyword) {
                score += 20;
                matched.push(method);
                if reason.is_empty() {
                    reason = format!("Method: {}", method.name);
                }
            }
        }
    }

    // Whole-query containment in a method description; fires even when the
    // keyword set came out empty.
    if !full_query.is_empty() {
        for method in &doc.methods {
            if method.description.to_lowercase().contains(full_query) {
                score += 15;
                if !matched.iter().any(|m| std::ptr::eq(*m, method)) {
                    matched.push(method);
                }
            }
        }
    }

    matched.truncate(MAX_MATCHED_METHODS);

    SearchResult {
        doc,
        relevance_score: score,
        matched_methods: matched,
        match_reason: if reason.is_empty() {
            "General match".to_string()
        } else {
            reason
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
