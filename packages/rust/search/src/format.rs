//! Rendering ranked results into a prompt-ready context block.
//!
//! The output is a plain string with no structural delimiters beyond
//! newlines; the downstream consumer splices it directly into an
//! instruction string, it is never machine-parsed.

use std::fmt::Write;

use docgrounder_shared::types::truncate_chars;

use crate::score::SearchResult;

/// Returned verbatim when no results matched.
pub const NO_RESULTS: &str = "No relevant documentation found in local cache.";

/// Characters kept from each class description.
const DESCRIPTION_EXCERPT_CHARS: usize = 200;

/// Characters kept from each matched-method description.
const METHOD_EXCERPT_CHARS: usize = 100;

/// Matched methods rendered per result.
const MAX_FORMATTED_METHODS: usize = 3;

/// Render ranked results into a compact context block.
pub fn format_results(results: &[SearchResult<'_>]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut context = String::from("Relevant Java Documentation:\n\n");

    for (index, result) in results.iter().enumerate() {
        let doc = result.doc;

        let _ = writeln!(context, "{}. {} ({})", index + 1, doc.class_name, doc.package_name);
        let _ = writeln!(
            context,
            "  {}...",
            truncate_chars(&doc.description, DESCRIPTION_EXCERPT_CHARS)
        );

        if !result.matched_methods.is_empty() {
            context.push_str("  Relevant Methods:\n");
            for method in result.matched_methods.iter().take(MAX_FORMATTED_METHODS) {
                let _ = writeln!(
                    context,
                    "  - {}(): {}",
                    method.name,
                    truncate_chars(&method.description, METHOD_EXCERPT_CHARS)
                );
            }
        }

        let _ = writeln!(context, "  Official docs: {}", doc.official_url);
        context.push('\n');
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use chrono::Utc;
    use docgrounder_shared::{DocRecord, Member};

    fn arraylist_corpus() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.load(vec![DocRecord {
            class_name: "ArrayList".into(),
            package_name: "java.util".into(),
            description: "Resizable-array implementation of the List interface. ".repeat(8),
            methods: (0..4)
                .map(|i| Member {
                    name: format!("add{i}"),
                    signature: format!("void add{i}()"),
                    description: "Appends an element. ".repeat(12),
                    parameters: vec![],
                    return_type: "void".into(),
                    modifiers: vec![],
                })
                .collect(),
            constructors: vec![],
            fields: vec![],
            examples: vec![],
            official_url: "https://docs.example.com/ArrayList.html".into(),
            scraped_at: Utc::now(),
        }]);
        corpus
    }

    #[test]
    fn empty_results_yield_sentinel() {
        assert_eq!(format_results(&[]), NO_RESULTS);
    }

    #[test]
    fn block_layout_per_result() {
        let corpus = arraylist_corpus();
        let results = corpus.search("add", 3);
        let block = format_results(&results);

        assert!(block.starts_with("Relevant Java Documentation:\n\n"));
        assert!(block.contains("1. ArrayList (java.util)"));
        assert!(block.contains("Relevant Methods:"));
        assert!(block.contains("Official docs: https://docs.example.com/ArrayList.html"));
        assert!(block.ends_with("\n\n"));
    }

    #[test]
    fn excerpts_are_truncated() {
        let corpus = arraylist_corpus();
        let results = corpus.search("add", 3);
        let block = format_results(&results);

        // Description line: two-space indent + 200 chars + marker.
        let desc_line = block
            .lines()
            .find(|line| line.trim_start().starts_with("Resizable"))
            .unwrap();
        assert_eq!(desc_line.trim_start().chars().count(), DESCRIPTION_EXCERPT_CHARS + 3);
        assert!(desc_line.ends_with("..."));

        // Method lines carry at most a 100-char excerpt.
        let method_line = block.lines().find(|line| line.contains("- add0():")).unwrap();
        let excerpt = method_line.split("(): ").nth(1).unwrap();
        assert_eq!(excerpt.chars().count(), METHOD_EXCERPT_CHARS);
    }

    #[test]
    fn at_most_three_methods_rendered() {
        let corpus = arraylist_corpus();
        let results = corpus.search("add", 3);
        assert_eq!(results[0].matched_methods.len(), 4);

        let block = format_results(&results);
        let rendered = block.lines().filter(|line| line.trim_start().starts_with("- add")).count();
        assert_eq!(rendered, MAX_FORMATTED_METHODS);
    }

    #[test]
    fn results_are_numbered_in_rank_order() {
        let mut corpus = Corpus::new();
        corpus.load(vec![
            DocRecord {
                class_name: "HashMap".into(),
                package_name: "java.util".into(),
                description: "Hash table based implementation of the Map interface.".into(),
                methods: vec![],
                constructors: vec![],
                fields: vec![],
                examples: vec![],
                official_url: "https://docs.example.com/HashMap.html".into(),
                scraped_at: Utc::now(),
            },
            DocRecord {
                class_name: "HashSet".into(),
                package_name: "java.util".into(),
                description: "A set that contains no duplicate elements.".into(),
                methods: vec![],
                constructors: vec![],
                fields: vec![],
                examples: vec![],
                official_url: "https://docs.example.com/HashSet.html".into(),
                scraped_at: Utc::now(),
            },
        ]);

        // Both class names contain "hash"; HashMap's description mention
        // pushes it above HashSet.
        let results = corpus.search("hash", 3);
        let block = format_results(&results);

        let first = block.find("1. HashMap").expect("higher score first");
        let second = block.find("2. HashSet").expect("lower score second");
        assert!(first < second);
    }
}
