//! Ordered structural-selector fallback rules.
//!
//! Reference-site markup varies across Javadoc versions and sections. Each
//! semantic section is located by an ordered list of selector candidates,
//! tried in priority order until one yields non-trivial content; a change in
//! page structure degrades to shorter or absent fields instead of failing.

use scraper::{ElementRef, Html, Selector};

/// Evaluate selector candidates in order; accept the first whose trimmed
/// text exceeds `min_len` characters.
pub fn first_matching_text(doc: &Html, candidates: &[&str], min_len: usize) -> Option<String> {
    for candidate in candidates {
        let selector = Selector::parse(candidate).unwrap();
        if let Some(el) = doc.select(&selector).next() {
            let text = collect_text(el);
            if text.len() > min_len {
                return Some(text);
            }
        }
    }
    None
}

/// Collect and trim the full text content of an element.
pub fn collect_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text of the first `code` descendant, falling back to the whole element.
pub fn code_text(el: ElementRef) -> String {
    let code_sel = Selector::parse("code").unwrap();
    match el.select(&code_sel).next() {
        Some(code) => {
            let text = collect_text(code);
            if text.is_empty() { collect_text(el) } else { text }
        }
        None => collect_text(el),
    }
}

/// Whether an element carries the given class.
pub fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Nearest preceding sibling element carrying the given class.
pub fn prev_with_class<'a>(el: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    el.prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| has_class(*sib, class))
}

/// Nearest following sibling element carrying the given class.
pub fn next_with_class<'a>(el: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| has_class(*sib, class))
}
