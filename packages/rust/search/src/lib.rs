//! Lexical retrieval over the extracted documentation corpus.
//!
//! Loads the persisted corpus once, scores records against free-text queries
//! with a deterministic keyword-overlap ranker, and renders the top matches
//! into a compact context block for prompt injection. No I/O happens on the
//! query path; concurrent searches over a shared [`Corpus`] are safe.

pub mod corpus;
pub mod format;
pub mod score;

pub use corpus::{Corpus, save_file};
pub use format::format_results;
pub use score::SearchResult;
