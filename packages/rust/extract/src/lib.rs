//! Documentation extraction pipeline for docgrounder.
//!
//! Fetches one reference page per cataloged class, converts the
//! semi-structured Javadoc HTML into [`docgrounder_shared::DocRecord`]
//! instances via ordered structural-selector fallbacks, and drives the whole
//! catalog sequentially with per-class failure isolation.

pub mod collector;
pub mod javadoc;
pub mod rules;

pub use collector::{CollectResult, Collector, ProgressObserver, SilentObserver};
pub use javadoc::{ExtractError, Extractor};
