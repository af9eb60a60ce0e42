//! Sequential batch extraction over a class catalog.
//!
//! One in-flight request at a time with a mandatory pause after every
//! attempt, per the reference site's rate expectations. A failed class is
//! logged and dropped; re-running the batch is the recovery mechanism.

use std::time::Duration;

use tracing::{info, instrument, warn};

use docgrounder_shared::{CatalogEntry, DocRecord};

use crate::javadoc::Extractor;

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Callback interface for batch progress (CLI renders a progress bar).
pub trait ProgressObserver: Send + Sync {
    /// Called before each class is fetched.
    fn class_started(&self, entry: &CatalogEntry, current: usize, total: usize);

    /// Called after each attempt, with the outcome.
    fn class_finished(&self, entry: &CatalogEntry, ok: bool);
}

/// Observer that reports nothing (library callers, tests).
pub struct SilentObserver;

impl ProgressObserver for SilentObserver {
    fn class_started(&self, _entry: &CatalogEntry, _current: usize, _total: usize) {}
    fn class_finished(&self, _entry: &CatalogEntry, _ok: bool) {}
}

// ---------------------------------------------------------------------------
// CollectResult
// ---------------------------------------------------------------------------

/// Summary of a completed batch run.
#[derive(Debug)]
pub struct CollectResult {
    /// Extracted records, in catalog order minus omissions.
    pub records: Vec<DocRecord>,
    /// Number of classes skipped due to extraction failure.
    pub skipped: usize,
    /// Failures encountered (class name, reason).
    pub errors: Vec<(String, String)>,
    /// Total duration of the run.
    pub duration: Duration,
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Drives the extractor over a catalog, strictly sequentially.
pub struct Collector {
    extractor: Extractor,
    pause: Duration,
}

impl Collector {
    /// Create a collector with the given extractor and inter-request pause.
    pub fn new(extractor: Extractor, pause: Duration) -> Self {
        Self { extractor, pause }
    }

    /// Extract every catalog entry in order.
    ///
    /// Never fails as a whole: per-class errors are recorded in the result
    /// and the corresponding class is omitted from `records`.
    #[instrument(skip_all, fields(classes = catalog.len()))]
    pub async fn extract_all(
        &self,
        catalog: &[CatalogEntry],
        observer: &dyn ProgressObserver,
    ) -> CollectResult {
        let start_time = std::time::Instant::now();
        let total = catalog.len();

        let mut records = Vec::with_capacity(total);
        let mut errors = Vec::new();

        info!(total, pause_ms = self.pause.as_millis() as u64, "starting batch extraction");

        for (index, entry) in catalog.iter().enumerate() {
            observer.class_started(entry, index + 1, total);

            match self.extractor.extract_one(&entry.package, &entry.name).await {
                Ok(record) => {
                    observer.class_finished(entry, true);
                    records.push(record);
                }
                Err(e) => {
                    warn!(
                        package = %entry.package,
                        class = %entry.name,
                        error = %e,
                        "extraction failed, skipping class"
                    );
                    observer.class_finished(entry, false);
                    errors.push((entry.name.clone(), e.to_string()));
                }
            }

            // Pace the reference site after every attempt, success or not.
            if !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }

        let result = CollectResult {
            skipped: errors.len(),
            records,
            errors,
            duration: start_time.elapsed(),
        };

        info!(
            extracted = result.records.len(),
            skipped = result.skipped,
            duration_ms = result.duration.as_millis() as u64,
            "batch extraction completed"
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docgrounder_shared::ExtractConfig;

    const PAGE: &str = r#"<html><body>
        <div class="block">A class description that is comfortably longer than the threshold.</div>
    </body></html>"#;

    fn collector_for(server_uri: String) -> Collector {
        let extractor = Extractor::new(&ExtractConfig {
            base_url: server_uri,
            timeout_secs: 5,
            pause_ms: 0,
        })
        .unwrap();
        Collector::new(extractor, Duration::ZERO)
    }

    #[tokio::test]
    async fn batch_preserves_catalog_order() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let catalog = vec![
            CatalogEntry::new("java.util", "HashMap"),
            CatalogEntry::new("java.lang", "String"),
            CatalogEntry::new("java.io", "File"),
        ];

        let collector = collector_for(server.uri());
        let result = collector.extract_all(&catalog, &SilentObserver).await;

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.skipped, 0);
        let names: Vec<_> = result.records.iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(names, vec!["HashMap", "String", "File"]);
    }

    #[tokio::test]
    async fn failed_classes_are_skipped_not_fatal() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/java.base/java/util/HashMap.html"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/java.base/java/lang/Missing.html"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/java.base/java/io/File.html"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let catalog = vec![
            CatalogEntry::new("java.util", "HashMap"),
            CatalogEntry::new("java.lang", "Missing"),
            CatalogEntry::new("java.io", "File"),
        ];

        let collector = collector_for(server.uri());
        let result = collector.extract_all(&catalog, &SilentObserver).await;

        // Order preserved minus the omission.
        let names: Vec<_> = result.records.iter().map(|r| r.class_name.as_str()).collect();
        assert_eq!(names, vec!["HashMap", "File"]);

        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].0, "Missing");
        assert!(result.errors[0].1.contains("404"));
    }

    #[tokio::test]
    async fn pause_applies_after_every_attempt() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let extractor = Extractor::new(&ExtractConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            pause_ms: 0,
        })
        .unwrap();
        let collector = Collector::new(extractor, Duration::from_millis(50));

        let catalog = vec![
            CatalogEntry::new("java.lang", "A"),
            CatalogEntry::new("java.lang", "B"),
        ];

        let start = std::time::Instant::now();
        let result = collector.extract_all(&catalog, &SilentObserver).await;

        // Two attempts, both failing, both paced.
        assert_eq!(result.skipped, 2);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }
}
