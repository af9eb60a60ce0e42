//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use docgrounder_extract::{CollectResult, Collector, Extractor, ProgressObserver};
use docgrounder_search::{Corpus, format_results, save_file};
use docgrounder_shared::{AppConfig, CatalogEntry, config_file_path, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docgrounder — cache reference documentation locally, retrieve it for AI grounding.
#[derive(Parser)]
#[command(
    name = "docgrounder",
    version,
    about = "Extract Java reference documentation into a local corpus and query it.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract the configured class catalog and write the corpus file.
    Scrape {
        /// Output path for the corpus JSON (defaults to the configured path).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Query the corpus and print ranked, prompt-ready context.
    Search {
        /// Free-text query.
        query: String,

        /// Maximum results to return.
        #[arg(short, long, default_value = "3")]
        max_results: usize,

        /// Corpus file to load (defaults to the configured path).
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// List all class names in the corpus.
    Classes {
        /// Corpus file to load (defaults to the configured path).
        #[arg(long)]
        corpus: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docgrounder=info",
        1 => "docgrounder=debug",
        _ => "docgrounder=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scrape { out } => cmd_scrape(out).await,
        Command::Search {
            query,
            max_results,
            corpus,
        } => cmd_search(&query, max_results, corpus),
        Command::Classes { corpus } => cmd_classes(corpus),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

async fn cmd_scrape(out: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;

    // Catch broken base URLs before spending a minute per class on them.
    Url::parse(&config.extract.base_url)
        .map_err(|e| eyre!("invalid base_url '{}': {e}", config.extract.base_url))?;

    let out_path = out.unwrap_or_else(|| PathBuf::from(&config.corpus.path));
    let catalog = config.catalog.clone();

    info!(
        classes = catalog.len(),
        base_url = %config.extract.base_url,
        out = %out_path.display(),
        "starting scrape"
    );

    let extractor = Extractor::new(&config.extract)?;
    let collector = Collector::new(
        extractor,
        std::time::Duration::from_millis(config.extract.pause_ms),
    );

    let progress = ScrapeProgress::new(catalog.len());
    let result = collector.extract_all(&catalog, &progress).await;
    progress.finish();

    save_file(&out_path, &result.records)?;

    print_scrape_summary(&result, &out_path);
    Ok(())
}

fn print_scrape_summary(result: &CollectResult, out_path: &std::path::Path) {
    let methods_total: usize = result.records.iter().map(|r| r.methods.len()).sum();

    println!();
    println!("  Corpus written!");
    println!("  Classes:  {}", result.records.len());
    println!("  Methods:  {methods_total}");
    println!("  Skipped:  {}", result.skipped);
    println!("  Path:     {}", out_path.display());
    println!("  Time:     {:.1}s", result.duration.as_secs_f64());
    println!();

    for (class, reason) in &result.errors {
        println!("  skipped {class}: {reason}");
    }
}

/// Scrape progress bar over the catalog.
struct ScrapeProgress {
    bar: ProgressBar,
}

impl ScrapeProgress {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:30.cyan} {pos}/{len} {msg}").unwrap(),
        );
        Self { bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ScrapeProgress {
    fn class_started(&self, entry: &CatalogEntry, _current: usize, _total: usize) {
        self.bar.set_message(format!("{}.{}", entry.package, entry.name));
    }

    fn class_finished(&self, _entry: &CatalogEntry, _ok: bool) {
        self.bar.inc(1);
    }
}

// ---------------------------------------------------------------------------
// Search / classes
// ---------------------------------------------------------------------------

fn load_corpus(corpus_override: Option<PathBuf>) -> Result<Corpus> {
    let config = load_config()?;
    let path = corpus_override.unwrap_or_else(|| PathBuf::from(&config.corpus.path));
    Ok(Corpus::load_file(&path))
}

fn cmd_search(query: &str, max_results: usize, corpus_override: Option<PathBuf>) -> Result<()> {
    let corpus = load_corpus(corpus_override)?;
    info!(classes = corpus.len(), query, "searching corpus");

    let results = corpus.search(query, max_results);

    for (index, result) in results.iter().enumerate() {
        println!(
            "{}. {} — score {} ({})",
            index + 1,
            result.doc.class_name,
            result.relevance_score,
            result.match_reason
        );
    }

    println!();
    println!("{}", format_results(&results));
    Ok(())
}

fn cmd_classes(corpus_override: Option<PathBuf>) -> Result<()> {
    let corpus = load_corpus(corpus_override)?;

    for name in corpus.class_names() {
        println!("{name}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let path = config_file_path()?;

    println!("# resolved config ({})", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
