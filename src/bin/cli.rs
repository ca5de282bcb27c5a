//! Harvester CLI
//!
//! Local execution entry point.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use harvester::{
    error::{AppError, Result},
    models::{Config, RawHit, Resource, Source},
    pipeline::{self, Aggregator, CatalogStats},
    services,
    storage::{CatalogStorage, ExportOptions, LocalStorage},
    utils::{http, report},
};

/// Harvester - Learning Resource Collector
#[derive(Parser, Debug)]
#[command(
    name = "harvester",
    version,
    about = "Collects, classifies and scores learning resources"
)]
struct Cli {
    /// Path to storage directory containing config.toml
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the console report
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search all providers and export a fresh catalog
    Search {
        /// Extra keywords queried on every provider
        #[arg(short, long, num_args = 1..)]
        keywords: Vec<String>,

        /// Skip GitHub repository search
        #[arg(long)]
        no_github: bool,

        /// Skip DuckDuckGo web search
        #[arg(long)]
        no_duckduckgo: bool,
    },

    /// Show statistics of an exported catalog
    Stats {
        /// Catalog file stem (default: output.file_stem)
        #[arg(long)]
        file: Option<String>,
    },

    /// Classify and score a single URL
    Classify {
        #[arg(long)]
        url: String,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging from the verbosity flag or the configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_stats(resources: &[Resource], top_n: usize) {
    let stats = CatalogStats::from_resources(resources);

    let mut items = vec![
        ("Total", stats.total.to_string()),
        ("Average score", format!("{:.2}", stats.average_score)),
        ("Score range", format!("{}-{}", stats.min_score, stats.max_score)),
        ("High quality (4+)", stats.high_quality.to_string()),
    ];
    for (category, count) in &stats.by_category {
        items.push((category.id(), count.to_string()));
    }
    report::summary("Catalog", &items);

    let languages: Vec<(&str, String)> = stats
        .by_language
        .iter()
        .map(|(language, count)| (language.as_str(), count.to_string()))
        .collect();
    if !languages.is_empty() {
        report::summary("Languages", &languages);
    }

    let sources: Vec<(&str, String)> = stats
        .by_source
        .iter()
        .map(|(source, count)| (source.as_str(), count.to_string()))
        .collect();
    if !sources.is_empty() {
        report::summary("Sources", &sources);
    }

    let top = pipeline::top_resources(resources, top_n);
    if !top.is_empty() {
        report::separator();
        report::line(&format!("Top {} resources", top.len()));
        for (rank, resource) in top.iter().enumerate() {
            report::sub_item(&format!(
                "{}. [{}] {} ({})",
                rank + 1,
                resource.quality_score,
                resource.title,
                resource.category
            ));
            report::sub_item(&format!("   {}", resource.url));
        }
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.storage_dir.join("config.toml");
    let loaded = Config::load(&config_path);

    // The log level may come from the config, so logging starts after the read.
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);
    report::set_quiet(cli.quiet);

    let mut config = match loaded {
        Ok(config) => {
            log::info!("Loaded configuration from {}", config_path.display());
            config
        }
        Err(e) => {
            log::warn!(
                "Config load failed from {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            Config::default()
        }
    };

    let storage = LocalStorage::new(cli.storage_dir.join(&config.output.dir));

    match cli.command {
        Command::Search {
            keywords,
            no_github,
            no_duckduckgo,
        } => {
            config.search.github &= !no_github;
            config.search.duckduckgo &= !no_duckduckgo;
            config.validate()?;

            report::header("Harvester search");
            let client = http::create_async_client(&config.search)?;
            let plans = services::default_plans(&config.search, &client, &keywords);
            if plans.is_empty() {
                return Err(AppError::config("No search provider is enabled"));
            }

            let result = pipeline::run_search(&config, &storage, &plans, Utc::now()).await?;

            report::separator();
            report::summary(
                "Run",
                &[
                    ("Queries", result.query_total.to_string()),
                    ("Failed queries", result.query_failures.to_string()),
                    ("Raw hits", result.hit_count.to_string()),
                    ("Exported", result.write.exported_count.to_string()),
                    ("Below filters", result.write.filtered_out.to_string()),
                    ("Exported at", result.write.timestamp.to_rfc3339()),
                ],
            );

            // Report on what was written, not the unfiltered engine output.
            let exported: Vec<Resource> = ExportOptions::from_config(&config)
                .select(&result.catalog)
                .into_iter()
                .cloned()
                .collect();
            print_stats(&exported, config.output.top_n);
        }

        Command::Stats { file } => {
            let stem = file.unwrap_or_else(|| config.output.file_stem.clone());
            match storage.load_catalog(&stem).await? {
                Some(catalog) => {
                    report::header(&format!("Catalog {stem}"));
                    report::line(&format!("Generated at {}", catalog.generated_at));
                    print_stats(&catalog.resources, config.output.top_n);
                }
                None => {
                    log::warn!(
                        "No catalog '{}' in {}. Run 'search' first.",
                        stem,
                        storage.root_dir().display()
                    );
                }
            }
        }

        Command::Classify {
            url,
            title,
            description,
        } => {
            let aggregator = Aggregator::from_config(&config, Utc::now())?;
            let hit = RawHit::new(Source::DuckDuckGo, title, url, description, "");
            let catalog = aggregator.aggregate(std::slice::from_ref(&hit));

            match catalog.resources.first() {
                Some(resource) => report::summary(
                    "Classification",
                    &[
                        ("URL", resource.url.clone()),
                        ("Category", resource.category.to_string()),
                        ("Score", resource.quality_score.to_string()),
                        ("Language", resource.language.to_string()),
                        ("Recommendation", resource.recommendation.clone()),
                        ("Fingerprint", resource.dedup_key.clone()),
                    ],
                ),
                None => log::warn!("Nothing to classify: the URL is empty"),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            pipeline::Classifier::from_config(&config.classifier)?;
            log::debug!("Effective configuration:\n{}", config.to_toml()?);
            report::success(&format!(
                "Config OK ({} keywords, {} classifier rules)",
                config.search.all_keywords().len(),
                config.classifier.rules.len()
            ));
        }
    }

    Ok(())
}
