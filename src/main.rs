//! Handset-Harvest main entry point
//!
//! This is the command-line interface for the Handset-Harvest catalog extractor.

use anyhow::Context;
use clap::{Parser, Subcommand};
use handset_harvest::catalog::{
    fetch_device_header, fetch_device_specs, list_brands_at, list_devices, Brand, DeviceSummary,
};
use handset_harvest::config::{load_config_with_hash, validate, validate_jitter, Config, OutputFormat};
use handset_harvest::output::{
    brand_devices_csv_path, brands_csv_path, brands_json_path, devices_by_brand_path,
    write_json, write_json_file, CsvSink, DevicesByBrand,
};
use handset_harvest::url::brand_name_from_link;
use handset_harvest::{CatalogError, HttpFetcher};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Handset-Harvest: a phone catalog extractor
///
/// Lists the brands of the catalog, walks each brand's paginated device
/// listing, and extracts device header and specification sheets.
#[derive(Parser, Debug)]
#[command(name = "handset-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A phone catalog extractor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every brand of the catalog index and save it
    Brands {
        /// Output format (overrides the config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output directory (overrides the config file)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// List the devices of one brand, or of every brand, and save them
    Devices {
        /// Link to a brand's first listing page; every brand when omitted
        #[arg(long, value_name = "URL")]
        brand: Option<String>,

        /// Maximum random delay before each listing page after the first (ms)
        #[arg(long, value_name = "MS")]
        jitter_ms: Option<u64>,

        /// Output format (overrides the config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output directory (overrides the config file)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Print the header block of a device page as JSON
    Header {
        /// Device detail page
        url: String,
    },

    /// Print the full specification table of a device page as JSON
    Specs {
        /// Device detail page
        url: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    run(cli).map_err(|e| {
        tracing::error!("{:#}", e);
        e
    })
}

/// Dispatches the selected command
fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load(cli.config.as_deref())?;
    let fetcher = HttpFetcher::new(&config.fetcher).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Brands { format, out_dir } => {
            let format = format.unwrap_or(config.output.format);
            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.output.directory));
            handle_brands(&fetcher, &config, format, &dir)
        }
        Command::Devices {
            brand,
            jitter_ms,
            format,
            out_dir,
        } => {
            let format = format.unwrap_or(config.output.format);
            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.output.directory));
            let jitter = match jitter_ms {
                Some(ms) => {
                    validate_jitter(ms).context("Invalid --jitter-ms")?;
                    ms
                }
                None => config.crawler.jitter_max_ms,
            };
            handle_devices(&fetcher, &config, brand, jitter, format, &dir)
        }
        Command::Header { url } => {
            let header = fetch_device_header(&fetcher, &url)?;
            write_json(std::io::stdout().lock(), &header)?;
            Ok(())
        }
        Command::Specs { url } => {
            let specs = fetch_device_specs(&fetcher, &url)?;
            write_json(std::io::stdout().lock(), &specs)?;
            Ok(())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("handset_harvest=info,warn"),
            1 => EnvFilter::new("handset_harvest=debug,info"),
            2 => EnvFilter::new("handset_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file when given, otherwise the validated defaults
fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Passes records through and skips malformed ones
///
/// Entry-level layout problems are logged and skipped. Anything else aborts
/// the command, including a listing page that lost its content region.
fn keep<T>(result: Result<T, CatalogError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.is_entry_level() => {
            tracing::warn!("Skipping entry: {}", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Handles the `brands` command: lists the index and writes it out
fn handle_brands(
    fetcher: &HttpFetcher,
    config: &Config,
    format: OutputFormat,
    dir: &Path,
) -> anyhow::Result<()> {
    tracing::info!("Extracting phone brands from {}", config.fetcher.index_url);

    let mut csv = if format.wants_csv() {
        Some(CsvSink::<_, Brand>::create(&brands_csv_path(dir))?)
    } else {
        None
    };
    let mut collected = Vec::new();

    for result in list_brands_at(fetcher, &config.fetcher.index_url) {
        let Some(brand) = keep(result)? else { continue };
        if let Some(sink) = csv.as_mut() {
            sink.push(&brand)?;
        }
        if format.wants_json() {
            collected.push(brand);
        }
    }

    if let Some(sink) = csv {
        let rows = sink.finish()?;
        tracing::info!("Wrote {} brands to {}", rows, brands_csv_path(dir).display());
    }
    if format.wants_json() {
        write_json_file(&brands_json_path(dir), &collected)?;
        tracing::info!(
            "Wrote {} brands to {}",
            collected.len(),
            brands_json_path(dir).display()
        );
    }

    Ok(())
}

/// Handles the `devices` command for one brand link or for the whole index
fn handle_devices(
    fetcher: &HttpFetcher,
    config: &Config,
    brand: Option<String>,
    jitter_ms: u64,
    format: OutputFormat,
    dir: &Path,
) -> anyhow::Result<()> {
    let targets: Vec<(String, String)> = match brand {
        Some(link) => {
            let name = brand_name_from_link(&link)
                .with_context(|| format!("Cannot derive a brand name from {}", link))?;
            vec![(name, link)]
        }
        None => {
            let mut targets = Vec::new();
            for result in list_brands_at(fetcher, &config.fetcher.index_url) {
                if let Some(brand) = keep(result)? {
                    targets.push((brand.name, brand.catalog_link));
                }
            }
            targets
        }
    };

    tracing::info!(
        "Extracting devices of {} brand(s), jitter up to {}ms",
        targets.len(),
        jitter_ms
    );

    let mut grouped = DevicesByBrand::new();
    for (name, link) in &targets {
        let count = harvest_brand(fetcher, name, link, jitter_ms, format, dir, &mut grouped)?;
        tracing::info!("Devices of {} extracted: {}", name, count);
    }

    if format.wants_json() {
        let path = devices_by_brand_path(dir);
        write_json_file(&path, &grouped)?;
        tracing::info!(
            "Wrote {} devices of {} brands to {}",
            grouped.device_count(),
            grouped.brand_count(),
            path.display()
        );
    }

    Ok(())
}

/// Streams one brand's listing into its CSV and/or the nested collection
fn harvest_brand(
    fetcher: &HttpFetcher,
    name: &str,
    link: &str,
    jitter_ms: u64,
    format: OutputFormat,
    dir: &Path,
    grouped: &mut DevicesByBrand,
) -> anyhow::Result<usize> {
    tracing::info!("Extracting devices of {}...", name);

    let mut csv = if format.wants_csv() {
        Some(CsvSink::<_, DeviceSummary>::create(&brand_devices_csv_path(dir, name))?)
    } else {
        None
    };
    if format.wants_json() {
        grouped.ensure_brand(name);
    }

    let mut count = 0;
    for result in list_devices(fetcher, link, jitter_ms) {
        let Some(device) = keep(result)? else { continue };
        if let Some(sink) = csv.as_mut() {
            sink.push(&device)?;
        }
        if format.wants_json() {
            grouped.push(name, device);
        }
        count += 1;
    }

    if let Some(sink) = csv {
        sink.finish()?;
    }
    Ok(count)
}
