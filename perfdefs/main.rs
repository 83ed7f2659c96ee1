use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use perfdefs::common::PerfAvailability;
use perfdefs::counters::parse_counter_sets;
use perfdefs::render::{self, OutputFormat};
use perfdefs::{Category, PerfConfig, PerfdefsError};

#[derive(Parser, Debug)]
#[command(name = "perfdefs")]
#[command(about = "Linux perf counter names, codes and availability")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(
        short,
        long,
        global = true,
        help = "Enable verbose logging (shows every name resolution)"
    )]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the counter name tables
    List {
        #[arg(
            long,
            help = "Category to list: PERF_HW_COUNTERS, PERF_SW_COUNTERS, PERF_CACHES, PERF_CACHE_OPS, PERF_CACHE_RESULTS (or hw, sw, cache, cache-op, cache-result)"
        )]
        category: Option<String>,

        #[arg(long, help = "Drop repeated names from the listing")]
        distinct: bool,

        #[arg(
            long,
            help = "List every cache/op/result combination",
            conflicts_with_all = ["category", "distinct"]
        )]
        cache_events: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Resolve counter names to perf_event type and config
    Resolve {
        #[arg(
            help = "Counter sets, one per argument, counters separated by commas (e.g. cycles,instructions page-faults). Defaults to $PERFDEFS_COUNTERS"
        )]
        sets: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Report whether this process may use perf counters
    Check {
        #[arg(long, help = "Path of the perf_event_paranoid sysctl")]
        paranoid_path: Option<PathBuf>,
    },
}

fn list(
    category: Option<String>,
    distinct: bool,
    cache_events: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let entries = if cache_events {
        render::cache_event_entries()
    } else {
        let categories = match category {
            Some(name) => vec![Category::from_name(&name)
                .ok_or_else(|| PerfdefsError::UnknownCategory(name.clone()))?],
            None => Category::all(),
        };

        categories
            .into_iter()
            .flat_map(|c| render::catalog_entries(c, distinct))
            .collect()
    };

    tracing::debug!("Listing {} entries", entries.len());
    print!("{}", render::render(&entries, format)?);
    Ok(())
}

fn resolve(config: &PerfConfig, sets: Vec<String>, format: OutputFormat) -> anyhow::Result<()> {
    let counter_sets = if sets.is_empty() {
        config
            .default_counter_sets()
            .context("Failed to resolve default counter sets")?
    } else {
        parse_counter_sets(&sets).context("Failed to resolve counter sets")?
    };

    if counter_sets.is_empty() {
        tracing::info!("No counters requested");
        return Ok(());
    }

    tracing::info!("Resolved {} counter set(s)", counter_sets.len());
    let rows = render::resolved_entries(&counter_sets);
    print!("{}", render::render(&rows, format)?);
    Ok(())
}

fn check(config: &PerfConfig, paranoid_path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = paranoid_path.unwrap_or_else(|| config.paranoid_path.clone());
    let availability = PerfAvailability::probe(&path)
        .with_context(|| format!("Failed to probe {}", path.display()))?;

    let yes_no = |allowed: bool| if allowed { "yes" } else { "no" };

    match availability.level {
        Some(level) => println!("perf_event_paranoid: {level}"),
        None => println!("perf_event_paranoid: unavailable ({})", path.display()),
    }
    println!("privileged:          {}", yes_no(availability.privileged));
    println!("user space:          {}", yes_no(availability.user_measurement()));
    println!("kernel space:        {}", yes_no(availability.kernel_measurement()));
    println!("cpu wide:            {}", yes_no(availability.cpu_wide_measurement()));
    println!("raw tracepoints:     {}", yes_no(availability.raw_tracepoints()));

    if !availability.user_measurement() {
        eprintln!("\nERROR: Performance counters are not available to this process.\n\nRun: sudo sysctl kernel.perf_event_paranoid=2\n");
        std::process::exit(1);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup logging based on verbose flag; stdout is reserved for listings
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = PerfConfig::from_env();

    match args.command {
        Command::List {
            category,
            distinct,
            cache_events,
            format,
        } => list(category, distinct, cache_events, format),
        Command::Resolve { sets, format } => resolve(&config, sets, format),
        Command::Check { paranoid_path } => check(&config, paranoid_path),
    }
}
