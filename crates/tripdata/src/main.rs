use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tripdata_bucket::{MemoryBucketStore, ObjectStoreConfig, S3BucketStore};
use tripdata_core::config::AppConfig;
use tripdata_core::datasets::{all_datasets, dataset_by_name, Cadence};
use tripdata_core::materialize::materialize;
use tripdata_core::period::Period;
use tripdata_core::pipeline::{build_ingestion_pipeline, run_pipeline};

#[derive(Parser, Debug)]
#[command(author, version, about = "NYC trip-record ingestion pipeline", long_about = None)]
struct Cli {
    /// TOML configuration file; falls back to TRIPDATA_* environment variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run fetch -> materialize -> publish -> cleanup for one period
    Run(RunArgs),
    /// Convert a downloaded CSV file into a parquet artifact
    Materialize(MaterializeArgs),
    /// List the configured dataset families
    Datasets,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Dataset family name (e.g. yellow_tripdata)
    #[arg(long)]
    dataset: String,
    /// Scheduling period as YYYY-MM
    #[arg(long)]
    period: String,
    /// Publish into an in-memory store instead of S3
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct MaterializeArgs {
    source: PathBuf,
    destination: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(cli.config.as_deref(), args).await,
        Command::Materialize(args) => handle_materialize(args),
        Command::Datasets => handle_datasets(),
    }
}

async fn handle_run(config_path: Option<&std::path::Path>, args: RunArgs) -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_path).context("failed to load configuration")?;
    info!(
        project_id = %config.project_id,
        bucket = %config.bucket_name,
        local_base = %config.local_base_path.display(),
        "loaded configuration"
    );

    let dataset = dataset_by_name(&args.dataset)
        .with_context(|| format!("unknown dataset '{}'", args.dataset))?;
    let period: Period = args
        .period
        .parse()
        .with_context(|| format!("invalid period '{}'", args.period))?;

    std::fs::create_dir_all(&config.local_base_path)
        .with_context(|| format!("cannot create {}", config.local_base_path.display()))?;

    let pipeline = build_ingestion_pipeline(&config, dataset, period)?;

    let report = if args.dry_run {
        let store = MemoryBucketStore::new();
        run_pipeline(&pipeline, &store).await?
    } else {
        let store = S3BucketStore::new(ObjectStoreConfig::from_env(config.bucket_name.clone()))
            .await
            .context("failed to configure object store")?;
        run_pipeline(&pipeline, &store).await?
    };

    println!(
        "run {} complete: {} rows published to {}",
        report.run_id, report.rows, report.remote_key
    );
    Ok(())
}

fn handle_materialize(args: MaterializeArgs) -> Result<()> {
    let report = materialize(&args.source, &args.destination)?;
    println!(
        "materialized {} rows ({} columns) into {}",
        report.rows,
        report.columns.len(),
        args.destination.display()
    );
    Ok(())
}

fn handle_datasets() -> Result<()> {
    for dataset in all_datasets() {
        let range = match (dataset.cadence, dataset.first_period, dataset.last_period) {
            (Cadence::Once, _, _) => "one-shot".to_string(),
            (Cadence::Monthly, first, last) => format!(
                "{} .. {}",
                first.map_or_else(|| "open".to_string(), |p| p.to_string()),
                last.map_or_else(|| "open".to_string(), |p| p.to_string())
            ),
        };
        println!("{:<16} schedule '{}'  periods {}", dataset.name, dataset.schedule, range);
    }
    Ok(())
}
