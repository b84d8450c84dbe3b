use std::fs;
use std::path::PathBuf;

use tracing::info;
use uuid::Uuid;

use tripdata_bucket::BucketStore;

use crate::config::AppConfig;
use crate::datasets::DatasetConfig;
use crate::error::{IngestError, Result};
use crate::fetch;
use crate::materialize::materialize;
use crate::period::Period;
use crate::template::render;

pub const PARQUET_CONTENT_TYPE: &str = "application/vnd.apache.parquet";

/// Fully rendered plan for one (dataset, period) run: every path and key the
/// steps need, resolved up front. Construction does no I/O.
#[derive(Debug, Clone)]
pub struct PipelineDefinition {
    pub dataset: &'static str,
    pub period: Period,
    pub source_url: String,
    pub local_source_path: PathBuf,
    pub local_parquet_path: PathBuf,
    pub remote_key: String,
}

pub fn build_ingestion_pipeline(
    config: &AppConfig,
    dataset: &DatasetConfig,
    period: Period,
) -> Result<PipelineDefinition> {
    if !dataset.is_active(period) {
        return Err(IngestError::InactivePeriod {
            dataset: dataset.name.to_string(),
            period: period.to_string(),
        });
    }

    Ok(PipelineDefinition {
        dataset: dataset.name,
        period,
        source_url: render(dataset.source_url_template, period)?,
        local_source_path: config
            .local_base_path
            .join(render(dataset.local_file_template, period)?),
        local_parquet_path: config
            .local_base_path
            .join(render(dataset.parquet_file_template, period)?),
        remote_key: render(dataset.remote_key_template, period)?,
    })
}

#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub rows: usize,
    pub artifact_hash: String,
    pub remote_key: String,
}

/// Execute fetch -> materialize -> publish -> cleanup for one period.
///
/// Any step failure aborts the run and propagates; the local files are left
/// in place so the orchestrator's retry starts from a clean fetch. Cleanup
/// runs only after a successful publish.
pub async fn run_pipeline(
    pipeline: &PipelineDefinition,
    store: &dyn BucketStore,
) -> Result<RunReport> {
    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        dataset = pipeline.dataset,
        period = %pipeline.period,
        "starting ingestion run"
    );

    fetch::fetch(&pipeline.source_url, &pipeline.local_source_path).await?;
    let report = materialize(&pipeline.local_source_path, &pipeline.local_parquet_path)?;
    let artifact_hash = publish_artifact(pipeline, store).await?;
    cleanup_local(pipeline)?;

    info!(
        %run_id,
        rows = report.rows,
        key = %pipeline.remote_key,
        "ingestion run complete"
    );
    Ok(RunReport {
        run_id,
        rows: report.rows,
        artifact_hash,
        remote_key: pipeline.remote_key.clone(),
    })
}

/// Upload the parquet artifact under the pipeline's remote key, returning the
/// artifact's content hash for the run report.
pub async fn publish_artifact(
    pipeline: &PipelineDefinition,
    store: &dyn BucketStore,
) -> Result<String> {
    let payload = fs::read(&pipeline.local_parquet_path)?;
    let hash = blake3::hash(&payload).to_hex().to_string();

    store
        .put_object(&pipeline.remote_key, payload.into(), PARQUET_CONTENT_TYPE)
        .await?;

    info!(key = %pipeline.remote_key, hash = %hash, "published columnar artifact");
    Ok(hash)
}

/// Remove the local source and parquet files. Missing files are not an
/// error so a re-run after partial cleanup converges.
pub fn cleanup_local(pipeline: &PipelineDefinition) -> Result<()> {
    for path in [&pipeline.local_source_path, &pipeline.local_parquet_path] {
        match fs::remove_file(path) {
            Ok(()) => info!(path = %path.display(), "removed local artifact"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
