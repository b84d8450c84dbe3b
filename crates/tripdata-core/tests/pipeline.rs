use std::path::PathBuf;

use tempfile::TempDir;

use tripdata_bucket::{BucketStore, MemoryBucketStore};
use tripdata_core::config::AppConfig;
use tripdata_core::datasets::dataset_by_name;
use tripdata_core::error::IngestError;
use tripdata_core::materialize::materialize;
use tripdata_core::period::Period;
use tripdata_core::pipeline::{
    build_ingestion_pipeline, cleanup_local, publish_artifact, PipelineDefinition,
    PARQUET_CONTENT_TYPE,
};

fn test_config(local_base: PathBuf) -> AppConfig {
    AppConfig {
        project_id: "de-zoomcamp".to_string(),
        bucket_name: "dtc-data-lake".to_string(),
        local_base_path: local_base,
    }
}

#[test]
fn factory_renders_monthly_pipeline() {
    let config = test_config(PathBuf::from("/var/lib/tripdata"));
    let yellow = dataset_by_name("yellow_tripdata").unwrap();
    let period = Period::new(2021, 1).unwrap();

    let pipeline = build_ingestion_pipeline(&config, yellow, period).unwrap();
    assert_eq!(
        pipeline.source_url,
        "https://github.com/DataTalksClub/nyc-tlc-data/releases/download/yellow/yellow_tripdata_2021-01.csv.gz"
    );
    assert_eq!(
        pipeline.local_source_path,
        PathBuf::from("/var/lib/tripdata/yellow_tripdata_2021-01.csv.gz")
    );
    assert_eq!(
        pipeline.local_parquet_path,
        PathBuf::from("/var/lib/tripdata/yellow_tripdata_2021-01.parquet")
    );
    assert_eq!(
        pipeline.remote_key,
        "raw/yellow_tripdata/2021/yellow_tripdata_2021-01.parquet"
    );
}

#[test]
fn factory_renders_one_shot_pipeline_without_placeholders() {
    let config = test_config(PathBuf::from("/var/lib/tripdata"));
    let zones = dataset_by_name("taxi_zone").unwrap();
    let period = Period::new(2021, 1).unwrap();

    let pipeline = build_ingestion_pipeline(&config, zones, period).unwrap();
    assert_eq!(pipeline.remote_key, "raw/taxi_zone/taxi_zone_lookup.parquet");
    assert_eq!(
        pipeline.local_source_path,
        PathBuf::from("/var/lib/tripdata/taxi_zone_lookup.csv")
    );
}

#[test]
fn factory_rejects_periods_outside_the_active_range() {
    let config = test_config(PathBuf::from("/var/lib/tripdata"));
    let fhv = dataset_by_name("fhv_tripdata").unwrap();
    let period = Period::new(2021, 1).unwrap();

    let err = build_ingestion_pipeline(&config, fhv, period).unwrap_err();
    assert!(matches!(err, IngestError::InactivePeriod { .. }));
}

#[tokio::test]
async fn publish_then_cleanup_round_trip() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("yellow_tripdata_2021-01.csv");
    let parquet = dir.path().join("yellow_tripdata_2021-01.parquet");
    std::fs::write(&source, "id,amount\n1,12.5\n2,7.0\n").unwrap();
    materialize(&source, &parquet).unwrap();

    let pipeline = PipelineDefinition {
        dataset: "yellow_tripdata",
        period: Period::new(2021, 1).unwrap(),
        source_url: "unused://".to_string(),
        local_source_path: source.clone(),
        local_parquet_path: parquet.clone(),
        remote_key: "raw/yellow_tripdata/2021/yellow_tripdata_2021-01.parquet".to_string(),
    };

    let store = MemoryBucketStore::new();
    let artifact_bytes = std::fs::read(&parquet).unwrap();

    let hash = publish_artifact(&pipeline, &store).await.unwrap();
    assert_eq!(hash, blake3::hash(&artifact_bytes).to_hex().to_string());

    let stored = store.get_object(&pipeline.remote_key).await.unwrap();
    assert_eq!(stored.as_ref(), artifact_bytes.as_slice());
    assert_eq!(
        store.content_type(&pipeline.remote_key).as_deref(),
        Some(PARQUET_CONTENT_TYPE)
    );

    cleanup_local(&pipeline).unwrap();
    assert!(!source.exists());
    assert!(!parquet.exists());

    // A second cleanup pass sees no files and still succeeds.
    cleanup_local(&pipeline).unwrap();
}

#[tokio::test]
async fn publish_fails_when_artifact_is_missing() {
    let dir = TempDir::new().unwrap();
    let pipeline = PipelineDefinition {
        dataset: "yellow_tripdata",
        period: Period::new(2021, 1).unwrap(),
        source_url: "unused://".to_string(),
        local_source_path: dir.path().join("missing.csv"),
        local_parquet_path: dir.path().join("missing.parquet"),
        remote_key: "raw/yellow_tripdata/2021/missing.parquet".to_string(),
    };

    let store = MemoryBucketStore::new();
    let err = publish_artifact(&pipeline, &store).await.unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
    assert!(store.keys().is_empty());
}
