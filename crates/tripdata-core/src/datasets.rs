use once_cell::sync::Lazy;

use crate::period::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// One slice per calendar month; the orchestrator substitutes the period.
    Monthly,
    /// A single period-independent slice (lookup tables).
    Once,
}

/// Declarative description of one dataset family. The same pipeline shape is
/// instantiated for each entry; only these values differ.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub name: &'static str,
    pub source_url_template: &'static str,
    pub local_file_template: &'static str,
    pub parquet_file_template: &'static str,
    pub remote_key_template: &'static str,
    /// Cron expression handed to the external orchestrator; informational here.
    pub schedule: &'static str,
    pub cadence: Cadence,
    pub first_period: Option<Period>,
    pub last_period: Option<Period>,
}

impl DatasetConfig {
    /// Whether this family publishes a slice for `period`. One-shot datasets
    /// accept any period since their artifacts are period-independent.
    pub fn is_active(&self, period: Period) -> bool {
        match self.cadence {
            Cadence::Once => true,
            Cadence::Monthly => {
                self.first_period.map_or(true, |first| period >= first)
                    && self.last_period.map_or(true, |last| period <= last)
            }
        }
    }
}

static DATASETS: Lazy<Vec<DatasetConfig>> = Lazy::new(|| {
    vec![
        DatasetConfig {
            name: "yellow_tripdata",
            source_url_template: "https://github.com/DataTalksClub/nyc-tlc-data/releases/download/yellow/yellow_tripdata_{period}.csv.gz",
            local_file_template: "yellow_tripdata_{period}.csv.gz",
            parquet_file_template: "yellow_tripdata_{period}.parquet",
            remote_key_template: "raw/yellow_tripdata/{year}/yellow_tripdata_{period}.parquet",
            schedule: "0 6 2 * *",
            cadence: Cadence::Monthly,
            first_period: Some(Period { year: 2019, month: 1 }),
            last_period: None,
        },
        DatasetConfig {
            name: "green_tripdata",
            source_url_template: "https://github.com/DataTalksClub/nyc-tlc-data/releases/download/green/green_tripdata_{period}.csv.gz",
            local_file_template: "green_tripdata_{period}.csv.gz",
            parquet_file_template: "green_tripdata_{period}.parquet",
            remote_key_template: "raw/green_tripdata/{year}/green_tripdata_{period}.parquet",
            schedule: "0 7 2 * *",
            cadence: Cadence::Monthly,
            first_period: Some(Period { year: 2019, month: 1 }),
            last_period: Some(Period { year: 2020, month: 12 }),
        },
        DatasetConfig {
            name: "fhv_tripdata",
            source_url_template: "https://github.com/DataTalksClub/nyc-tlc-data/releases/download/fhv/fhv_tripdata_{period}.csv.gz",
            local_file_template: "fhv_tripdata_{period}.csv.gz",
            parquet_file_template: "fhv_tripdata_{period}.parquet",
            remote_key_template: "raw/fhv_tripdata/{year}/fhv_tripdata_{period}.parquet",
            schedule: "0 8 2 * *",
            cadence: Cadence::Monthly,
            first_period: Some(Period { year: 2019, month: 1 }),
            last_period: Some(Period { year: 2019, month: 12 }),
        },
        DatasetConfig {
            name: "taxi_zone",
            source_url_template: "https://github.com/DataTalksClub/nyc-tlc-data/releases/download/misc/taxi_zone_lookup.csv",
            local_file_template: "taxi_zone_lookup.csv",
            parquet_file_template: "taxi_zone_lookup.parquet",
            remote_key_template: "raw/taxi_zone/taxi_zone_lookup.parquet",
            schedule: "@once",
            cadence: Cadence::Once,
            first_period: None,
            last_period: None,
        },
    ]
});

pub fn all_datasets() -> &'static [DatasetConfig] {
    DATASETS.as_slice()
}

pub fn dataset_by_name(name: &str) -> Option<&'static DatasetConfig> {
    DATASETS.iter().find(|dataset| dataset.name == name)
}
