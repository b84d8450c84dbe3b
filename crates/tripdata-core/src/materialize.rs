use std::fs::{self, File};
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use polars::io::parquet::write::{ParquetCompression, ParquetWriter, StatisticsOptions};
use polars::prelude::*;
use tracing::{error, info};

use crate::error::{IngestError, Result};

/// How a source file's payload is encoded, decided by file-name suffix.
/// Content sniffing is deliberately not performed; the fetch step controls
/// the names it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    CompressedCsv,
    PlainCsv,
    Unsupported,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        let name = path.to_string_lossy();
        if name.ends_with(".csv.gz") || name.ends_with(".gz") {
            SourceFormat::CompressedCsv
        } else if name.ends_with(".csv") {
            SourceFormat::PlainCsv
        } else {
            SourceFormat::Unsupported
        }
    }
}

#[derive(Debug, Clone)]
pub struct MaterializeReport {
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Re-encode a downloaded CSV file (plain or gzip-compressed) as a parquet
/// artifact at `destination`.
///
/// The whole payload is decoded before any output is produced, so a failed
/// decode never leaves a partial artifact behind. Decoding is strict: ragged
/// rows, broken quoting, and invalid encodings surface as errors instead of
/// being skipped. An existing destination is overwritten.
pub fn materialize(source: &Path, destination: &Path) -> Result<MaterializeReport> {
    let mut frame = match SourceFormat::from_path(source) {
        SourceFormat::CompressedCsv => decode_csv(decompress(source)?)?,
        SourceFormat::PlainCsv => decode_csv(fs::read(source)?)?,
        SourceFormat::Unsupported => {
            error!(
                path = %source.display(),
                "source has no recognized CSV suffix, refusing to materialize"
            );
            return Err(IngestError::UnsupportedFormat {
                path: source.to_path_buf(),
            });
        }
    };

    let report = MaterializeReport {
        rows: frame.height(),
        columns: frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    };

    let parquet_bytes = encode_parquet(&mut frame)?;
    fs::write(destination, &parquet_bytes)?;

    info!(
        source = %source.display(),
        destination = %destination.display(),
        rows = report.rows,
        "materialized columnar artifact"
    );
    Ok(report)
}

fn decompress(source: &Path) -> Result<Vec<u8>> {
    let file = File::open(source)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut payload = Vec::new();
    decoder.read_to_end(&mut payload)?;
    Ok(payload)
}

fn decode_csv(payload: Vec<u8>) -> Result<DataFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(payload))
        .finish()?;
    Ok(frame)
}

fn encode_parquet(frame: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        ParquetWriter::new(&mut cursor)
            .with_compression(ParquetCompression::Zstd(None))
            .with_statistics(StatisticsOptions::default())
            .finish(frame)?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_detection_by_suffix() {
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("yellow_tripdata_2021-01.csv.gz")),
            SourceFormat::CompressedCsv
        );
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("taxi_zone_lookup.csv")),
            SourceFormat::PlainCsv
        );
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("notes.txt")),
            SourceFormat::Unsupported
        );
        assert_eq!(
            SourceFormat::from_path(&PathBuf::from("no_extension")),
            SourceFormat::Unsupported
        );
    }
}
