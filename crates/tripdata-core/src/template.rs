use crate::error::{IngestError, Result};
use crate::period::Period;

/// Substitute a scheduling period into a path/URL template.
///
/// Recognized placeholders are `{period}` (rendered as `YYYY-MM`) and
/// `{year}`. A template with no placeholders renders unchanged, which is how
/// one-shot datasets declare period-independent paths. Any other placeholder
/// is rejected rather than passed through.
pub fn render(template: &str, period: Period) -> Result<String> {
    let rendered = template
        .replace("{period}", &period.to_string())
        .replace("{year}", &format!("{:04}", period.year));

    if let Some(start) = rendered.find('{') {
        let tail = &rendered[start..];
        let placeholder = tail
            .find('}')
            .map(|end| &tail[..=end])
            .unwrap_or(tail);
        return Err(IngestError::Template(format!(
            "unrecognized placeholder {placeholder} in template '{template}'"
        )));
    }

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_period_and_year() {
        let period = Period::new(2021, 3).unwrap();
        let rendered =
            render("raw/yellow_tripdata/{year}/yellow_tripdata_{period}.parquet", period).unwrap();
        assert_eq!(rendered, "raw/yellow_tripdata/2021/yellow_tripdata_2021-03.parquet");
    }

    #[test]
    fn leaves_placeholder_free_templates_unchanged() {
        let period = Period::new(2021, 3).unwrap();
        let rendered = render("raw/taxi_zone/taxi_zone_lookup.parquet", period).unwrap();
        assert_eq!(rendered, "raw/taxi_zone/taxi_zone_lookup.parquet");
    }

    #[test]
    fn rejects_unknown_placeholders() {
        let period = Period::new(2021, 3).unwrap();
        let err = render("trips_{month}.csv", period).unwrap_err();
        assert!(matches!(err, IngestError::Template(_)));
        assert!(err.to_string().contains("{month}"));
    }
}
