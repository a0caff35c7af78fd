//! Recording ingestion
//!
//! Parses portable-vibrometer CSV exports into [`Sample`] sequences. The
//! format is a header row followed by numeric rows; the only required
//! columns are `ax`, `ay`, `az` (case-insensitive, any order). A time
//! column, if present, is ignored: time is always reconstructed as
//! `index / sample_rate` so the series is uniformly spaced for the
//! filters and the FFT.

use crate::types::Sample;
use thiserror::Error;

/// Recording ingestion errors.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing required column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("no header row found")]
    MissingHeader,

    #[error("line {line}, column '{column}': cannot parse '{value}' as a number")]
    BadNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("invalid sample rate: {0} (must be > 0)")]
    InvalidSampleRate(f64),
}

/// Positions of the acceleration columns within a header row.
struct ColumnMap {
    ax: usize,
    ay: usize,
    az: usize,
}

impl ColumnMap {
    /// Locate `ax`/`ay`/`az` in a header row, case-insensitively.
    ///
    /// Fails fast with every missing column named, so the operator can fix
    /// the export in one pass.
    fn from_header(header: &str) -> Result<Self, ParseError> {
        let names: Vec<String> = header
            .split(',')
            .map(|c| c.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let find = |name: &str| names.iter().position(|c| c == name);

        let ax = find("ax");
        let ay = find("ay");
        let az = find("az");

        let (Some(ax), Some(ay), Some(az)) = (ax, ay, az) else {
            let columns = [("ax", ax), ("ay", ay), ("az", az)]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| (*name).to_string())
                .collect();
            return Err(ParseError::MissingColumns { columns });
        };

        Ok(Self { ax, ay, az })
    }
}

/// Parse CSV text into samples, stamping time as `index / sample_rate`.
///
/// Blank lines are skipped. Rows shorter than the required columns or with
/// non-numeric acceleration cells fail the whole parse — a partial
/// recording would silently corrupt every downstream statistic.
pub fn parse_csv(text: &str, sample_rate: f64) -> Result<Vec<Sample>, ParseError> {
    if sample_rate <= 0.0 {
        return Err(ParseError::InvalidSampleRate(sample_rate));
    }

    let mut lines = text.lines().enumerate();

    let columns = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, header)) => break ColumnMap::from_header(header)?,
            None => return Err(ParseError::MissingHeader),
        }
    };

    let mut samples = Vec::new();
    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(',').collect();

        let cell = |idx: usize, column: &'static str| -> Result<f64, ParseError> {
            let raw = cells.get(idx).map(|c| c.trim()).unwrap_or("");
            raw.parse::<f64>().map_err(|_| ParseError::BadNumber {
                line: line_no + 1,
                column,
                value: raw.to_string(),
            })
        };

        let index = samples.len();
        samples.push(Sample {
            time: index as f64 / sample_rate,
            ax: cell(columns.ax, "ax")?,
            ay: cell(columns.ay, "ay")?,
            az: cell(columns.az, "az")?,
        });
    }

    tracing::debug!(
        samples = samples.len(),
        sample_rate,
        duration_secs = samples.len() as f64 / sample_rate,
        "parsed recording"
    );

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let text = "ax,ay,az\n1.0,2.0,3.0\n4.0,5.0,6.0\n";
        let samples = parse_csv(text, 100.0).expect("parse ok");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].az, 3.0);
        assert_eq!(samples[1].ax, 4.0);
        // Time from index, not from file
        assert!((samples[1].time - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_header_case_insensitive_any_order() {
        let text = "AZ,Ax,aY\n3.0,1.0,2.0\n";
        let samples = parse_csv(text, 1600.0).expect("parse ok");
        assert_eq!(samples[0].ax, 1.0);
        assert_eq!(samples[0].ay, 2.0);
        assert_eq!(samples[0].az, 3.0);
    }

    #[test]
    fn test_time_column_ignored() {
        let text = "time,ax,ay,az\n99.0,1.0,2.0,3.0\n98.0,1.0,2.0,3.0\n";
        let samples = parse_csv(text, 2.0).expect("parse ok");
        assert_eq!(samples[0].time, 0.0);
        assert_eq!(samples[1].time, 0.5);
    }

    #[test]
    fn test_missing_columns_all_named() {
        let err = parse_csv("ax,foo,bar\n1,2,3\n", 100.0).unwrap_err();
        match err {
            ParseError::MissingColumns { columns } => {
                assert_eq!(columns, vec!["ay".to_string(), "az".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_number_has_location() {
        let err = parse_csv("ax,ay,az\n1.0,oops,3.0\n", 100.0).unwrap_err();
        match err {
            ParseError::BadNumber { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "ay");
                assert_eq!(value, "oops");
            }
            other => panic!("expected BadNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = "\nax,ay,az\n1,2,3\n\n4,5,6\n\n";
        let samples = parse_csv(text, 100.0).expect("parse ok");
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_invalid_sample_rate() {
        assert!(matches!(
            parse_csv("ax,ay,az\n", 0.0),
            Err(ParseError::InvalidSampleRate(_))
        ));
    }
}
