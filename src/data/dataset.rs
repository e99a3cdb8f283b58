//! Whitespace-delimited dataset loader.
//!
//! Design goals:
//! - **Fail fast**: the first row that does not fit the schema aborts the load
//!   with its line number, column name, and offending token (exit code 3)
//! - **Missing file is distinct**: reported with exit code 2 before anything else
//! - **No fitting logic here**: rows are validated and stored, nothing more

use std::path::Path;

use crate::data::schema::{ColumnKind, LABEL_COLUMN, Schema};
use crate::error::AppError;

/// Tokens treated as a missing numeric value.
pub const MISSING_MARKERS: [&str; 3] = ["NA", "NaN", "?"];

/// One validated field.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Category(String),
    /// `None` when the source held a missing-value marker.
    Number(Option<f64>),
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => *v,
            Cell::Category(_) => None,
        }
    }
}

/// One row of the source file, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    /// 1-based line number in the source file.
    pub line: usize,
    pub cells: Vec<Cell>,
}

/// All rows of a dataset plus the schema they were validated against.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub schema: Schema,
    pub records: Vec<TrainingRecord>,
    pub blank_lines: usize,
}

impl Dataset {
    pub fn n_rows(&self) -> usize {
        self.records.len()
    }

    /// Values of a numeric column (`None` for missing cells).
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, AppError> {
        let idx = self
            .schema
            .index_of(name)
            .ok_or_else(|| AppError::data(format!("Unknown column `{name}`.")))?;
        if self.schema.columns()[idx].kind != ColumnKind::Numeric {
            return Err(AppError::data(format!("Column `{name}` is not numeric.")));
        }
        Ok(self.records.iter().map(|r| r.cells[idx].as_number()).collect())
    }

    /// Binary labels: raw `1` (good) maps to `0`, anything else (bad) to `1`.
    pub fn labels(&self) -> Result<Vec<u8>, AppError> {
        let idx = self
            .schema
            .index_of(LABEL_COLUMN)
            .ok_or_else(|| AppError::data(format!("Schema has no `{LABEL_COLUMN}` column.")))?;

        self.records
            .iter()
            .map(|r| match r.cells[idx].as_number() {
                Some(v) if v == 1.0 => Ok(0),
                Some(_) => Ok(1),
                None => Err(AppError::data(format!(
                    "Line {}: missing value in label column `{LABEL_COLUMN}`.",
                    r.line
                ))),
            })
            .collect()
    }
}

/// Load a dataset file.
pub fn load_dataset(path: &Path, schema: Schema) -> Result<Dataset, AppError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::usage(format!(
            "Training data '{}' not found. Point --data at the whitespace-delimited credit dataset.",
            path.display()
        )),
        _ => AppError::usage(format!("Failed to read training data '{}': {e}", path.display())),
    })?;

    let dataset = parse_dataset(&text, schema)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.n_rows(),
        blank_lines = dataset.blank_lines,
        "loaded training data"
    );
    Ok(dataset)
}

/// Parse dataset text. Blank lines are skipped.
pub fn parse_dataset(text: &str, schema: Schema) -> Result<Dataset, AppError> {
    let mut records = Vec::new();
    let mut blank_lines = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            blank_lines += 1;
            continue;
        }
        records.push(parse_record(line_no, line, schema)?);
    }

    if records.is_empty() {
        return Err(AppError::data("Training data contains no rows."));
    }

    Ok(Dataset {
        schema,
        records,
        blank_lines,
    })
}

fn parse_record(line_no: usize, line: &str, schema: Schema) -> Result<TrainingRecord, AppError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != schema.width() {
        return Err(AppError::data(format!(
            "Line {line_no}: expected {} columns, found {}.",
            schema.width(),
            tokens.len()
        )));
    }

    let cells = schema
        .columns()
        .iter()
        .zip(tokens)
        .map(|(column, token)| match column.kind {
            ColumnKind::Categorical => Ok(Cell::Category(token.to_string())),
            ColumnKind::Numeric => parse_numeric(token).map(Cell::Number).map_err(|()| {
                AppError::data(format!(
                    "Line {line_no}: column `{}` expects a number, found '{token}'.",
                    column.name
                ))
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TrainingRecord { line: line_no, cells })
}

fn parse_numeric(token: &str) -> Result<Option<f64>, ()> {
    if MISSING_MARKERS.contains(&token) {
        return Ok(None);
    }
    match token.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{Column, ColumnKind};

    const TINY: [Column; 3] = [
        Column {
            name: "code",
            kind: ColumnKind::Categorical,
        },
        Column {
            name: "amount",
            kind: ColumnKind::Numeric,
        },
        Column {
            name: "risk",
            kind: ColumnKind::Numeric,
        },
    ];

    fn tiny() -> Schema {
        Schema::new(&TINY)
    }

    #[test]
    fn parses_rows_and_skips_blank_lines() {
        let ds = parse_dataset("A11  1200 1\n\n  A12\t800   2\n", tiny()).unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.blank_lines, 1);
        assert_eq!(ds.records[1].line, 3);
        assert_eq!(ds.records[0].cells[0], Cell::Category("A11".to_string()));
        assert_eq!(ds.numeric_column("amount").unwrap(), vec![Some(1200.0), Some(800.0)]);
    }

    #[test]
    fn labels_remap_good_to_zero() {
        let ds = parse_dataset("A 1 1\nB 2 2\nC 3 1\n", tiny()).unwrap();
        assert_eq!(ds.labels().unwrap(), vec![0, 1, 0]);
    }

    #[test]
    fn missing_markers_become_none() {
        let ds = parse_dataset("A NA 1\nB ? 2\nC 5 1\n", tiny()).unwrap();
        assert_eq!(ds.numeric_column("amount").unwrap(), vec![None, None, Some(5.0)]);
    }

    #[test]
    fn wrong_column_count_names_the_line() {
        let err = parse_dataset("A 1 1\nB 2\n", tiny()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("Line 2"), "{err}");
        assert!(err.message().contains("expected 3 columns, found 2"), "{err}");
    }

    #[test]
    fn non_numeric_token_names_the_column() {
        let err = parse_dataset("A 1 1\nB lots 2\n", tiny()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.message().contains("`amount`"), "{err}");
        assert!(err.message().contains("'lots'"), "{err}");
    }

    #[test]
    fn missing_label_is_rejected() {
        let ds = parse_dataset("A 1 NA\n", tiny()).unwrap();
        assert_eq!(ds.labels().unwrap_err().exit_code(), 3);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(parse_dataset("\n \n", tiny()).unwrap_err().exit_code(), 3);
    }

    #[test]
    fn categorical_column_is_not_numeric() {
        let ds = parse_dataset("A 1 1\n", tiny()).unwrap();
        assert!(ds.numeric_column("code").is_err());
        assert!(ds.numeric_column("nope").is_err());
    }

    #[test]
    fn missing_file_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("absent.data"), tiny()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("not found"), "{err}");
    }
}
