//! Error types for sample processing

use super::*;
use std::fmt;
use thiserror::Error;

/// A required column that was not found in an input table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingColumn {
    pub table: TableKind,
    pub column: String,
}

impl fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}' ({} table)", self.column, self.table)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} table has no data rows")]
    EmptyTable(TableKind),

    #[error("missing required columns: {}", join(.0))]
    MissingColumns(Vec<MissingColumn>),

    #[error("{0} exports are not supported yet")]
    UnsupportedFormat(SourceSoftware),

    #[error("invalid sample configuration: {0}")]
    InvalidSampleConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join(columns: &[MissingColumn]) -> String {
    columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of one sample within a batch, which aborts the rest of the batch
#[derive(Error, Debug)]
#[error("sample {sample_id} '{sample_name}': {source}")]
pub struct BatchError {
    pub sample_id: u32,
    pub sample_name: String,
    #[source]
    pub source: Error,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_columns_lists_everything() {
        let err = Error::MissingColumns(vec![
            MissingColumn {
                table: TableKind::Peptide,
                column: "Area".into(),
            },
            MissingColumn {
                table: TableKind::Protein,
                column: "Description".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "missing required columns: 'Area' (peptide table), 'Description' (protein table)"
        );
    }

    #[test]
    fn batch_error_names_sample() {
        let err = BatchError {
            sample_id: 3,
            sample_name: "tumor".into(),
            source: Error::EmptyTable(TableKind::Protein),
        };
        assert_eq!(err.to_string(), "sample 3 'tumor': protein table has no data rows");
    }
}
