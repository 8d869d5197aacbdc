//! Delimited text export of comparative tables
use super::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io::{self, prelude::*};
use std::path::Path;

/// Separator of the unique peptide list inside its cell
pub const PEPTIDE_SEPARATOR: &str = "; ";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Tab,
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Tab => '\t',
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
        }
    }

    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Delimiter::Tab => "tsv",
            Delimiter::Comma | Delimiter::Semicolon => "csv",
        }
    }
}

/// Wrap a field in double quotes, doubling inner quotes, if it contains the
/// delimiter, a quote, or a line break
fn quote(field: &str, delimiter: Delimiter) -> Cow<'_, str> {
    let d = delimiter.as_char();
    if field.contains(|c: char| c == d || c == '"' || c == '\n' || c == '\r') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}

/// Write a comparative table: the header row, then one row per accession
///
/// Abundances are written with two decimals; an accession not detected in
/// a sample leaves that cell empty.
pub fn write_delimited<W: Write>(
    dataset: &ComparativeDataset,
    mut w: W,
    delimiter: Delimiter,
) -> io::Result<()> {
    let d = delimiter.as_char();
    let header = dataset
        .headers
        .iter()
        .map(|h| quote(h, delimiter))
        .collect::<Vec<_>>();
    writeln!(w, "{}", header.join(&d.to_string()))?;

    for row in &dataset.rows {
        let peptides = row.unique_peptides.join(PEPTIDE_SEPARATOR);
        write!(
            w,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            quote(&row.accession, delimiter),
            quote(&row.description, delimiter),
            quote(&row.disease_association, delimiter),
            row.total_peptides,
            row.unique_peptides_count(),
            yes_no(row.is_unique_group),
            quote(&peptides, delimiter),
            d = d
        )?;
        for abundance in &row.abundances {
            match abundance {
                Some(x) => write!(w, "{}{:.2}", d, x)?,
                None => write!(w, "{}", d)?,
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

impl ComparativeDataset {
    pub fn write_to<W: Write>(&self, w: W, delimiter: Delimiter) -> io::Result<()> {
        write_delimited(self, w, delimiter)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P, delimiter: Delimiter) -> io::Result<()> {
        let f = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        let mut w = io::BufWriter::new(f);
        write_delimited(self, &mut w, delimiter)?;
        w.flush()
    }
}
