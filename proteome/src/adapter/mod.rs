//! Per-software adapters that turn a sample's parsed tables into canonical
//! [`ProteinRecord`]s
use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

mod peaks;

pub use peaks::{Peaks, PeaksColumns};

/// Output of a successful [`Adapter::adapt`] call
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalysisResult {
    /// Candidate records, descending by average abundance
    pub records: Vec<ProteinRecord>,
    /// Number of peptide rows that entered normalization
    pub total_peptides: usize,
    /// Number of rows in the protein table
    pub total_proteins: usize,
    /// Summed raw abundance before normalization
    pub total_area: f64,
    pub normalization_factor: f64,
}

pub trait Adapter {
    fn software(&self) -> SourceSoftware;

    /// Whether [`Adapter::adapt`] needs a protein table next to the
    /// peptide table
    fn requires_protein_table(&self) -> bool {
        self.software().requires_protein_table()
    }

    fn adapt(
        &self,
        peptides: &Table,
        proteins: Option<&Table>,
        sample_id: u32,
    ) -> Result<AnalysisResult>;
}

/// Search engine that produced a sample's export files
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceSoftware {
    #[serde(alias = "peaks_studio")]
    Peaks,
    MaxQuant,
    #[serde(alias = "pd")]
    ProteomeDiscoverer,
    FragPipe,
    Spectronaut,
}

impl SourceSoftware {
    pub const ALL: [SourceSoftware; 5] = [
        SourceSoftware::Peaks,
        SourceSoftware::MaxQuant,
        SourceSoftware::ProteomeDiscoverer,
        SourceSoftware::FragPipe,
        SourceSoftware::Spectronaut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SourceSoftware::Peaks => "PEAKS Studio",
            SourceSoftware::MaxQuant => "MaxQuant",
            SourceSoftware::ProteomeDiscoverer => "Proteome Discoverer",
            SourceSoftware::FragPipe => "FragPipe",
            SourceSoftware::Spectronaut => "Spectronaut",
        }
    }

    /// Spectronaut reports are a single long-format table; every other
    /// export is a peptide/protein pair
    pub fn requires_protein_table(self) -> bool {
        !matches!(self, SourceSoftware::Spectronaut)
    }

    /// Construct the adapter for this software
    pub fn adapter(self, settings: &Settings) -> Box<dyn Adapter> {
        match self {
            SourceSoftware::Peaks => Box::new(Peaks::new(
                settings.peaks.clone(),
                settings.classifier.clone(),
                settings.tie_break,
            )),
            other => Box::new(Unsupported(other)),
        }
    }
}

impl fmt::Display for SourceSoftware {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Placeholder for a known export format without an implementation
///
/// Fails loudly instead of reporting an empty result, which would be
/// indistinguishable from a sample without any candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Unsupported(pub SourceSoftware);

impl Adapter for Unsupported {
    fn software(&self) -> SourceSoftware {
        self.0
    }

    fn adapt(&self, _: &Table, _: Option<&Table>, _: u32) -> Result<AnalysisResult> {
        Err(Error::UnsupportedFormat(self.0))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unsupported_fails_loudly() {
        let peptides = Table::parse(TableKind::Peptide, "Peptide\nPEPTIDE\n").unwrap();
        for software in SourceSoftware::ALL.iter().skip(1) {
            let adapter = software.adapter(&Settings::default());
            match adapter.adapt(&peptides, None, 1) {
                Err(Error::UnsupportedFormat(s)) => assert_eq!(s, *software),
                other => panic!("expected UnsupportedFormat, got {:?}", other),
            }
        }
    }

    #[test]
    fn protein_table_requirement() {
        let settings = Settings::default();
        assert!(SourceSoftware::Peaks.adapter(&settings).requires_protein_table());
        assert!(!SourceSoftware::Spectronaut
            .adapter(&settings)
            .requires_protein_table());
    }
}
