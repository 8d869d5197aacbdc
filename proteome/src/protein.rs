use super::*;
use serde::Serialize;

/// Canonical record for one pathogenic-variant candidate in one sample
///
/// Produced once by an [`Adapter`] and never mutated afterwards; see
/// [`Sample::renamed`] for how sample metadata changes propagate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProteinRecord {
    pub accession: String,
    pub description: String,
    pub protein_group: String,
    /// Mean normalized abundance across the accession's peptide rows
    pub average_abundance: f64,
    pub total_peptides: usize,
    /// Unique peptide sequences without flanking residues or modifications
    pub unique_peptides: BTreeSet<String>,
    /// Exactly one accession maps to `protein_group` in this sample
    pub is_unique_group: bool,
    pub disease_association: String,
    pub sample_id: u32,
    /// Score of the row that represented the protein group
    pub raw_score: Option<f64>,
    pub signals: Signals,
}

impl ProteinRecord {
    pub fn unique_peptides_count(&self) -> usize {
        self.unique_peptides.len()
    }

    /// Unique peptide sequences, joined for display
    pub fn unique_peptides_list(&self, separator: &str) -> String {
        self.unique_peptides
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Build a record from a group's representative row and the aggregate of
    /// its accession
    pub(crate) fn from_summary(
        summary: &AccessionSummary,
        representative: &Evidence,
        group: &GroupSummary,
        signals: Signals,
        sample_id: u32,
    ) -> ProteinRecord {
        ProteinRecord {
            accession: summary.accession.clone(),
            description: summary.description.clone(),
            protein_group: group.group.clone(),
            average_abundance: summary.average_abundance(),
            total_peptides: summary.peptides(),
            unique_peptides: summary.unique_peptides.clone(),
            is_unique_group: group.is_unique(),
            disease_association: uniprot::Annotation::parse(&summary.description)
                .disease_association(),
            sample_id,
            raw_score: Some(representative.score),
            signals,
        }
    }
}
