use super::*;
use serde::Serialize;

/// Fixed leading columns of a comparative table; one
/// `Average Abundance (<label>)` column per sample follows
pub const FIXED_HEADERS: [&str; 7] = [
    "Protein Accession",
    "Description",
    "Disease Association",
    "# Total Peptides",
    "# Unique Peptides",
    "Is Unique Group?",
    "Unique Peptides List",
];

/// One accession across all selected samples
///
/// Details are taken from the first sample that contains the accession;
/// later samples contribute only their abundance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparativeRow {
    pub accession: String,
    pub description: String,
    pub disease_association: String,
    pub total_peptides: usize,
    pub unique_peptides: Vec<String>,
    pub is_unique_group: bool,
    /// One entry per sample; `None` means not detected, which is distinct
    /// from a measured abundance of zero
    pub abundances: Vec<Option<f64>>,
}

impl ComparativeRow {
    pub fn unique_peptides_count(&self) -> usize {
        self.unique_peptides.len()
    }
}

/// Accession by sample abundance matrix for heatmap rendering
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Heatmap<'d> {
    pub accessions: Vec<&'d str>,
    pub labels: &'d [String],
    pub cells: Vec<&'d [Option<f64>]>,
}

impl<'d> Heatmap<'d> {
    pub fn get(&self, accession: usize, sample: usize) -> Option<f64> {
        *self.cells.get(accession)?.get(sample)?
    }

    /// Matrix with undetected cells rendered as `0.0`
    pub fn dense(&self) -> Vec<Vec<f64>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|v| v.unwrap_or(0.0)).collect())
            .collect()
    }
}

/// Full outer join of the candidate records of several samples
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ComparativeDataset {
    /// Unique display label per sample, in input order
    pub labels: Vec<String>,
    pub sample_ids: Vec<u32>,
    pub headers: Vec<String>,
    /// Rows in order of first appearance across the samples
    pub rows: Vec<ComparativeRow>,
    /// Largest abundance in the dataset, for color scaling
    pub max_abundance: f64,
}

impl<'a> FromIterator<&'a Sample> for ComparativeDataset {
    /// Fewer than two samples yield an empty dataset
    fn from_iter<I: IntoIterator<Item = &'a Sample>>(iter: I) -> Self {
        let samples = iter.into_iter().collect::<Vec<&Sample>>();
        if samples.len() < 2 {
            return ComparativeDataset::default();
        }

        let labels = unique_labels(&samples);
        let n = samples.len();
        let mut rows: Vec<ComparativeRow> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for (idx, sample) in samples.iter().enumerate() {
            for rec in &sample.analysis_results {
                let row = match index.get(rec.accession.as_str()).copied() {
                    Some(r) => &mut rows[r],
                    None => {
                        index.insert(&rec.accession, rows.len());
                        rows.push(ComparativeRow {
                            accession: rec.accession.clone(),
                            description: rec.description.clone(),
                            disease_association: rec.disease_association.clone(),
                            total_peptides: rec.total_peptides,
                            unique_peptides: rec.unique_peptides.iter().cloned().collect(),
                            is_unique_group: rec.is_unique_group,
                            abundances: vec![None; n],
                        });
                        let last = rows.len() - 1;
                        &mut rows[last]
                    }
                };
                // an accession listed twice in one sample keeps its first value
                if row.abundances[idx].is_none() {
                    row.abundances[idx] = Some(rec.average_abundance);
                }
            }
        }

        let max_abundance = stats::max(
            rows.iter()
                .flat_map(|r| r.abundances.iter().flatten().copied()),
        );

        let mut headers = FIXED_HEADERS
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<String>>();
        headers.extend(labels.iter().map(|l| format!("Average Abundance ({})", l)));

        ComparativeDataset {
            labels,
            sample_ids: samples.iter().map(|s| s.id).collect(),
            headers,
            rows,
            max_abundance,
        }
    }
}

impl ComparativeDataset {
    /// Build a dataset from a selection of samples, see [`FromIterator`]
    pub fn build(samples: &[&Sample]) -> ComparativeDataset {
        samples.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of all accessions in the dataset
    pub fn accessions(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.accession.as_str()).collect()
    }

    pub fn heatmap(&self) -> Heatmap<'_> {
        Heatmap {
            accessions: self.rows.iter().map(|r| r.accession.as_str()).collect(),
            labels: &self.labels,
            cells: self.rows.iter().map(|r| r.abundances.as_slice()).collect(),
        }
    }
}
