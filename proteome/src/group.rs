//! Protein-group uniqueness, unique-peptide aggregation, and representative
//! selection
//!
//! All of these are derived from a single pass over the normalized evidence,
//! folding each row into per-accession and per-group aggregates.
use super::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How to pick between two rows of a protein group with equal scores
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The row seen first in the peptide table wins
    #[default]
    FirstSeen,
    /// The row with the lexically smallest accession wins
    Accession,
}

impl TieBreak {
    /// Should `candidate` replace `current` as a group's representative?
    fn prefers(self, candidate: &Evidence, current: &Evidence) -> bool {
        match candidate.score.total_cmp(&current.score) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self {
                TieBreak::FirstSeen => false,
                TieBreak::Accession => candidate.accession < current.accession,
            },
        }
    }
}

/// Everything observed for one accession in a sample
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccessionSummary {
    pub accession: String,
    pub description: String,
    /// Normalized abundance of every peptide row of this accession
    pub abundances: Vec<f64>,
    /// Sequences of the rows flagged unique, stripped of flanking residues
    /// and modifications, so `K.PEPA.R` and `PEPA` are one entry
    pub unique_peptides: BTreeSet<String>,
}

impl AccessionSummary {
    pub fn new(accession: String, description: String) -> AccessionSummary {
        AccessionSummary {
            accession,
            description,
            abundances: Vec::new(),
            unique_peptides: BTreeSet::new(),
        }
    }

    pub fn peptides(&self) -> usize {
        self.abundances.len()
    }

    pub fn average_abundance(&self) -> f64 {
        stats::mean(&self.abundances)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupSummary {
    pub group: String,
    pub accessions: BTreeSet<String>,
    /// Index of the best-scoring evidence row of the group
    pub representative: usize,
}

impl GroupSummary {
    /// A group is unique iff exactly one accession maps to it
    pub fn is_unique(&self) -> bool {
        self.accessions.len() == 1
    }
}

/// Evidence of one sample aggregated by accession and by protein group
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grouped {
    pub accessions: HashMap<String, AccessionSummary>,
    /// Groups in order of first appearance
    pub groups: Vec<GroupSummary>,
    index: HashMap<String, usize>,
}

impl Grouped {
    pub fn new(evidence: &[Evidence], tie_break: TieBreak) -> Grouped {
        let mut grouped = Grouped::default();

        for (idx, ev) in evidence.iter().enumerate() {
            let summary = grouped
                .accessions
                .entry(ev.accession.clone())
                .or_insert_with(|| AccessionSummary::new(ev.accession.clone(), String::new()));
            if summary.description.is_empty() {
                summary.description = ev.description.clone();
            }
            summary.abundances.push(ev.area);
            if ev.unique {
                let seq = ev.stripped_sequence();
                if !seq.is_empty() {
                    summary.unique_peptides.insert(seq);
                }
            }

            match grouped.index.get(&ev.protein_group) {
                Some(&g) => {
                    let group = &mut grouped.groups[g];
                    group.accessions.insert(ev.accession.clone());
                    if tie_break.prefers(ev, &evidence[group.representative]) {
                        group.representative = idx;
                    }
                }
                None => {
                    grouped
                        .index
                        .insert(ev.protein_group.clone(), grouped.groups.len());
                    grouped.groups.push(GroupSummary {
                        group: ev.protein_group.clone(),
                        accessions: std::iter::once(ev.accession.clone()).collect(),
                        representative: idx,
                    });
                }
            }
        }

        log::debug!(
            "{} accessions in {} protein groups ({} unique)",
            grouped.accessions.len(),
            grouped.groups.len(),
            grouped.groups.iter().filter(|g| g.is_unique()).count()
        );
        grouped
    }

    pub fn group(&self, group: &str) -> Option<&GroupSummary> {
        self.groups.get(*self.index.get(group)?)
    }

    pub fn accession(&self, accession: &str) -> Option<&AccessionSummary> {
        self.accessions.get(accession)
    }

    pub fn is_unique_group(&self, group: &str) -> bool {
        self.group(group).map(GroupSummary::is_unique).unwrap_or(false)
    }
}
