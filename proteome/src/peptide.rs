use super::*;

/// One peptide row joined against the protein table
///
/// Accessions are already reduced to their canonical form, and the
/// description is empty when the peptide's protein was not found in the
/// protein table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evidence {
    pub accession: String,
    pub description: String,
    pub protein_group: String,
    pub sequence: String,
    /// Flagged by the search engine as attributable to this protein only
    pub unique: bool,
    /// Raw (or, after [`Normalized`], scaled) area/abundance
    pub area: f64,
    /// Confidence score, only used to pick a group's representative
    pub score: f64,
}

impl Evidence {
    /// Sequence with flanking residues and modification annotations removed,
    /// e.g. `K.M(+15.99)EHK.Q` becomes `MEHK`
    pub fn stripped_sequence(&self) -> String {
        let seq = self.sequence.trim();
        let bytes = seq.as_bytes();
        let core = if bytes.len() >= 4 && bytes[1] == b'.' && bytes[bytes.len() - 2] == b'.' {
            &seq[2..seq.len() - 2]
        } else {
            seq
        };
        let mut depth = 0usize;
        core.chars()
            .filter(|&c| match c {
                '(' | '[' => {
                    depth += 1;
                    false
                }
                ')' | ']' => {
                    depth = depth.saturating_sub(1);
                    false
                }
                _ => depth == 0 && c.is_ascii_alphabetic(),
            })
            .collect()
    }
}
