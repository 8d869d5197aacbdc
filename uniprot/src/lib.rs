//! Helpers for working with UniProt-style protein identifiers as they appear
//! in search engine exports
//!
//! # Identifier format
//!
//! Exports list proteins either by bare accession or by a compound,
//! pipe-delimited FASTA identifier. Peptides shared between several proteins
//! carry a colon-separated list of identifiers.
//!
//! ```text
//! P69905
//! sp|P68871|HBB_HUMAN
//! sp|P68871|HBB_HUMAN:sp|P02042|HBD_HUMAN
//! P68871-E7V
//! ```
//!
//! # Example
//!
//! ```rust
//! # use uniprot::accession;
//! assert_eq!(accession("sp|P68871|HBB_HUMAN"), "P68871");
//! assert_eq!(accession("P69905"), "P69905");
//! ```

use memchr::{memchr, memchr_iter};

pub mod annotation;
pub mod variant;

pub use annotation::Annotation;

/// Reduce a protein identifier to its accession
///
/// Only the first entry of a colon-separated list is considered. Compound
/// identifiers are reduced to their second pipe-delimited segment; if that
/// segment is missing or empty, the whole (trimmed) entry is returned.
pub fn accession(id: &str) -> &str {
    let id = id.trim();
    let first = match memchr(b':', id.as_bytes()) {
        Some(end) => &id[..end],
        None => id,
    };

    let mut pipes = memchr_iter(b'|', first.as_bytes());
    let start = match pipes.next() {
        Some(p) => p + 1,
        None => return first.trim(),
    };
    let end = pipes.next().unwrap_or(first.len());
    let segment = first[start..end].trim();
    if segment.is_empty() {
        log::warn!("compound identifier '{}' has an empty accession segment", first);
        first.trim()
    } else {
        segment
    }
}

/// Number of proteins listed in a (possibly colon-separated) identifier
pub fn protein_count(id: &str) -> usize {
    let id = id.trim();
    if id.is_empty() {
        0
    } else {
        memchr_iter(b':', id.as_bytes()).count() + 1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bare_accession() {
        assert_eq!(accession("P69905"), "P69905");
        assert_eq!(accession("  P69905\t"), "P69905");
        assert_eq!(accession("P12345-A123B"), "P12345-A123B");
    }

    #[test]
    fn compound_identifiers() {
        assert_eq!(accession("sp|P68871|HBB_HUMAN"), "P68871");
        assert_eq!(accession("P68871|HBB_HUMAN"), "HBB_HUMAN");
        assert_eq!(accession("tr|A0A024R161|"), "A0A024R161");
        assert_eq!(accession("sp||HBB_HUMAN"), "sp||HBB_HUMAN");
    }

    #[test]
    fn shared_peptides() {
        assert_eq!(accession("sp|P68871|HBB_HUMAN:sp|P02042|HBD_HUMAN"), "P68871");
        assert_eq!(protein_count("sp|P68871|HBB_HUMAN:sp|P02042|HBD_HUMAN"), 2);
        assert_eq!(protein_count("P69905"), 1);
        assert_eq!(protein_count(""), 0);
    }
}
