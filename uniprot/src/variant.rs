//! Recognition of sequence-variant accessions
//!
//! Variant isoforms are reported either with an explicit marker token
//! embedded in the accession (`VAR_012345`), or with a substitution suffix
//! appended to the canonical accession: `P12345-A123B` describes an
//! alanine to B substitution at position 123.

/// A single amino acid substitution parsed from an accession suffix
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Substitution {
    pub reference: char,
    pub position: u32,
    pub alternate: char,
}

/// Parse the `-<Letter><Digits><Letter>` suffix of an accession, if present
///
/// # Example
///
/// ```rust
/// # use uniprot::variant::*;
/// let sub = substitution("P12345-A123B").unwrap();
/// assert_eq!(sub.position, 123);
/// assert_eq!(substitution("P12345-2"), None);
/// ```
pub fn substitution(accession: &str) -> Option<Substitution> {
    let (_, suffix) = accession.trim().rsplit_once('-')?;
    let bytes = suffix.as_bytes();
    if bytes.len() < 3 {
        return None;
    }
    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    if !first.is_ascii_alphabetic() || !last.is_ascii_alphabetic() {
        return None;
    }
    let digits = suffix.get(1..suffix.len() - 1)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(Substitution {
        reference: first as char,
        position: digits.parse().ok()?,
        alternate: last as char,
    })
}

/// Does the accession carry one of `markers`, or a substitution suffix?
pub fn is_variant<S: AsRef<str>>(accession: &str, markers: &[S]) -> bool {
    markers
        .iter()
        .map(AsRef::as_ref)
        .filter(|m| !m.is_empty())
        .any(|m| accession.contains(m))
        || substitution(accession).is_some()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn substitution_suffix() {
        assert_eq!(
            substitution("P12345-A123B"),
            Some(Substitution {
                reference: 'A',
                position: 123,
                alternate: 'B'
            })
        );
        assert_eq!(substitution("P68871-E7V").map(|s| s.position), Some(7));
        // isoform numbers are not variants
        assert_eq!(substitution("P12345-2"), None);
        assert_eq!(substitution("P12345-AB"), None);
        assert_eq!(substitution("P12345-A12"), None);
        assert_eq!(substitution("P12345"), None);
        assert_eq!(substitution("P12345-A1x3B"), None);
    }

    #[test]
    fn multibyte_suffix() {
        assert_eq!(substitution("P1-é1"), None);
        assert_eq!(substitution("P1-A1é"), None);
        assert_eq!(substitution("P1-Aé1B"), None);
        assert!(!is_variant("P1-é1", &["VAR_"]));
    }

    #[test]
    fn marker_tokens() {
        let markers = ["VAR_"];
        assert!(is_variant("VAR_012345", &markers));
        assert!(is_variant("P12345-A123B", &markers));
        assert!(!is_variant("P12345", &markers));
        assert!(!is_variant("P12345", &[""]));
    }
}
