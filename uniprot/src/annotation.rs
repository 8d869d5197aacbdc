//! Disease annotations embedded in free-text protein descriptions
//!
//! Annotated databases append `Association:` and `ClinicalSignificance:`
//! fields to the description line, terminated by `;`, `|`, or the start of
//! the next field.
//!
//! ```text
//! Hemoglobin subunit beta PATHOGENIC_VARIANT Association: Sickle cell anemia; ClinicalSignificance: Pathogenic
//! ```

const ASSOCIATION: &str = "Association:";
const SIGNIFICANCE: &str = "ClinicalSignificance:";

/// Placeholder used when a description carries no disease annotation
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Annotation<'a> {
    pub association: Option<&'a str>,
    pub significance: Option<&'a str>,
}

impl<'a> Annotation<'a> {
    pub fn parse(description: &'a str) -> Annotation<'a> {
        Annotation {
            association: field(description, ASSOCIATION),
            significance: field(description, SIGNIFICANCE),
        }
    }

    /// Render the annotation as a single display string, `"N/A"` if empty
    pub fn disease_association(&self) -> String {
        match (self.association, self.significance) {
            (Some(a), Some(s)) => format!("{} ({})", a, s),
            (Some(a), None) => a.into(),
            (None, Some(s)) => s.into(),
            (None, None) => NOT_AVAILABLE.into(),
        }
    }
}

/// Extract the value following `marker`
fn field<'a>(description: &'a str, marker: &str) -> Option<&'a str> {
    let start = description.find(marker)? + marker.len();
    let rest = &description[start..];
    let mut end = rest.find(|c: char| c == ';' || c == '|').unwrap_or(rest.len());
    for other in &[ASSOCIATION, SIGNIFICANCE] {
        if let Some(idx) = rest[..end].find(*other) {
            end = idx;
        }
    }
    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Case-sensitive token search, used for explicit markers
pub fn contains_marker<S: AsRef<str>>(description: &str, markers: &[S]) -> bool {
    markers
        .iter()
        .map(AsRef::as_ref)
        .any(|m| !m.is_empty() && description.contains(m))
}

/// Case-insensitive keyword search
pub fn contains_keyword<S: AsRef<str>>(description: &str, keywords: &[S]) -> bool {
    let lower = description.to_lowercase();
    keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .any(|k| !k.is_empty() && lower.contains(&k))
}
