//! Abundance normalization to a fixed per-sample total
use super::*;

/// Every sample's summed abundance is scaled to this total
pub const TARGET_TOTAL: f64 = 1e6;

/// Scaling factor that brings `total_area` to [`TARGET_TOTAL`], or `1.0`
/// when there is nothing to scale
pub fn normalization_factor(total_area: f64) -> f64 {
    if total_area > 0.0 {
        TARGET_TOTAL / total_area
    } else {
        1.0
    }
}

/// Peptide evidence whose areas have been scaled by `factor`
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Normalized {
    /// Sum of the raw areas, before scaling
    pub total_area: f64,
    pub factor: f64,
    pub evidence: Vec<Evidence>,
}

impl FromIterator<Evidence> for Normalized {
    fn from_iter<I: IntoIterator<Item = Evidence>>(iter: I) -> Self {
        let mut evidence = iter.into_iter().collect::<Vec<Evidence>>();
        let total_area = evidence.iter().map(|ev| ev.area).sum::<f64>();
        let factor = normalization_factor(total_area);
        evidence.iter_mut().for_each(|ev| ev.area *= factor);
        Normalized {
            total_area,
            factor,
            evidence,
        }
    }
}
