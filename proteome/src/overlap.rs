//! Set algebra over the accessions of several samples
use super::*;
use serde::Serialize;

/// Union of any number of sets
pub fn union<T: Ord + Clone>(sets: &[BTreeSet<T>]) -> BTreeSet<T> {
    sets.iter().flat_map(|s| s.iter().cloned()).collect()
}

/// Intersection of any number of sets; the intersection of no sets is empty
pub fn intersection<T: Ord + Clone>(sets: &[BTreeSet<T>]) -> BTreeSet<T> {
    let (first, rest) = match sets.split_first() {
        Some(split) => split,
        None => return BTreeSet::new(),
    };
    first
        .iter()
        .filter(|item| rest.iter().all(|s| s.contains(item)))
        .cloned()
        .collect()
}

/// Display labels for a selection of samples, unique within the selection
///
/// A repeated name gets a ` (n)` suffix, `n` counting its occurrences.
pub fn unique_labels(samples: &[&Sample]) -> Vec<String> {
    let mut used = HashSet::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut labels = Vec::with_capacity(samples.len());
    for sample in samples {
        let count = seen.entry(sample.name.as_str()).or_insert(0);
        *count += 1;
        let mut label = match *count {
            1 => sample.name.clone(),
            n => format!("{} ({})", sample.name, n),
        };
        // a literal "Name (2)" elsewhere in the selection must not collide
        while used.contains(&label) {
            *count += 1;
            label = format!("{} ({})", sample.name, count);
        }
        used.insert(label.clone());
        labels.push(label);
    }
    labels
}

/// Accessions shared by one combination of samples
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverlapSet {
    pub member_sample_ids: Vec<u32>,
    pub labels: Vec<String>,
    pub accessions: BTreeSet<String>,
}

impl OverlapSet {
    pub fn len(&self) -> usize {
        self.accessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessions.is_empty()
    }
}

/// Index combinations of `n` items with at least `min` members, smallest
/// combinations first
fn combinations(n: usize, min: usize) -> Vec<Vec<usize>> {
    let mut combos = (1u32..(1 << n))
        .map(|mask| (0..n).filter(|i| mask & (1 << i) != 0).collect::<Vec<_>>())
        .filter(|c| c.len() >= min)
        .collect::<Vec<_>>();
    combos.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    combos
}

fn in_range(samples: &[&Sample]) -> bool {
    if (2..=3).contains(&samples.len()) {
        true
    } else {
        log::debug!(
            "overlaps need 2 or 3 samples, {} were selected",
            samples.len()
        );
        false
    }
}

/// Exact intersections for every pair of samples and, given three, for the
/// triple
///
/// Returns nothing unless 2 or 3 samples are given. Combinations without a
/// shared accession are left out.
pub fn build_overlap(samples: &[&Sample]) -> Vec<OverlapSet> {
    if !in_range(samples) {
        return Vec::new();
    }
    let labels = unique_labels(samples);
    let sets = samples.iter().map(|s| s.accessions()).collect::<Vec<_>>();

    combinations(samples.len(), 2)
        .into_iter()
        .filter_map(|combo| {
            let members = combo.iter().map(|&i| sets[i].clone()).collect::<Vec<_>>();
            let shared = intersection(&members);
            if shared.is_empty() {
                return None;
            }
            Some(OverlapSet {
                member_sample_ids: combo.iter().map(|&i| samples[i].id).collect(),
                labels: combo.iter().map(|&i| labels[i].clone()).collect(),
                accessions: shared.into_iter().map(String::from).collect(),
            })
        })
        .collect()
}

/// Venn cells: accessions found in exactly the member samples and in no
/// other selected sample, single samples included
///
/// Returns nothing unless 2 or 3 samples are given.
pub fn exclusive_regions(samples: &[&Sample]) -> Vec<OverlapSet> {
    if !in_range(samples) {
        return Vec::new();
    }
    let labels = unique_labels(samples);
    let sets = samples.iter().map(|s| s.accessions()).collect::<Vec<_>>();
    let all = union(&sets);

    combinations(samples.len(), 1)
        .into_iter()
        .filter_map(|combo| {
            let accessions = all
                .iter()
                .filter(|acc| {
                    sets.iter()
                        .enumerate()
                        .all(|(i, s)| s.contains(*acc) == combo.contains(&i))
                })
                .map(|acc| acc.to_string())
                .collect::<BTreeSet<String>>();
            if accessions.is_empty() {
                return None;
            }
            Some(OverlapSet {
                member_sample_ids: combo.iter().map(|&i| samples[i].id).collect(),
                labels: combo.iter().map(|&i| labels[i].clone()).collect(),
                accessions,
            })
        })
        .collect()
}
