use proptest::prelude::*;
use proteome::*;
use std::collections::BTreeSet;

fn sample(id: u32, accessions: &BTreeSet<String>) -> Sample {
    Sample {
        id,
        name: format!("S{}", id),
        software: SourceSoftware::Peaks,
        analysis_results: accessions
            .iter()
            .map(|acc| ProteinRecord {
                accession: acc.clone(),
                description: String::new(),
                protein_group: acc.clone(),
                average_abundance: 1.0,
                total_peptides: 1,
                unique_peptides: BTreeSet::new(),
                is_unique_group: true,
                disease_association: "N/A".into(),
                sample_id: id,
                raw_score: None,
                signals: Signals::default(),
            })
            .collect(),
        total_peptides_count: accessions.len(),
        total_proteins_count: accessions.len(),
        normalization_factor: 1.0,
        skipped_rows: 0,
    }
}

fn accessions() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[A-F][0-9]", 0..20)
}

proptest! {
    #[test]
    fn triple_is_subset_of_every_pair(a in accessions(), b in accessions(), c in accessions()) {
        let samples = [sample(1, &a), sample(2, &b), sample(3, &c)];
        let refs = samples.iter().collect::<Vec<_>>();
        let overlaps = build_overlap(&refs);

        if let Some(triple) = overlaps.iter().find(|o| o.member_sample_ids.len() == 3) {
            for pair in overlaps.iter().filter(|o| o.member_sample_ids.len() == 2) {
                prop_assert!(triple.accessions.is_subset(&pair.accessions));
            }
        }
    }

    #[test]
    fn overlaps_are_exact_intersections(a in accessions(), b in accessions(), c in accessions()) {
        let sets = [a, b, c];
        let samples = sets
            .iter()
            .enumerate()
            .map(|(i, s)| sample(i as u32 + 1, s))
            .collect::<Vec<_>>();
        let refs = samples.iter().collect::<Vec<_>>();

        for overlap in build_overlap(&refs) {
            let members = overlap
                .member_sample_ids
                .iter()
                .map(|&id| sets[id as usize - 1].clone())
                .collect::<Vec<_>>();
            prop_assert!(!overlap.accessions.is_empty());
            prop_assert_eq!(&overlap.accessions, &intersection(&members));
            for acc in &overlap.accessions {
                prop_assert!(members.iter().all(|m| m.contains(acc)));
            }
        }
    }

    #[test]
    fn venn_cells_partition_the_union(a in accessions(), b in accessions(), c in accessions()) {
        let sets = [a, b, c];
        let samples = sets
            .iter()
            .enumerate()
            .map(|(i, s)| sample(i as u32 + 1, s))
            .collect::<Vec<_>>();
        let refs = samples.iter().collect::<Vec<_>>();

        let cells = exclusive_regions(&refs);
        let total = cells.iter().map(|c| c.accessions.len()).sum::<usize>();
        let all = union(&sets);
        prop_assert_eq!(total, all.len());
        prop_assert_eq!(union(&cells.into_iter().map(|c| c.accessions).collect::<Vec<_>>()), all);
    }
}
