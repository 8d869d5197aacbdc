//! PEAKS Studio exports: a flat `protein-peptides` table joined with a
//! `proteins` table by accession
use super::*;

/// Column names read from the two PEAKS tables
///
/// Matching is case-insensitive. Exports with several samples per file name
/// their area columns `Area <sample>`; point `area` at the right one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeaksColumns {
    pub protein_group: String,
    pub peptide_accession: String,
    pub sequence: String,
    pub unique: String,
    pub area: String,
    pub score: String,
    pub protein_accession: String,
    pub description: String,
    pub locale: NumericLocale,
}

impl Default for PeaksColumns {
    fn default() -> PeaksColumns {
        PeaksColumns {
            protein_group: "Protein Group".into(),
            peptide_accession: "Protein Accession".into(),
            sequence: "Peptide".into(),
            unique: "Unique".into(),
            area: "Area".into(),
            score: "-10lgP".into(),
            protein_accession: "Accession".into(),
            description: "Description".into(),
            locale: NumericLocale::Dot,
        }
    }
}

impl PeaksColumns {
    fn peptide_columns(&self) -> [&str; 6] {
        [
            self.protein_group.as_str(),
            self.peptide_accession.as_str(),
            self.sequence.as_str(),
            self.unique.as_str(),
            self.area.as_str(),
            self.score.as_str(),
        ]
    }

    fn protein_columns(&self) -> [&str; 2] {
        [self.protein_accession.as_str(), self.description.as_str()]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Peaks {
    columns: PeaksColumns,
    classifier: Classifier,
    tie_break: TieBreak,
}

impl Peaks {
    pub fn new(columns: PeaksColumns, classifier: Classifier, tie_break: TieBreak) -> Peaks {
        Peaks {
            columns,
            classifier,
            tie_break,
        }
    }

    /// Check both tables before touching any rows, reporting every missing
    /// column at once
    fn validate(&self, peptides: &Table, proteins: &Table) -> Result<()> {
        let mut missing = peptides.missing(&self.columns.peptide_columns());
        missing.extend(proteins.missing(&self.columns.protein_columns()));
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }
        if peptides.is_empty() {
            return Err(Error::EmptyTable(TableKind::Peptide));
        }
        if proteins.is_empty() {
            return Err(Error::EmptyTable(TableKind::Protein));
        }
        Ok(())
    }

    /// Accession -> description, first protein row wins
    fn descriptions<'t>(&self, proteins: &'t Table) -> HashMap<&'t str, &'t str> {
        let mut map = HashMap::new();
        for row in proteins.rows() {
            let accession =
                uniprot::accession(row.get(&self.columns.protein_accession).unwrap_or_default());
            if accession.is_empty() {
                continue;
            }
            map.entry(accession)
                .or_insert_with(|| row.get(&self.columns.description).unwrap_or_default());
        }
        map
    }

    /// Join peptide rows against the protein descriptions and normalize
    fn join(&self, peptides: &Table, descriptions: &HashMap<&str, &str>) -> Normalized {
        let c = &self.columns;
        let mut unmatched = 0usize;
        let mut anonymous = 0usize;
        let mut shared = 0usize;

        let normalized = peptides
            .rows()
            .filter_map(|row| {
                let id = row.get(&c.peptide_accession)?;
                if uniprot::protein_count(id) > 1 {
                    shared += 1;
                }
                let accession = uniprot::accession(id);
                if accession.is_empty() {
                    anonymous += 1;
                    return None;
                }
                let description = match descriptions.get(accession) {
                    Some(desc) => desc.to_string(),
                    None => {
                        unmatched += 1;
                        String::new()
                    }
                };
                Some(Evidence {
                    accession: accession.into(),
                    description,
                    protein_group: row.get(&c.protein_group).unwrap_or_default().into(),
                    sequence: row.get(&c.sequence).unwrap_or_default().into(),
                    unique: row
                        .get(&c.unique)
                        .map(|u| u.eq_ignore_ascii_case("Y"))
                        .unwrap_or(false),
                    area: row.number(&c.area, c.locale),
                    score: row.number(&c.score, c.locale),
                })
            })
            .collect::<Normalized>();

        if anonymous > 0 {
            log::warn!("{} peptide rows without a protein accession were ignored", anonymous);
        }
        if shared > 0 {
            log::debug!(
                "{} shared peptide rows were attributed to their first protein",
                shared
            );
        }
        if unmatched > 0 {
            log::debug!("{} peptide rows had no matching protein row", unmatched);
        }
        normalized
    }
}

impl Adapter for Peaks {
    fn software(&self) -> SourceSoftware {
        SourceSoftware::Peaks
    }

    fn adapt(
        &self,
        peptides: &Table,
        proteins: Option<&Table>,
        sample_id: u32,
    ) -> Result<AnalysisResult> {
        let proteins = proteins.ok_or_else(|| {
            Error::InvalidSampleConfig(format!("{} exports need a protein table", self.software()))
        })?;
        self.validate(peptides, proteins)?;

        let descriptions = self.descriptions(proteins);
        let normalized = self.join(peptides, &descriptions);
        let grouped = Grouped::new(&normalized.evidence, self.tie_break);

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for group in &grouped.groups {
            let rep = &normalized.evidence[group.representative];
            let signals = self.classifier.signals(&rep.accession, &rep.description);
            if !self.classifier.policy.accepts(signals) {
                continue;
            }
            let summary = match grouped.accession(&rep.accession) {
                Some(summary) => summary,
                None => continue,
            };
            if !seen.insert(rep.accession.as_str()) {
                log::debug!(
                    "{} represents more than one protein group, keeping group {}",
                    rep.accession,
                    records
                        .iter()
                        .find(|r: &&ProteinRecord| r.accession == rep.accession)
                        .map(|r| r.protein_group.as_str())
                        .unwrap_or_default()
                );
                continue;
            }
            records.push(ProteinRecord::from_summary(
                summary, rep, group, signals, sample_id,
            ));
        }
        records.sort_by(|a, b| b.average_abundance.total_cmp(&a.average_abundance));

        Ok(AnalysisResult {
            records,
            total_peptides: normalized.evidence.len(),
            total_proteins: proteins.len(),
            total_area: normalized.total_area,
            normalization_factor: normalized.factor,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PEPTIDES: &str = "\
Protein Group,Protein ID,Protein Accession,Peptide,-10lgP,Area,Unique
1,1,sp|P12345-A123B|VAR1_HUMAN,K.VLSPADK.T,50.2,100,Y
1,1,sp|P12345-A123B|VAR1_HUMAN,R.M(+15.99)FLSFPTTK.T,45.0,300,Y
2,2,P11111,LLVVYPWTQR,60.0,200,Y
";

    const PROTEINS: &str = "\
Protein Group,Protein ID,Accession,-10lgP,Description
1,1,sp|P12345-A123B|VAR1_HUMAN,200.1,Variant protein PATHOGENIC_VARIANT Association: Anemia
2,2,P11111,150.0,normal protein
";

    fn tables(peptides: &str, proteins: &str) -> (Table, Table) {
        (
            Table::parse(TableKind::Peptide, peptides).unwrap(),
            Table::parse(TableKind::Protein, proteins).unwrap(),
        )
    }

    fn peaks() -> Peaks {
        Peaks::new(
            PeaksColumns::default(),
            Classifier::default(),
            TieBreak::FirstSeen,
        )
    }

    #[test]
    fn adapt() {
        let (pep, prot) = tables(PEPTIDES, PROTEINS);
        let result = peaks().adapt(&pep, Some(&prot), 9).unwrap();

        assert_eq!(result.total_peptides, 3);
        assert_eq!(result.total_proteins, 2);
        assert_eq!(result.total_area, 600.0);
        assert!((result.normalization_factor - 1e6 / 600.0).abs() < 1e-9);

        assert_eq!(result.records.len(), 1);
        let rec = &result.records[0];
        assert_eq!(rec.accession, "P12345-A123B");
        assert_eq!(rec.protein_group, "1");
        assert_eq!(rec.total_peptides, 2);
        assert!((rec.average_abundance - 1e6 / 3.0).abs() < 1e-6);
        assert_eq!(rec.unique_peptides_count(), 2);
        assert!(rec.unique_peptides.contains("MFLSFPTTK"));
        assert!(rec.is_unique_group);
        assert_eq!(rec.disease_association, "Anemia");
        assert_eq!(rec.raw_score, Some(50.2));
        assert_eq!(rec.sample_id, 9);
    }

    #[test]
    fn shared_peptides_go_to_the_first_protein() {
        let peptides = "Protein Group,Protein Accession,Peptide,-10lgP,Area,Unique\n\
                        1,sp|P1-A1B|V1:sp|P2-C2D|V2,PEPA,40,100,N\n\
                        1,sp|P1-A1B|V1,PEPB,30,300,Y\n";
        let proteins = "Accession,Description\n\
                        sp|P1-A1B|V1,PATHOGENIC_VARIANT\n\
                        sp|P2-C2D|V2,PATHOGENIC_VARIANT\n";
        let (pep, prot) = tables(peptides, proteins);
        let result = peaks().adapt(&pep, Some(&prot), 1).unwrap();
        assert_eq!(result.records.len(), 1);
        let rec = &result.records[0];
        assert_eq!(rec.accession, "P1-A1B");
        assert_eq!(rec.total_peptides, 2);
        assert!(rec.is_unique_group);
    }

    #[test]
    fn all_missing_columns_are_reported() {
        let (pep, prot) = tables(
            "Protein Group,Peptide,Unique\n1,PEPTIDE,Y\n",
            "Accession\nP1\n",
        );
        match peaks().adapt(&pep, Some(&prot), 1) {
            Err(Error::MissingColumns(missing)) => {
                let names = missing
                    .iter()
                    .map(|m| (m.table, m.column.as_str()))
                    .collect::<Vec<_>>();
                assert_eq!(
                    names,
                    vec![
                        (TableKind::Peptide, "Protein Accession"),
                        (TableKind::Peptide, "Area"),
                        (TableKind::Peptide, "-10lgP"),
                        (TableKind::Protein, "Description"),
                    ]
                );
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn header_only_tables_are_empty() {
        let (pep, prot) = tables(PEPTIDES.lines().next().unwrap(), PROTEINS);
        match peaks().adapt(&pep, Some(&prot), 1) {
            Err(Error::EmptyTable(TableKind::Peptide)) => {}
            other => panic!("expected EmptyTable, got {:?}", other),
        }
    }

    #[test]
    fn protein_table_is_required() {
        let (pep, _) = tables(PEPTIDES, PROTEINS);
        assert!(matches!(
            peaks().adapt(&pep, None, 1),
            Err(Error::InvalidSampleConfig(_))
        ));
    }

    #[test]
    fn decimal_comma_locale() {
        let peptides = "Protein Group;Protein Accession;Peptide;-10lgP;Area;Unique\n\
                        1;P1-A1B;PEPTIDE;40,5;12,5;Y\n";
        let proteins = "Accession;Description\nP1-A1B;PATHOGENIC_VARIANT\n";
        let (pep, prot) = tables(peptides, proteins);
        let adapter = Peaks::new(
            PeaksColumns {
                locale: NumericLocale::Comma,
                ..PeaksColumns::default()
            },
            Classifier::default(),
            TieBreak::FirstSeen,
        );
        let result = adapter.adapt(&pep, Some(&prot), 1).unwrap();
        assert_eq!(result.total_area, 12.5);
        assert_eq!(result.records[0].raw_score, Some(40.5));
    }
}
