//! Samples and fail-fast batch processing
use super::*;
use serde::{Deserialize, Serialize};

/// Everything that shapes how a sample is processed
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub classifier: Classifier,
    pub peaks: PeaksColumns,
    pub tie_break: TieBreak,
}

/// Raw inputs for one sample, as collected by the caller
#[derive(Clone, Debug, PartialEq)]
pub struct SampleInput {
    pub id: u32,
    pub name: String,
    pub software: SourceSoftware,
    pub peptides: Option<String>,
    pub proteins: Option<String>,
}

impl SampleInput {
    pub fn new<S: Into<String>>(id: u32, name: S, software: SourceSoftware) -> SampleInput {
        SampleInput {
            id,
            name: name.into(),
            software,
            peptides: None,
            proteins: None,
        }
    }

    pub fn peptides<S: Into<String>>(mut self, text: S) -> Self {
        self.peptides = Some(text.into());
        self
    }

    pub fn proteins<S: Into<String>>(mut self, text: S) -> Self {
        self.proteins = Some(text.into());
        self
    }

    /// Check the configuration before any parsing happens
    fn validate(&self, adapter: &dyn Adapter) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidSampleConfig("sample name is empty".into()));
        }
        if self.peptides.is_none() {
            return Err(Error::InvalidSampleConfig("no peptide file provided".into()));
        }
        if adapter.requires_protein_table() && self.proteins.is_none() {
            return Err(Error::InvalidSampleConfig(format!(
                "{} exports need a protein file",
                self.software
            )));
        }
        Ok(())
    }
}

/// A processed sample: its pathogenic-variant candidates and bookkeeping
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub id: u32,
    pub name: String,
    pub software: SourceSoftware,
    /// Candidate records, descending by average abundance
    pub analysis_results: Vec<ProteinRecord>,
    pub total_peptides_count: usize,
    pub total_proteins_count: usize,
    pub normalization_factor: f64,
    /// Rows dropped from either table for a cell count mismatch
    pub skipped_rows: usize,
}

impl Sample {
    /// Validate, parse, and adapt a single sample
    pub fn process(input: &SampleInput, settings: &Settings) -> Result<Sample> {
        let adapter = input.software.adapter(settings);
        input.validate(adapter.as_ref())?;

        let peptides = Table::parse(
            TableKind::Peptide,
            input.peptides.as_deref().unwrap_or_default(),
        )?;
        let proteins = input
            .proteins
            .as_deref()
            .map(|text| Table::parse(TableKind::Protein, text))
            .transpose()?;

        let skipped_rows =
            peptides.skipped().len() + proteins.as_ref().map(|t| t.skipped().len()).unwrap_or(0);
        let result = adapter.adapt(&peptides, proteins.as_ref(), input.id)?;

        log::info!(
            "sample {} '{}': {} candidates from {} peptides, normalization factor {:.4}",
            input.id,
            input.name,
            result.records.len(),
            result.total_peptides,
            result.normalization_factor
        );
        if skipped_rows > 0 {
            log::warn!(
                "sample {} '{}': {} malformed rows skipped",
                input.id,
                input.name,
                skipped_rows
            );
        }

        Ok(Sample {
            id: input.id,
            name: input.name.clone(),
            software: input.software,
            analysis_results: result.records,
            total_peptides_count: result.total_peptides,
            total_proteins_count: result.total_proteins,
            normalization_factor: result.normalization_factor,
            skipped_rows,
        })
    }

    pub fn get(&self, accession: &str) -> Option<&ProteinRecord> {
        self.analysis_results
            .iter()
            .find(|rec| rec.accession == accession)
    }

    /// Accessions of the sample's candidate records
    pub fn accessions(&self) -> BTreeSet<&str> {
        self.analysis_results
            .iter()
            .map(|rec| rec.accession.as_str())
            .collect()
    }

    /// Copy of this sample under a new display name
    pub fn renamed<S: Into<String>>(&self, name: S) -> Sample {
        Sample {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Copy of this sample under a new id, carried into every record
    pub fn with_id(&self, id: u32) -> Sample {
        Sample {
            id,
            analysis_results: self
                .analysis_results
                .iter()
                .map(|rec| ProteinRecord {
                    sample_id: id,
                    ..rec.clone()
                })
                .collect(),
            ..self.clone()
        }
    }
}

/// Process samples strictly in order, stopping at the first failure
pub fn process_batch(
    inputs: &[SampleInput],
    settings: &Settings,
) -> std::result::Result<Vec<Sample>, BatchError> {
    let mut ids = HashSet::new();
    let mut samples = Vec::with_capacity(inputs.len());
    for input in inputs {
        let wrap = |source| BatchError {
            sample_id: input.id,
            sample_name: input.name.clone(),
            source,
        };
        if !ids.insert(input.id) {
            return Err(wrap(Error::InvalidSampleConfig(format!(
                "sample id {} is used more than once",
                input.id
            ))));
        }
        samples.push(Sample::process(input, settings).map_err(wrap)?);
    }
    Ok(samples)
}

/// The active set of processed samples
///
/// A new batch replaces the set only if every sample in it succeeds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    pub fn run_batch(
        &mut self,
        inputs: &[SampleInput],
        settings: &Settings,
    ) -> std::result::Result<&[Sample], BatchError> {
        let batch = process_batch(inputs, settings)?;
        self.samples = batch;
        Ok(&self.samples)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, id: u32) -> Option<&Sample> {
        self.samples.iter().find(|s| s.id == id)
    }

    /// Samples with the given ids, in the order the ids are listed;
    /// unknown ids are ignored
    pub fn select(&self, ids: &[u32]) -> Vec<&Sample> {
        ids.iter().filter_map(|&id| self.get(id)).collect()
    }

    /// Replace one sample by a renamed copy
    pub fn rename<S: Into<String>>(&mut self, id: u32, name: S) -> bool {
        match self.samples.iter_mut().find(|s| s.id == id) {
            Some(sample) => {
                *sample = sample.renamed(name);
                true
            }
            None => false,
        }
    }
}
