//! TOML manifest describing a comparison run
//!
//! ```toml
//! [classifier]
//! policy = "lenient"
//! keywords = ["cancer", "carcinoma"]
//!
//! [peaks]
//! area = "Area Tumor"
//!
//! [output]
//! delimiter = "comma"
//! compare = [1, 2]
//!
//! [[sample]]
//! id = 1
//! name = "tumor"
//! software = "peaks"
//! peptides = "tumor/protein-peptides.csv"
//! proteins = "tumor/proteins.csv"
//! ```
use anyhow::{Context, Result};
use proteome::{Classifier, Delimiter, PeaksColumns, Settings, SourceSoftware, TieBreak};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub classifier: Classifier,
    pub peaks: PeaksColumns,
    pub tie_break: TieBreak,
    pub output: OutputConfig,
    #[serde(rename = "sample")]
    pub samples: Vec<SampleEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub delimiter: Delimiter,
    /// Ids of the samples to compare, all samples when empty
    pub compare: Vec<u32>,
}

/// One `[[sample]]` entry; file paths are relative to the manifest
#[derive(Debug, Deserialize)]
pub struct SampleEntry {
    pub id: u32,
    pub name: String,
    pub software: SourceSoftware,
    pub peptides: Option<PathBuf>,
    pub proteins: Option<PathBuf>,
}

impl Manifest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML manifest")
    }

    pub fn settings(&self) -> Settings {
        Settings {
            classifier: self.classifier.clone(),
            peaks: self.peaks.clone(),
            tie_break: self.tie_break,
        }
    }

    /// Sample ids selected for comparison, in the order they are listed
    pub fn selection(&self) -> Vec<u32> {
        if self.output.compare.is_empty() {
            self.samples.iter().map(|s| s.id).collect()
        } else {
            self.output.compare.clone()
        }
    }
}
