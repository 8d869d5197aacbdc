//! Normalization, classification, and cross-sample comparison of
//! proteomics search engine exports.
//!
//! This library's API is based around several types that form
//! a data analysis pipeline.
//!
//! Raw export text is parsed into a [`Table`], and a pair of peptide and
//! protein tables is handed to the [`Adapter`] for the software that
//! produced them, yielding a [`Sample`] of canonical [`ProteinRecord`]s
//! restricted to pathogenic-variant candidates.
//!
//! ```rust,ignore
//! # use proteome::*;
//! let input = SampleInput::new(1, "patient_a", SourceSoftware::Peaks)
//!     .peptides(peptide_text)
//!     .proteins(protein_text);
//! let sample = Sample::process(&input, &Settings::default())?;
//! ```
//!
//! Batches of samples are processed in order, failing fast on the first
//! sample that cannot be processed. A [`SampleSet`] keeps the last batch
//! that completed successfully.
//!
//! ```rust,ignore
//! # use proteome::*;
//! let mut set = SampleSet::default();
//! set.run_batch(&inputs, &Settings::default())?;
//! ```
//!
//! Any selection of samples can then be joined into a
//! [`ComparativeDataset`], one row per accession observed in at least one
//! sample, or intersected into [`OverlapSet`]s for pairwise and triple
//! Venn diagrams.
//!
//! ```rust,ignore
//! # use proteome::*;
//! let selected = set.select(&[1, 2, 3]);
//! let table = selected.iter().copied().collect::<ComparativeDataset>();
//! table.write("comparison.tsv", Delimiter::Tab)?;
//!
//! let overlaps = build_overlap(&selected);
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::iter::FromIterator;

mod adapter;
mod aggregate;
mod classify;
mod error;
mod export;
mod group;
mod normalize;
mod overlap;
mod parser;
mod peptide;
mod protein;
mod sample;
mod stats;

pub use adapter::{Adapter, AnalysisResult, PeaksColumns, SourceSoftware};
pub use aggregate::{ComparativeDataset, ComparativeRow, Heatmap};
pub use classify::{Classifier, Policy, Signals};
pub use error::{BatchError, Error, MissingColumn, Result};
pub use export::{write_delimited, Delimiter};
pub use group::{AccessionSummary, GroupSummary, Grouped, TieBreak};
pub use normalize::{normalization_factor, Normalized, TARGET_TOTAL};
pub use overlap::{
    build_overlap, exclusive_regions, intersection, union, unique_labels, OverlapSet,
};
pub use parser::{coerce, NumericLocale, Row, SkippedRow, Table, TableKind};
pub use peptide::Evidence;
pub use protein::ProteinRecord;
pub use sample::{process_batch, Sample, SampleInput, SampleSet, Settings};
