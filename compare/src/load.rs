//! Reads every sample's export files before any processing starts
use crate::config::{Manifest, SampleEntry};
use anyhow::{Context, Result};
use proteome::SampleInput;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

fn read(base: &Path, file: Option<&Path>, entry: &SampleEntry) -> Result<Option<String>> {
    match file {
        Some(file) => {
            let path = base.join(file);
            let text = fs::read_to_string(&path).with_context(|| {
                format!(
                    "Failed to read input of sample {} '{}': {}",
                    entry.id,
                    entry.name,
                    path.display()
                )
            })?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

/// Load the inputs of every sample in the manifest, in manifest order
///
/// Files are read in parallel; relative paths are resolved against `base`.
/// Missing file entries are passed through so that sample validation can
/// report them.
pub fn load(manifest: &Manifest, base: &Path) -> Result<Vec<SampleInput>> {
    manifest
        .samples
        .par_iter()
        .map(|entry| -> Result<SampleInput> {
            let peptides = read(base, entry.peptides.as_deref(), entry)?;
            let proteins = read(base, entry.proteins.as_deref(), entry)?;
            log::debug!("loaded sample {} '{}'", entry.id, entry.name);
            Ok(SampleInput {
                id: entry.id,
                name: entry.name.clone(),
                software: entry.software,
                peptides,
                proteins,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use proteome::SourceSoftware;
    use tempfile::tempdir;

    #[test]
    fn load_preserves_order() {
        let dir = tempdir().unwrap();
        for i in 0..8 {
            fs::write(dir.path().join(format!("{}.tsv", i)), format!("sample {}", i)).unwrap();
        }
        let mut toml = String::new();
        for i in 0..8 {
            toml.push_str(&format!(
                "[[sample]]\nid = {}\nname = \"s{}\"\nsoftware = \"peaks\"\npeptides = \"{}.tsv\"\n",
                i, i, i
            ));
        }
        let manifest = Manifest::from_str(&toml).unwrap();
        let inputs = load(&manifest, dir.path()).unwrap();

        assert_eq!(inputs.len(), 8);
        for (i, input) in inputs.iter().enumerate() {
            assert_eq!(input.id, i as u32);
            assert_eq!(input.software, SourceSoftware::Peaks);
            assert_eq!(input.peptides.as_deref(), Some(format!("sample {}", i).as_str()));
            assert!(input.proteins.is_none());
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempdir().unwrap();
        let manifest = Manifest::from_str(
            "[[sample]]\nid = 3\nname = \"gone\"\nsoftware = \"peaks\"\npeptides = \"nope.csv\"\n",
        )
        .unwrap();
        let err = load(&manifest, dir.path()).unwrap_err();
        assert!(err.to_string().contains("sample 3 'gone'"));
    }
}
