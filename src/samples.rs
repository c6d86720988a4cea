//! Posterior sample files.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use cageside_hdi::SampleSet;

/// Name given to an unnamed series.
pub const DEFAULT_SERIES: &str = "samples";

/// One series: flat draws or chains of draws.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeriesJson {
    Flat(Vec<f64>),
    Nested(Vec<Vec<f64>>),
}

/// A whole samples document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SamplesJson {
    Series(SeriesJson),
    Named(BTreeMap<String, SeriesJson>),
}

impl SeriesJson {
    fn into_sample_set(self) -> Result<SampleSet, cageside_hdi::HdiError> {
        match self {
            Self::Flat(v) => SampleSet::new(&v),
            Self::Nested(rows) => SampleSet::from_nested(rows),
        }
    }
}

/// Parses a samples document into named sample sets.
///
/// Accepts a flat array, an array of arrays (flattened), or an object
/// mapping series names to either form. Unnamed input is returned under
/// [`DEFAULT_SERIES`].
pub fn parse_samples(json: &str) -> Result<BTreeMap<String, SampleSet>> {
    let doc: SamplesJson = serde_json::from_str(json)
        .context("samples must be an array, an array of arrays, or an object of those")?;
    let named = match doc {
        SamplesJson::Series(s) => BTreeMap::from([(DEFAULT_SERIES.to_string(), s)]),
        SamplesJson::Named(m) => m,
    };
    named
        .into_iter()
        .map(|(name, series)| {
            let set = series
                .into_sample_set()
                .with_context(|| format!("invalid samples in series {name:?}"))?;
            Ok::<_, anyhow::Error>((name, set))
        })
        .collect()
}

/// Reads and parses a samples JSON file.
pub fn read_samples(path: &Path) -> Result<BTreeMap<String, SampleSet>> {
    info!(path = %path.display(), "reading samples");
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read samples file: {}", path.display()))?;
    let sets = parse_samples(&json)
        .with_context(|| format!("failed to parse samples file: {}", path.display()))?;
    info!(n_series = sets.len(), "samples loaded");
    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flat_array() {
        let sets = parse_samples("[0.3, 0.1, 0.2]").unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[DEFAULT_SERIES].sorted(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn nested_arrays_flatten() {
        let sets = parse_samples("[[0.9, 0.1], [], [0.5]]").unwrap();
        assert_eq!(sets[DEFAULT_SERIES].sorted(), &[0.1, 0.5, 0.9]);
    }

    #[test]
    fn empty_array_is_empty_set() {
        let sets = parse_samples("[]").unwrap();
        assert!(sets[DEFAULT_SERIES].is_empty());
    }

    #[test]
    fn named_series() {
        let sets = parse_samples(r#"{"blue_win": [0.6, 0.7], "finish": [[0.2], [0.4, 0.3]]}"#).unwrap();
        assert_eq!(sets.keys().collect::<Vec<_>>(), vec!["blue_win", "finish"]);
        assert_eq!(sets["finish"].len(), 3);
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(parse_samples(r#"{"a": "b"}"#).is_err());
        assert!(parse_samples("3.0").is_err());
    }

    #[test]
    fn read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[0.5, 0.25]").unwrap();
        let sets = read_samples(file.path()).unwrap();
        assert_eq!(sets[DEFAULT_SERIES].sorted(), &[0.25, 0.5]);
    }
}
