//! Class id to name tables.
//!
//! Names come either from the `names` metadata the Ultralytics exporter
//! embeds in the ONNX file, or from a plain text file with one name per line.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from model class index to human-readable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassNames {
    names: BTreeMap<usize, String>,
}

impl ClassNames {
    /// Build from `(id, name)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, S)>,
        S: Into<String>,
    {
        Self {
            names: pairs.into_iter().map(|(id, name)| (id, name.into())).collect(),
        }
    }

    /// Read a labels file where line `n` names class `n`.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::LabelsFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self::from_lines(&contents))
    }

    /// Parse newline-separated names. Blank lines keep their index.
    pub fn from_lines(contents: &str) -> Self {
        Self::from_pairs(
            contents
                .lines()
                .enumerate()
                .filter_map(|(id, line)| {
                    let name = line.trim();
                    (!name.is_empty()).then(|| (id, name.to_string()))
                }),
        )
    }

    /// Parse the Ultralytics `names` metadata value, e.g. `{0: 'bottle', 1: 'carry_bag'}`.
    ///
    /// Returns `None` when the value is not a dictionary literal.
    pub fn from_metadata(value: &str) -> Option<Self> {
        let body = value.trim().strip_prefix('{')?.strip_suffix('}')?;

        let mut names = BTreeMap::new();
        for entry in split_top_level(body) {
            let Some((key, name)) = entry.split_once(':') else {
                continue;
            };
            let Ok(id) = key.trim().parse::<usize>() else {
                continue;
            };
            names.insert(id, unquote(name.trim()).to_string());
        }

        Some(Self { names })
    }

    /// Look up the name for a class id.
    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.names.get(&class_id).map(String::as_str)
    }

    /// Number of known classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Split on commas that are not inside a quoted string.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, ch) in body.char_indices() {
        match (quote, ch) {
            (None, '\'' | '"') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            (None, ',') => {
                parts.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);

    parts.into_iter().filter(|p| !p.trim().is_empty()).collect()
}

fn unquote(value: &str) -> &str {
    for q in ['\'', '"'] {
        if let Some(inner) = value.strip_prefix(q).and_then(|v| v.strip_suffix(q)) {
            return inner;
        }
    }
    value
}
