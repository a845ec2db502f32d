//! Scholarly work (paper) view model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A scholarly work as returned by the `/works` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// OpenAlex ID (URL form).
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub publication_year: Option<i32>,

    #[serde(default)]
    pub cited_by_count: Option<u64>,

    /// DOI in `https://doi.org/...` form.
    #[serde(default)]
    pub doi: Option<String>,

    /// Word → positions index of the abstract.
    #[serde(default)]
    pub abstract_inverted_index: Option<HashMap<String, Vec<usize>>>,
}

impl Work {
    /// Display title, falling back to "Untitled".
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.title.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }

    /// DOI without the resolver prefix.
    #[must_use]
    pub fn doi_suffix(&self) -> Option<&str> {
        self.doi.as_deref().map(|doi| {
            doi.strip_prefix("https://doi.org/")
                .or_else(|| doi.strip_prefix("http://doi.org/"))
                .unwrap_or(doi)
        })
    }

    /// Abstract text rebuilt from the inverted index.
    #[must_use]
    pub fn abstract_text(&self) -> Option<String> {
        self.abstract_inverted_index
            .as_ref()
            .map(reconstruct_abstract)
            .filter(|text| !text.is_empty())
    }
}

/// Rebuild running text from a word → positions index.
///
/// Words are placed by position and joined with single spaces. Missing
/// positions are skipped; words sharing a position appear in lexical order.
#[must_use]
pub fn reconstruct_abstract(index: &HashMap<String, Vec<usize>>) -> String {
    let mut placed: Vec<(usize, &str)> = index
        .iter()
        .flat_map(|(word, positions)| positions.iter().map(move |&p| (p, word.as_str())))
        .collect();
    placed.sort_unstable();

    placed.into_iter().map(|(_, word)| word).collect::<Vec<_>>().join(" ")
}
