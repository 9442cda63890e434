use std::collections::HashMap;

use serde::Serialize;

use super::model::Dataset;
use crate::error::QueryError;

/// How many labels a result keeps.
pub const MAX_RESULTS: usize = 3;

// ---------------------------------------------------------------------------
// FeatureSelection – validated symptom choice for one query
// ---------------------------------------------------------------------------

/// Non-empty set of feature columns, resolved against one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSelection {
    indices: Vec<usize>,
}

impl FeatureSelection {
    /// Resolve `names` against the dataset's feature columns.
    /// Duplicates collapse; order does not matter.
    pub fn new<S: AsRef<str>>(dataset: &Dataset, names: &[S]) -> Result<Self, QueryError> {
        if names.is_empty() {
            return Err(QueryError::EmptySelection);
        }
        let mut indices = names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                dataset
                    .feature_index(n)
                    .ok_or_else(|| QueryError::UnknownFeature(n.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        indices.sort_unstable();
        indices.dedup();
        Ok(Self { indices })
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// MatchResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchEntry {
    pub label: String,
    pub count: usize,
}

/// Top labels among matching rows, best first. Empty means no match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub entries: Vec<MatchEntry>,
}

impl MatchResult {
    /// Headline label.
    pub fn top(&self) -> Option<&MatchEntry> {
        self.entries.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Rank labels by how many rows show at least one selected symptom.
///
/// Rows with a blank label are matched but not counted. Equal counts keep
/// the order in which labels were first met.
pub fn rank(dataset: &Dataset, selection: &FeatureSelection) -> MatchResult {
    let columns: Vec<&[bool]> = selection
        .indices()
        .iter()
        .filter_map(|&i| dataset.features().get(i))
        .map(|f| f.values.as_slice())
        .collect();

    let mut tally: Vec<MatchEntry> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for (row, label) in dataset.labels().iter().enumerate() {
        let Some(label) = label.as_deref() else {
            continue;
        };
        if !columns.iter().any(|col| col[row]) {
            continue;
        }
        match slot.get(label) {
            Some(&i) => tally[i].count += 1,
            None => {
                slot.insert(label, tally.len());
                tally.push(MatchEntry {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so ties stay in first-seen order
    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally.truncate(MAX_RESULTS);

    MatchResult { entries: tally }
}
