use std::collections::HashSet;

use super::table::RawTable;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Canonical symptom encoding
// ---------------------------------------------------------------------------

/// Cell spellings treated as "missing", which count as not present.
const MISSING_MARKERS: &[&str] = &["", "nan", "na", "n/a", "null", "none"];

/// Decode a feature cell into its canonical boolean.
///
/// * missing markers → `false`
/// * numbers → `true` iff non-zero (`NaN` is missing)
/// * `true`/`t`/`yes`/`y` and `false`/`f`/`no`/`n`, any case
///
/// Anything else is rejected so that a typo in the data cannot silently
/// switch a symptom on.
pub fn parse_flag(raw: &str) -> Option<bool> {
    let cell = raw.trim();
    let lower = cell.to_ascii_lowercase();
    if MISSING_MARKERS.contains(&lower.as_str()) {
        return Some(false);
    }
    if let Ok(v) = cell.parse::<f64>() {
        return Some(!v.is_nan() && v != 0.0);
    }
    match lower.as_str() {
        "true" | "t" | "yes" | "y" => Some(true),
        "false" | "f" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// The diagnostic label column: first header containing "disease",
/// ignoring case. Later matches are plain features.
pub fn detect_label_column(headers: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.to_lowercase().contains("disease"))
}

// ---------------------------------------------------------------------------
// FeatureColumn – one symptom column, decoded
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    /// One flag per row.
    pub values: Vec<bool>,
}

// ---------------------------------------------------------------------------
// Dataset – the immutable snapshot queries run against
// ---------------------------------------------------------------------------

/// Column-major, typed view of the loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    label_column: String,
    /// `None` where the label cell was blank.
    labels: Vec<Option<String>>,
    /// All non-label columns, original order.
    features: Vec<FeatureColumn>,
}

impl Dataset {
    /// Type a raw table: find the label column and decode every feature cell.
    ///
    /// Header names must be unique, since symptoms are selected by name.
    /// Label cells are trimmed, so `" A"` and `"A"` count as one disease.
    /// A table whose only column is the label is unusable.
    pub fn from_table(table: RawTable) -> Result<Self, LoadError> {
        let RawTable { headers, rows } = table;

        let mut seen = HashSet::new();
        if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(LoadError::DuplicateColumn { name: dup.clone() });
        }
        let label_idx = detect_label_column(&headers).ok_or_else(|| LoadError::Schema {
            columns: headers.clone(),
        })?;
        if headers.len() < 2 {
            return Err(LoadError::NoFeatureColumns {
                label: headers[label_idx].clone(),
            });
        }
        if rows.is_empty() {
            return Err(LoadError::EmptyDataset);
        }

        let mut labels = Vec::with_capacity(rows.len());
        let mut features: Vec<FeatureColumn> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != label_idx)
            .map(|(_, name)| FeatureColumn {
                name: name.clone(),
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        for (row_no, record) in rows.iter().enumerate() {
            let label = record.get(label_idx).map(str::trim).unwrap_or("");
            labels.push((!label.is_empty()).then(|| label.to_string()));

            let cells = record
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != label_idx)
                .map(|(_, cell)| cell);
            for (column, cell) in features.iter_mut().zip(cells) {
                let flag = parse_flag(cell).ok_or_else(|| LoadError::InvalidCell {
                    row: row_no + 1,
                    column: column.name.clone(),
                    value: cell.to_string(),
                })?;
                column.values.push(flag);
            }
        }

        Ok(Dataset {
            label_column: headers[label_idx].clone(),
            labels,
            features,
        })
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn labels(&self) -> &[Option<String>] {
        &self.labels
    }

    pub fn features(&self) -> &[FeatureColumn] {
        &self.features
    }

    /// Feature column names in original order.
    pub fn feature_columns(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> RawTable {
        RawTable::read_batched(text.as_bytes(), 100).unwrap()
    }

    #[test]
    fn flag_encoding() {
        for on in ["1", "1.0", " 2 ", "-1", "true", "TRUE", "Yes", "y", "t"] {
            assert_eq!(parse_flag(on), Some(true), "{on:?}");
        }
        let offs = [
            "0", "0.0", "", "  ", "NaN", "nan", "NA", "null", "None", "false", "No", "n", "F",
        ];
        for off in offs {
            assert_eq!(parse_flag(off), Some(false), "{off:?}");
        }
        for bad in ["maybe", "1x", "present"] {
            assert_eq!(parse_flag(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn label_detection_first_match_case_insensitive() {
        let headers: Vec<String> = ["fever", "Primary_DISEASE", "disease_group"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(detect_label_column(&headers), Some(1));
        assert_eq!(detect_label_column(&headers[..1]), None);
    }

    #[test]
    fn from_table_splits_label_and_features() {
        let ds = Dataset::from_table(table(
            "fever,diseases,cough\n1,A,0\n0,B,1\n1,,yes\n",
        ))
        .unwrap();

        assert_eq!(ds.label_column(), "diseases");
        assert_eq!(ds.feature_columns(), vec!["fever", "cough"]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.labels(),
            &[Some("A".to_string()), Some("B".to_string()), None]
        );
        assert_eq!(ds.features()[0].values, vec![true, false, true]);
        assert_eq!(ds.features()[1].values, vec![false, true, true]);
        assert_eq!(ds.feature_index("cough"), Some(1));
        assert_eq!(ds.feature_index("diseases"), None);
    }

    #[test]
    fn second_disease_column_is_a_feature() {
        let ds = Dataset::from_table(table("disease,heart_disease_history\nA,1\n")).unwrap();
        assert_eq!(ds.label_column(), "disease");
        assert_eq!(ds.feature_columns(), vec!["heart_disease_history"]);
    }

    #[test]
    fn missing_label_column_is_schema_error() {
        let err = Dataset::from_table(table("fever,cough\n1,0\n")).unwrap_err();
        match err {
            LoadError::Schema { columns } => assert_eq!(columns, vec!["fever", "cough"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn label_only_table_is_unusable() {
        let err = Dataset::from_table(table("disease\nA\nB\n")).unwrap_err();
        match err {
            LoadError::NoFeatureColumns { label } => assert_eq!(label, "disease"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let err = Dataset::from_table(table("disease,fever,fever\nA,1,0\n")).unwrap_err();
        match err {
            LoadError::DuplicateColumn { name } => assert_eq!(name, "fever"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn padded_labels_count_as_one() {
        let ds = Dataset::from_table(table("disease,fever\n A,1\nA ,1\n")).unwrap();
        assert_eq!(ds.labels(), &[Some("A".to_string()), Some("A".to_string())]);
    }

    #[test]
    fn header_only_is_unusable() {
        let err = Dataset::from_table(table("disease,fever\n")).unwrap_err();
        assert!(matches!(err, LoadError::EmptyDataset));
    }

    #[test]
    fn invalid_flag_names_row_and_column() {
        let err = Dataset::from_table(table("disease,fever\nA,1\nB,sometimes\n")).unwrap_err();
        match err {
            LoadError::InvalidCell { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "fever");
                assert_eq!(value, "sometimes");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
