use crate::data::model::Dataset;
use crate::data::ranker::{rank, FeatureSelection, MatchResult};
use crate::error::QueryError;

/// Handle one "Diagnose" request.
///
/// An empty symptom list is rejected before the dataset is touched. An
/// empty result is a valid "no match" outcome, not an error.
pub fn diagnose<S: AsRef<str>>(
    dataset: &Dataset,
    symptoms: &[S],
) -> Result<MatchResult, QueryError> {
    let selection = match FeatureSelection::new(dataset, symptoms) {
        Ok(sel) => sel,
        Err(e) => {
            log::warn!("Diagnosis rejected: {e}");
            return Err(e);
        }
    };

    let result = rank(dataset, &selection);
    match result.top() {
        Some(top) => log::info!(
            "Diagnosis for {} symptom(s): {} ({} matching rows)",
            selection.len(),
            top.label,
            top.count
        ),
        None => log::info!("Diagnosis for {} symptom(s): no match", selection.len()),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::RawTable;

    fn dataset() -> Dataset {
        let text = "disease,fever,cough,rash\nA,1,0,0\nB,0,1,0\nA,1,1,0\n";
        Dataset::from_table(RawTable::read_batched(text.as_bytes(), 10).unwrap()).unwrap()
    }

    #[test]
    fn empty_request_is_a_warning_not_a_scan() {
        let none: Vec<String> = Vec::new();
        assert_eq!(diagnose(&dataset(), &none), Err(QueryError::EmptySelection));
    }

    #[test]
    fn unmatched_symptom_gives_empty_result() {
        let result = diagnose(&dataset(), &["rash"]).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn headline_is_top_label() {
        let result = diagnose(&dataset(), &["fever", "cough"]).unwrap();
        assert_eq!(result.top().map(|e| e.label.as_str()), Some("A"));
        assert_eq!(result.len(), 2);
    }
}
