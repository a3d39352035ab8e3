use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::models::CATEGORICAL_COLUMNS;

/// Errors raised while encoding categorical columns
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("Encoder expects {expected} categorical columns, got {actual}")]
    InputWidth { expected: usize, actual: usize },

    #[error("Unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: String, value: String },
}

/// Problems with a fitted encoder found while loading it
#[derive(Debug, Error, PartialEq)]
pub enum EncoderSpecError {
    #[error("feature_names_in {actual:?} does not match expected columns {expected:?}")]
    InputColumns { expected: Vec<String>, actual: Vec<String> },

    #[error("{lists} category lists for {columns} input columns")]
    CategoryLists { lists: usize, columns: usize },

    #[error("column '{column}' has an empty vocabulary")]
    EmptyVocabulary { column: String },

    #[error("column '{column}' lists category '{category}' twice")]
    DuplicateCategory { column: String, category: String },

    #[error("{entries} drop entries for {columns} input columns")]
    DropEntries { entries: usize, columns: usize },

    #[error("dropped category '{category}' not in column '{column}'")]
    UnknownDrop { column: String, category: String },
}

/// Maps categorical columns to a fixed-width numeric representation
pub trait CategoricalEncoder: Send + Sync {
    /// Input column names, in the order `transform` expects values
    fn feature_names_in(&self) -> &[String];

    /// Output column names, in the order `transform` emits values
    fn feature_names_out(&self) -> &[String];

    fn output_width(&self) -> usize {
        self.feature_names_out().len()
    }

    fn transform(&self, values: &[&str]) -> Result<Vec<f64>, EncodeError>;
}

/// What to do with a category outside the fitted vocabulary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Reject the request
    #[default]
    Error,
    /// Emit all-zero indicators for the column
    Ignore,
}

/// On-disk form of a fitted one-hot encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoderSpec {
    pub feature_names_in: Vec<String>,
    pub categories: Vec<Vec<String>>,
    /// Per input column, the category whose indicator was dropped at fit time
    #[serde(default)]
    pub drop: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub handle_unknown: UnknownCategoryPolicy,
}

/// One-hot encoder with a vocabulary fixed at fit time
#[derive(Debug, Clone)]
pub struct OneHotEncoder {
    feature_names_in: Vec<String>,
    categories: Vec<Vec<String>>,
    dropped: Vec<Option<usize>>,
    handle_unknown: UnknownCategoryPolicy,
    feature_names_out: Vec<String>,
}

impl OneHotEncoder {
    /// Validate a fitted spec and precompute the output columns
    ///
    /// The input columns must be the house categorical columns in encoder order.
    pub fn from_spec(spec: OneHotEncoderSpec) -> Result<Self, EncoderSpecError> {
        let expected: Vec<&str> = CATEGORICAL_COLUMNS.to_vec();
        if spec.feature_names_in != expected {
            return Err(EncoderSpecError::InputColumns {
                expected: expected.iter().map(|c| c.to_string()).collect(),
                actual: spec.feature_names_in,
            });
        }

        if spec.categories.len() != spec.feature_names_in.len() {
            return Err(EncoderSpecError::CategoryLists {
                lists: spec.categories.len(),
                columns: spec.feature_names_in.len(),
            });
        }

        for (column, vocabulary) in spec.feature_names_in.iter().zip(&spec.categories) {
            if vocabulary.is_empty() {
                return Err(EncoderSpecError::EmptyVocabulary {
                    column: column.clone(),
                });
            }
            let mut seen = HashSet::new();
            for category in vocabulary {
                if !seen.insert(category.as_str()) {
                    return Err(EncoderSpecError::DuplicateCategory {
                        column: column.clone(),
                        category: category.clone(),
                    });
                }
            }
        }

        let dropped = match &spec.drop {
            None => vec![None; spec.categories.len()],
            Some(drop) => {
                if drop.len() != spec.categories.len() {
                    return Err(EncoderSpecError::DropEntries {
                        entries: drop.len(),
                        columns: spec.categories.len(),
                    });
                }
                drop.iter()
                    .zip(&spec.categories)
                    .zip(&spec.feature_names_in)
                    .map(|((entry, vocabulary), column)| match entry {
                        None => Ok(None),
                        Some(category) => vocabulary
                            .iter()
                            .position(|c| c == category)
                            .map(Some)
                            .ok_or_else(|| EncoderSpecError::UnknownDrop {
                                column: column.clone(),
                                category: category.clone(),
                            }),
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let mut feature_names_out = Vec::new();
        for ((column, vocabulary), drop_idx) in spec
            .feature_names_in
            .iter()
            .zip(&spec.categories)
            .zip(&dropped)
        {
            for (idx, category) in vocabulary.iter().enumerate() {
                if Some(idx) != *drop_idx {
                    feature_names_out.push(format!("{}_{}", column, category));
                }
            }
        }

        Ok(Self {
            feature_names_in: spec.feature_names_in,
            categories: spec.categories,
            dropped,
            handle_unknown: spec.handle_unknown,
            feature_names_out,
        })
    }

    pub fn handle_unknown(&self) -> UnknownCategoryPolicy {
        self.handle_unknown
    }
}

impl CategoricalEncoder for OneHotEncoder {
    fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    fn feature_names_out(&self) -> &[String] {
        &self.feature_names_out
    }

    fn transform(&self, values: &[&str]) -> Result<Vec<f64>, EncodeError> {
        if values.len() != self.categories.len() {
            return Err(EncodeError::InputWidth {
                expected: self.categories.len(),
                actual: values.len(),
            });
        }

        let mut encoded = Vec::with_capacity(self.feature_names_out.len());

        for (((value, vocabulary), drop_idx), column) in values
            .iter()
            .zip(&self.categories)
            .zip(&self.dropped)
            .zip(&self.feature_names_in)
        {
            let hit = vocabulary.iter().position(|c| c == value);

            if hit.is_none() {
                match self.handle_unknown {
                    UnknownCategoryPolicy::Error => {
                        return Err(EncodeError::UnknownCategory {
                            column: column.clone(),
                            value: value.to_string(),
                        });
                    }
                    UnknownCategoryPolicy::Ignore => {
                        tracing::warn!(
                            "Unknown category '{}' for column '{}', encoding as all zeros",
                            value,
                            column
                        );
                    }
                }
            }

            for idx in 0..vocabulary.len() {
                if Some(idx) == *drop_idx {
                    continue;
                }
                encoded.push(if Some(idx) == hit { 1.0 } else { 0.0 });
            }
        }

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes_no() -> Vec<String> {
        vec!["no".to_string(), "yes".to_string()]
    }

    fn create_spec() -> OneHotEncoderSpec {
        let mut categories = vec![yes_no(); 6];
        categories.push(vec![
            "furnished".to_string(),
            "semi-furnished".to_string(),
            "unfurnished".to_string(),
        ]);
        OneHotEncoderSpec {
            feature_names_in: CATEGORICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            categories,
            drop: None,
            handle_unknown: UnknownCategoryPolicy::Error,
        }
    }

    const SAMPLE: [&str; 7] = ["yes", "no", "no", "no", "yes", "yes", "furnished"];

    #[test]
    fn test_feature_names_out() {
        let encoder = OneHotEncoder::from_spec(create_spec()).unwrap();
        assert_eq!(encoder.output_width(), 15);
        assert_eq!(encoder.feature_names_out()[0], "mainroad_no");
        assert_eq!(encoder.feature_names_out()[1], "mainroad_yes");
        assert_eq!(encoder.feature_names_out()[13], "furnishingstatus_semi-furnished");
    }

    #[test]
    fn test_transform_one_hot() {
        let encoder = OneHotEncoder::from_spec(create_spec()).unwrap();
        let encoded = encoder.transform(&SAMPLE).unwrap();

        assert_eq!(encoded.len(), 15);
        assert_eq!(&encoded[0..2], &[0.0, 1.0]);
        assert_eq!(&encoded[2..4], &[1.0, 0.0]);
        assert_eq!(&encoded[12..15], &[1.0, 0.0, 0.0]);
        assert_eq!(encoded.iter().sum::<f64>(), 7.0);
    }

    #[test]
    fn test_drop_first() {
        let mut spec = create_spec();
        spec.drop = Some(
            spec.categories
                .iter()
                .map(|vocabulary| Some(vocabulary[0].clone()))
                .collect(),
        );
        let encoder = OneHotEncoder::from_spec(spec).unwrap();

        assert_eq!(encoder.output_width(), 8);
        assert_eq!(encoder.feature_names_out()[0], "mainroad_yes");

        let encoded = encoder.transform(&SAMPLE).unwrap();
        assert_eq!(encoded, vec![1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut spec = create_spec();
        spec.categories[6] = vec!["furnished".to_string(), "unfurnished".to_string()];
        let encoder = OneHotEncoder::from_spec(spec).unwrap();

        let mut values = SAMPLE;
        values[6] = "semi-furnished";

        let err = encoder.transform(&values).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                column: "furnishingstatus".to_string(),
                value: "semi-furnished".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_category_ignored() {
        let mut spec = create_spec();
        spec.categories[6] = vec!["furnished".to_string(), "unfurnished".to_string()];
        spec.handle_unknown = UnknownCategoryPolicy::Ignore;
        let encoder = OneHotEncoder::from_spec(spec).unwrap();

        let mut values = SAMPLE;
        values[6] = "semi-furnished";

        let encoded = encoder.transform(&values).unwrap();
        assert_eq!(encoded.len(), 14);
        assert_eq!(&encoded[12..14], &[0.0, 0.0]);
    }

    #[test]
    fn test_input_width_mismatch() {
        let encoder = OneHotEncoder::from_spec(create_spec()).unwrap();
        let err = encoder.transform(&SAMPLE[..6]).unwrap_err();
        assert_eq!(err, EncodeError::InputWidth { expected: 7, actual: 6 });
    }

    #[test]
    fn test_invalid_specs() {
        let mut spec = create_spec();
        spec.feature_names_in.swap(0, 1);
        assert!(matches!(
            OneHotEncoder::from_spec(spec),
            Err(EncoderSpecError::InputColumns { .. })
        ));

        let mut spec = create_spec();
        spec.categories[0] = vec!["yes".to_string(), "yes".to_string()];
        assert_eq!(
            OneHotEncoder::from_spec(spec).unwrap_err(),
            EncoderSpecError::DuplicateCategory {
                column: "mainroad".to_string(),
                category: "yes".to_string(),
            }
        );

        let mut spec = create_spec();
        spec.categories.pop();
        assert_eq!(
            OneHotEncoder::from_spec(spec).unwrap_err(),
            EncoderSpecError::CategoryLists { lists: 6, columns: 7 }
        );

        let mut spec = create_spec();
        spec.categories[3].clear();
        assert!(matches!(
            OneHotEncoder::from_spec(spec),
            Err(EncoderSpecError::EmptyVocabulary { .. })
        ));

        let mut spec = create_spec();
        spec.drop = Some(vec![None; 6]);
        assert_eq!(
            OneHotEncoder::from_spec(spec).unwrap_err(),
            EncoderSpecError::DropEntries { entries: 6, columns: 7 }
        );

        let mut spec = create_spec();
        spec.drop = Some(vec![Some("maybe".to_string()); 7]);
        assert!(matches!(
            OneHotEncoder::from_spec(spec),
            Err(EncoderSpecError::UnknownDrop { .. })
        ));
    }
}
