use thiserror::Error;

use crate::models::{DerivedFeatures, FeatureRow, HouseRecord, NUMERIC_COLUMNS};

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Encoder produced {actual} columns, schema expects {expected}")]
    EncodedWidth { expected: usize, actual: usize },

    #[error("{stage} expects {actual} features, schema has {expected}")]
    WidthMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} column {position} is '{actual}', schema has '{expected}'")]
    ColumnMismatch {
        stage: &'static str,
        position: usize,
        expected: String,
        actual: String,
    },
}

/// Ordered list of assembled column names
///
/// The nine numeric columns come first, followed by the encoder output
/// columns in the encoder's own order. The scaler and model must have been
/// fit on exactly this order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub fn new(encoded_columns: &[String]) -> Self {
        let columns = NUMERIC_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(encoded_columns.iter().cloned())
            .collect();

        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn encoded_width(&self) -> usize {
        self.columns.len() - NUMERIC_COLUMNS.len()
    }

    /// Concatenate raw numeric, derived and encoded values in schema order
    pub fn assemble(
        &self,
        record: &HouseRecord,
        derived: &DerivedFeatures,
        encoded: &[f64],
    ) -> Result<FeatureRow, SchemaError> {
        if encoded.len() != self.encoded_width() {
            return Err(SchemaError::EncodedWidth {
                expected: self.encoded_width(),
                actual: encoded.len(),
            });
        }

        let mut values = Vec::with_capacity(self.width());
        values.extend_from_slice(&record.raw_numeric_values());
        values.extend_from_slice(&derived.values());
        values.extend_from_slice(encoded);

        debug_assert_eq!(values.len(), self.width());

        Ok(FeatureRow { values })
    }

    pub fn verify_width(&self, stage: &'static str, width: usize) -> Result<(), SchemaError> {
        if width != self.width() {
            return Err(SchemaError::WidthMismatch {
                stage,
                expected: self.width(),
                actual: width,
            });
        }
        Ok(())
    }

    /// Check column names an artifact recorded at fit time against the schema
    pub fn verify_names(&self, stage: &'static str, names: &[String]) -> Result<(), SchemaError> {
        self.verify_width(stage, names.len())?;

        match self
            .columns
            .iter()
            .zip(names)
            .position(|(expected, actual)| expected != actual)
        {
            Some(position) => Err(SchemaError::ColumnMismatch {
                stage,
                position,
                expected: self.columns[position].clone(),
                actual: names[position].clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FurnishingStatus, YesNo};

    fn encoded_columns() -> Vec<String> {
        vec!["mainroad_no".to_string(), "mainroad_yes".to_string()]
    }

    fn create_record() -> HouseRecord {
        HouseRecord {
            area: 6000.0,
            bedrooms: 2,
            bathrooms: 1,
            stories: 3,
            parking: 0,
            mainroad: YesNo::No,
            guestroom: YesNo::No,
            basement: YesNo::Yes,
            hotwaterheating: YesNo::No,
            airconditioning: YesNo::No,
            prefarea: YesNo::No,
            furnishingstatus: FurnishingStatus::Unfurnished,
        }
    }

    #[test]
    fn test_column_order() {
        let schema = FeatureSchema::new(&encoded_columns());
        assert_eq!(schema.width(), 11);
        assert_eq!(schema.encoded_width(), 2);
        assert_eq!(schema.columns()[0], "area");
        assert_eq!(schema.columns()[8], "luxury_house");
        assert_eq!(schema.columns()[9], "mainroad_no");
    }

    #[test]
    fn test_assemble() {
        let schema = FeatureSchema::new(&encoded_columns());
        let derived = DerivedFeatures {
            area_per_bedroom: 3000.0,
            bathroom_per_bedroom: 0.5,
            good_location: 0,
            luxury_house: 0,
        };

        let row = schema.assemble(&create_record(), &derived, &[1.0, 0.0]).unwrap();
        assert_eq!(
            row.values,
            vec![6000.0, 2.0, 1.0, 3.0, 0.0, 3000.0, 0.5, 0.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn test_assemble_rejects_wrong_encoded_width() {
        let schema = FeatureSchema::new(&encoded_columns());
        let derived = DerivedFeatures {
            area_per_bedroom: 3000.0,
            bathroom_per_bedroom: 0.5,
            good_location: 0,
            luxury_house: 0,
        };

        let err = schema.assemble(&create_record(), &derived, &[1.0]).unwrap_err();
        assert_eq!(err, SchemaError::EncodedWidth { expected: 2, actual: 1 });
    }

    #[test]
    fn test_verify_names() {
        let schema = FeatureSchema::new(&encoded_columns());
        assert!(schema.verify_names("scaler", schema.columns()).is_ok());

        let mut swapped = schema.columns().to_vec();
        swapped.swap(0, 1);
        let err = schema.verify_names("scaler", &swapped).unwrap_err();
        assert!(matches!(err, SchemaError::ColumnMismatch { position: 0, .. }));

        let short = &schema.columns()[..10];
        assert!(matches!(
            schema.verify_names("model", short),
            Err(SchemaError::WidthMismatch { expected: 11, actual: 10, .. })
        ));
    }
}
