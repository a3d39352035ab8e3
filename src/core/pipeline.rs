use std::sync::Arc;
use thiserror::Error;

use crate::core::{
    encoder::{CategoricalEncoder, EncodeError},
    features::derive_features,
    format::format_currency,
    model::{ModelError, Regressor},
    scaler::{FeatureScaler, ScaleError},
    schema::{FeatureSchema, SchemaError},
};
use crate::models::{DomainError, HouseRecord, Prediction};

/// Errors raised by a single prediction request
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("Input outside its domain: {0}")]
    InputDomain(#[from] DomainError),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Feature assembly failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("Scaling failed: {0}")]
    Scale(#[from] ScaleError),

    #[error("Prediction failed: {0}")]
    Model(#[from] ModelError),
}

/// Prediction orchestrator over the loaded encoder, scaler and model
///
/// # Pipeline Stages
/// 1. Feature derivation
/// 2. Categorical encoding
/// 3. Feature assembly in schema order
/// 4. Scaling
/// 5. Regression
///
/// Every width the stages agree on is checked once when the predictor is
/// built, and again on each request.
#[derive(Clone)]
pub struct Predictor {
    encoder: Arc<dyn CategoricalEncoder>,
    scaler: Arc<dyn FeatureScaler>,
    model: Arc<dyn Regressor>,
    schema: FeatureSchema,
    training_run: String,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("schema", &self.schema)
            .field("training_run", &self.training_run)
            .finish()
    }
}

impl Predictor {
    /// Build a predictor, checking the scaler and model against the schema
    /// derived from the encoder
    pub fn new(
        encoder: Arc<dyn CategoricalEncoder>,
        scaler: Arc<dyn FeatureScaler>,
        model: Arc<dyn Regressor>,
        training_run: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let schema = FeatureSchema::new(encoder.feature_names_out());

        schema.verify_width("scaler", scaler.n_features_in())?;
        if let Some(names) = scaler.feature_names_in() {
            schema.verify_names("scaler", names)?;
        }

        schema.verify_width("model", model.n_features_in())?;
        if let Some(names) = model.feature_names_in() {
            schema.verify_names("model", names)?;
        }

        Ok(Self {
            encoder,
            scaler,
            model,
            schema,
            training_run: training_run.into(),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn training_run(&self) -> &str {
        &self.training_run
    }

    /// Run the full pipeline for one record
    pub fn predict(&self, record: &HouseRecord) -> Result<Prediction, PipelineError> {
        record.check_domain()?;

        let derived = derive_features(record);
        tracing::debug!("Derived features: {:?}", derived);

        let encoded = self.encoder.transform(&record.categorical_values())?;
        let row = self.schema.assemble(record, &derived, &encoded)?;

        let scaled = self.scaler.transform(&row.values)?;
        if scaled.len() != row.len() {
            return Err(SchemaError::WidthMismatch {
                stage: "scaler output",
                expected: row.len(),
                actual: scaled.len(),
            }
            .into());
        }

        let price = self.model.predict(&scaled)?;

        Ok(Prediction {
            price,
            formatted_price: format_currency(price),
            derived,
        })
    }
}
