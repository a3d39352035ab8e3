use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::config::ArtifactSettings;
use crate::core::{
    CategoricalEncoder, EncoderSpecError, LinearModel, ModelSpecError, OneHotEncoder,
    OneHotEncoderSpec, Predictor, ScalerSpec, ScalerSpecError, SchemaError,
};

/// Artifact format version this service understands
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Encoder,
    Scaler,
    Model,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Encoder => f.write_str("encoder"),
            ArtifactKind::Scaler => f.write_str("scaler"),
            ArtifactKind::Model => f.write_str("model"),
        }
    }
}

/// Errors that can occur while loading artifacts
///
/// Every variant names the artifact that failed.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read {kind} artifact at {path}: {source}")]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} artifact at {path}: {source}")]
    Parse {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} artifact at {path} has format version {found}, expected {expected}")]
    UnsupportedVersion {
        kind: ArtifactKind,
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("Invalid encoder artifact at {path}: {source}")]
    InvalidEncoder {
        path: PathBuf,
        #[source]
        source: EncoderSpecError,
    },

    #[error("Invalid scaler artifact at {path}: {source}")]
    InvalidScaler {
        path: PathBuf,
        #[source]
        source: ScalerSpecError,
    },

    #[error("Invalid model artifact at {path}: {source}")]
    InvalidModel {
        path: PathBuf,
        #[source]
        source: ModelSpecError,
    },

    #[error("{kind} artifact comes from training run '{found}', encoder comes from '{expected}'")]
    TrainingRunMismatch {
        kind: ArtifactKind,
        expected: String,
        found: String,
    },

    #[error("Artifacts do not fit together: {0}")]
    Schema(#[from] SchemaError),
}

impl ArtifactError {
    /// The artifact that failed, if the failure is attributable to one file
    pub fn kind(&self) -> Option<ArtifactKind> {
        match self {
            ArtifactError::Io { kind, .. }
            | ArtifactError::Parse { kind, .. }
            | ArtifactError::UnsupportedVersion { kind, .. }
            | ArtifactError::TrainingRunMismatch { kind, .. } => Some(*kind),
            ArtifactError::InvalidEncoder { .. } => Some(ArtifactKind::Encoder),
            ArtifactError::InvalidScaler { .. } => Some(ArtifactKind::Scaler),
            ArtifactError::InvalidModel { .. } => Some(ArtifactKind::Model),
            ArtifactError::Schema(_) => None,
        }
    }
}

/// On-disk wrapper shared by every artifact file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEnvelope<T> {
    pub format_version: u32,
    pub training_run: String,
    pub artifact: T,
}

/// The three loaded artifacts, all from one training run
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    pub training_run: String,
    pub encoder: OneHotEncoder,
    pub scaler: ScalerSpec,
    pub model: LinearModel,
}

impl ArtifactSet {
    /// Build the predictor, checking the artifacts against one another
    pub fn into_predictor(self) -> Result<Predictor, ArtifactError> {
        let predictor = Predictor::new(
            Arc::new(self.encoder) as Arc<dyn CategoricalEncoder>,
            Arc::from(self.scaler.into_scaler()),
            Arc::new(self.model),
            self.training_run,
        )?;
        Ok(predictor)
    }
}

fn read_envelope<T: DeserializeOwned>(
    kind: ArtifactKind,
    path: &Path,
) -> Result<ArtifactEnvelope<T>, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;

    let envelope: ArtifactEnvelope<T> =
        serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
            kind,
            path: path.to_path_buf(),
            source,
        })?;

    if envelope.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(ArtifactError::UnsupportedVersion {
            kind,
            path: path.to_path_buf(),
            found: envelope.format_version,
            expected: ARTIFACT_FORMAT_VERSION,
        });
    }

    tracing::debug!(
        "Read {} artifact from {} (training run {})",
        kind,
        path.display(),
        envelope.training_run
    );

    Ok(envelope)
}

/// Load and validate the encoder, scaler and model artifacts
pub fn load_artifacts(settings: &ArtifactSettings) -> Result<ArtifactSet, ArtifactError> {
    let encoder_path = Path::new(&settings.encoder_path);
    let scaler_path = Path::new(&settings.scaler_path);
    let model_path = Path::new(&settings.model_path);

    let encoder: ArtifactEnvelope<OneHotEncoderSpec> =
        read_envelope(ArtifactKind::Encoder, encoder_path)?;
    let training_run = encoder.training_run;
    let encoder = OneHotEncoder::from_spec(encoder.artifact).map_err(|source| {
        ArtifactError::InvalidEncoder {
            path: encoder_path.to_path_buf(),
            source,
        }
    })?;

    let scaler: ArtifactEnvelope<ScalerSpec> = read_envelope(ArtifactKind::Scaler, scaler_path)?;
    check_training_run(ArtifactKind::Scaler, &training_run, &scaler.training_run)?;
    scaler
        .artifact
        .validate()
        .map_err(|source| ArtifactError::InvalidScaler {
            path: scaler_path.to_path_buf(),
            source,
        })?;

    let model: ArtifactEnvelope<LinearModel> = read_envelope(ArtifactKind::Model, model_path)?;
    check_training_run(ArtifactKind::Model, &training_run, &model.training_run)?;
    model
        .artifact
        .validate()
        .map_err(|source| ArtifactError::InvalidModel {
            path: model_path.to_path_buf(),
            source,
        })?;

    Ok(ArtifactSet {
        training_run,
        encoder,
        scaler: scaler.artifact,
        model: model.artifact,
    })
}

fn check_training_run(kind: ArtifactKind, expected: &str, found: &str) -> Result<(), ArtifactError> {
    if expected != found {
        return Err(ArtifactError::TrainingRunMismatch {
            kind,
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

/// Load the artifacts and build the predictor in one step
pub fn load_predictor(settings: &ArtifactSettings) -> Result<Predictor, ArtifactError> {
    load_artifacts(settings)?.into_predictor()
}
