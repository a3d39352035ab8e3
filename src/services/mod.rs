// Service exports
pub mod artifacts;

pub use artifacts::{
    load_artifacts, load_predictor, ArtifactEnvelope, ArtifactError, ArtifactKind, ArtifactSet,
    ARTIFACT_FORMAT_VERSION,
};
