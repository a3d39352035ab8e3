// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DerivedFeatures, DomainError, FeatureRow, FurnishingStatus, HouseRecord, Prediction, YesNo,
    CATEGORICAL_COLUMNS, NUMERIC_COLUMNS,
};
pub use requests::PredictRequest;
pub use responses::{ErrorResponse, HealthResponse, PredictResponse, SchemaResponse};
