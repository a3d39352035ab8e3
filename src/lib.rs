//! House Price App - price estimates from pre-fitted preprocessing and regression artifacts
//!
//! This library derives the engineered house features, assembles them in the
//! exact column order the artifacts were fit on, and runs the encoder, scaler
//! and model loaded once at startup.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{derive_features, format_currency, FeatureSchema, PipelineError, Predictor};
pub use crate::models::{DerivedFeatures, FurnishingStatus, HouseRecord, Prediction, PredictRequest, YesNo};
pub use crate::services::{load_artifacts, load_predictor, ArtifactError};
