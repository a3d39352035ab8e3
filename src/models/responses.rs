use serde::{Deserialize, Serialize};
use crate::models::domain::DerivedFeatures;

/// Response for the predict endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub price: f64,
    #[serde(rename = "formattedPrice")]
    pub formatted_price: String,
    pub derived: DerivedFeatures,
}

/// Response for the schema endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaResponse {
    #[serde(rename = "trainingRun")]
    pub training_run: String,
    pub columns: Vec<String>,
    pub width: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(rename = "trainingRun")]
    pub training_run: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
