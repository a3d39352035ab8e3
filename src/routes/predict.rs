use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{EncodeError, ModelError, PipelineError, Predictor};
use crate::models::{
    ErrorResponse, HealthResponse, HouseRecord, PredictRequest, PredictResponse, SchemaResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

/// Configure the JSON API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schema", web::get().to(get_schema))
        .route("/predict", web::post().to(predict));
}

/// HTTP status for a failed prediction
///
/// Unseen categories and inputs large enough to push the price past `f64`
/// are the caller's problem. Everything else means the loaded artifacts or an
/// upstream invariant are broken.
pub fn status_for(err: &PipelineError) -> StatusCode {
    match err {
        PipelineError::Encode(EncodeError::UnknownCategory { .. })
        | PipelineError::Model(ModelError::NonFinite(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::InputDomain(_)
        | PipelineError::Encode(_)
        | PipelineError::Schema(_)
        | PipelineError::Scale(_)
        | PipelineError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_label(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::InputDomain(_) => "input_domain",
        PipelineError::Encode(EncodeError::UnknownCategory { .. }) => "unknown_category",
        PipelineError::Encode(_) => "encoding_failed",
        PipelineError::Schema(_) => "schema_mismatch",
        PipelineError::Scale(_) => "scaling_failed",
        PipelineError::Model(ModelError::NonFinite(_)) => "prediction_out_of_range",
        PipelineError::Model(_) => "prediction_failed",
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        training_run: state.predictor.training_run().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Assembled feature columns, in the order the scaler and model consume them
async fn get_schema(state: web::Data<AppState>) -> impl Responder {
    let schema = state.predictor.schema();
    HttpResponse::Ok().json(SchemaResponse {
        training_run: state.predictor.training_run().to_string(),
        columns: schema.columns().to_vec(),
        width: schema.width(),
    })
}

/// Predict endpoint
///
/// POST /api/v1/predict
///
/// Request body:
/// ```json
/// {
///   "area": 5000,
///   "bedrooms": 3,
///   "bathrooms": 2,
///   "stories": 2,
///   "parking": 2,
///   "mainroad": "yes",
///   "guestroom": "no",
///   "basement": "no",
///   "hotwaterheating": "no",
///   "airconditioning": "yes",
///   "prefarea": "yes",
///   "furnishingstatus": "furnished"
/// }
/// ```
async fn predict(state: web::Data<AppState>, req: web::Json<PredictRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for predict request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4().to_string();
    let record = HouseRecord::from(req.into_inner());

    tracing::debug!("Predict request {}: {:?}", request_id, record);

    match state.predictor.predict(&record) {
        Ok(prediction) => {
            tracing::info!(
                "Prediction {}: {} (area={}, bedrooms={})",
                request_id,
                prediction.formatted_price,
                record.area,
                record.bedrooms
            );

            HttpResponse::Ok().json(PredictResponse {
                request_id,
                price: prediction.price,
                formatted_price: prediction.formatted_price,
                derived: prediction.derived,
            })
        }
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                tracing::error!("Prediction {} failed: {}", request_id, e);
            } else {
                tracing::info!("Prediction {} rejected: {}", request_id, e);
            }

            HttpResponse::build(status).json(ErrorResponse {
                error: error_label(&e).to_string(),
                message: e.to_string(),
                status_code: status.as_u16(),
            })
        }
    }
}
