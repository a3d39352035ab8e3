use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{FurnishingStatus, HouseRecord, YesNo};

/// Request to estimate a house price
///
/// Used both for the JSON API and for the urlencoded form submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub area: f64,
    #[validate(range(min = 1, max = 6))]
    pub bedrooms: u8,
    #[validate(range(min = 1, max = 4))]
    pub bathrooms: u8,
    #[validate(range(min = 1, max = 4))]
    pub stories: u8,
    #[validate(range(min = 0, max = 3))]
    pub parking: u8,
    pub mainroad: YesNo,
    pub guestroom: YesNo,
    pub basement: YesNo,
    pub hotwaterheating: YesNo,
    pub airconditioning: YesNo,
    pub prefarea: YesNo,
    pub furnishingstatus: FurnishingStatus,
}

/// Infinite areas pass the range rule, so they are rejected here
fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        let mut error = ValidationError::new("finite");
        error.message = Some("must be a finite number".into());
        Err(error)
    }
}

impl From<PredictRequest> for HouseRecord {
    fn from(req: PredictRequest) -> Self {
        HouseRecord {
            area: req.area,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            stories: req.stories,
            parking: req.parking,
            mainroad: req.mainroad,
            guestroom: req.guestroom,
            basement: req.basement,
            hotwaterheating: req.hotwaterheating,
            airconditioning: req.airconditioning,
            prefarea: req.prefarea,
            furnishingstatus: req.furnishingstatus,
        }
    }
}
