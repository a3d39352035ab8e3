use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Numeric columns of the assembled row, in the order the scaler and model were fit on
pub const NUMERIC_COLUMNS: [&str; 9] = [
    "area",
    "bedrooms",
    "bathrooms",
    "stories",
    "parking",
    "area_per_bedroom",
    "bathroom_per_bedroom",
    "good_location",
    "luxury_house",
];

/// Categorical columns handed to the encoder, in encoder input order
pub const CATEGORICAL_COLUMNS: [&str; 7] = [
    "mainroad",
    "guestroom",
    "basement",
    "hotwaterheating",
    "airconditioning",
    "prefarea",
    "furnishingstatus",
];

pub const BEDROOMS_RANGE: (u8, u8) = (1, 6);
pub const BATHROOMS_RANGE: (u8, u8) = (1, 4);
pub const STORIES_RANGE: (u8, u8) = (1, 4);
pub const PARKING_RANGE: (u8, u8) = (0, 3);

/// Binary amenity flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::Yes, YesNo::No];

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FurnishingStatus {
    #[serde(rename = "furnished")]
    Furnished,
    #[serde(rename = "semi-furnished")]
    SemiFurnished,
    #[serde(rename = "unfurnished")]
    Unfurnished,
}

impl FurnishingStatus {
    pub const ALL: [FurnishingStatus; 3] = [
        FurnishingStatus::Furnished,
        FurnishingStatus::SemiFurnished,
        FurnishingStatus::Unfurnished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FurnishingStatus::Furnished => "furnished",
            FurnishingStatus::SemiFurnished => "semi-furnished",
            FurnishingStatus::Unfurnished => "unfurnished",
        }
    }
}

impl fmt::Display for FurnishingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of raw house attributes, created per prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseRecord {
    pub area: f64,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub stories: u8,
    pub parking: u8,
    pub mainroad: YesNo,
    pub guestroom: YesNo,
    pub basement: YesNo,
    pub hotwaterheating: YesNo,
    pub airconditioning: YesNo,
    pub prefarea: YesNo,
    pub furnishingstatus: FurnishingStatus,
}

impl HouseRecord {
    /// Categorical values in `CATEGORICAL_COLUMNS` order
    pub fn categorical_values(&self) -> [&'static str; 7] {
        [
            self.mainroad.as_str(),
            self.guestroom.as_str(),
            self.basement.as_str(),
            self.hotwaterheating.as_str(),
            self.airconditioning.as_str(),
            self.prefarea.as_str(),
            self.furnishingstatus.as_str(),
        ]
    }

    /// Raw numeric values in the order of the first five `NUMERIC_COLUMNS`
    pub fn raw_numeric_values(&self) -> [f64; 5] {
        [
            self.area,
            self.bedrooms as f64,
            self.bathrooms as f64,
            self.stories as f64,
            self.parking as f64,
        ]
    }

    /// Check every raw field against its input domain
    ///
    /// Returns the first violation found.
    pub fn check_domain(&self) -> Result<(), DomainError> {
        if !self.area.is_finite() || self.area < 0.0 {
            return Err(DomainError::Area(self.area));
        }

        let ranges = [
            ("bedrooms", self.bedrooms, BEDROOMS_RANGE),
            ("bathrooms", self.bathrooms, BATHROOMS_RANGE),
            ("stories", self.stories, STORIES_RANGE),
            ("parking", self.parking, PARKING_RANGE),
        ];

        for (field, value, (min, max)) in ranges {
            if value < min || value > max {
                return Err(DomainError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }

        Ok(())
    }
}

/// A raw record field outside its input domain
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("area must be a finite number >= 0, got {0}")]
    Area(f64),

    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },
}

/// Engineered features computed from a `HouseRecord`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    #[serde(rename = "areaPerBedroom")]
    pub area_per_bedroom: f64,
    #[serde(rename = "bathroomPerBedroom")]
    pub bathroom_per_bedroom: f64,
    #[serde(rename = "goodLocation")]
    pub good_location: u8,
    #[serde(rename = "luxuryHouse")]
    pub luxury_house: u8,
}

impl DerivedFeatures {
    pub fn values(&self) -> [f64; 4] {
        [
            self.area_per_bedroom,
            self.bathroom_per_bedroom,
            self.good_location as f64,
            self.luxury_house as f64,
        ]
    }
}

/// Fully assembled feature row, ready for the scaler
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub values: Vec<f64>,
}

impl FeatureRow {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub price: f64,
    #[serde(rename = "formattedPrice")]
    pub formatted_price: String,
    pub derived: DerivedFeatures,
}
