use crate::models::{DerivedFeatures, HouseRecord};

/// Minimum counts a house needs to be considered luxury
pub const LUXURY_MIN_BEDROOMS: u8 = 3;
pub const LUXURY_MIN_BATHROOMS: u8 = 2;
pub const LUXURY_MIN_STORIES: u8 = 2;
pub const LUXURY_MIN_PARKING: u8 = 2;
/// Area must be strictly greater than this
pub const LUXURY_AREA_THRESHOLD: f64 = 8000.0;

/// Compute the engineered features for a record
///
/// Features are computed in a fixed order, each depending only on raw fields:
/// 1. `area_per_bedroom`
/// 2. `bathroom_per_bedroom`
/// 3. `good_location`
/// 4. `luxury_house`
///
/// The record must satisfy its input domain; in particular `bedrooms >= 1`.
pub fn derive_features(record: &HouseRecord) -> DerivedFeatures {
    debug_assert!(record.bedrooms >= 1, "bedrooms must be >= 1");

    let bedrooms = record.bedrooms as f64;

    DerivedFeatures {
        area_per_bedroom: record.area / bedrooms,
        bathroom_per_bedroom: record.bathrooms as f64 / bedrooms,
        good_location: is_good_location(record) as u8,
        luxury_house: is_luxury_house(record) as u8,
    }
}

/// Main road access and preferred area
#[inline]
pub fn is_good_location(record: &HouseRecord) -> bool {
    record.mainroad.is_yes() && record.prefarea.is_yes()
}

#[inline]
pub fn is_luxury_house(record: &HouseRecord) -> bool {
    record.bedrooms >= LUXURY_MIN_BEDROOMS
        && record.bathrooms >= LUXURY_MIN_BATHROOMS
        && record.stories >= LUXURY_MIN_STORIES
        && record.parking >= LUXURY_MIN_PARKING
        && record.area > LUXURY_AREA_THRESHOLD
}
