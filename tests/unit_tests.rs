// Unit tests for the house price pipeline

use house_price_app::core::{
    features::{derive_features, is_good_location, is_luxury_house},
    format::format_currency,
};
use house_price_app::models::{FurnishingStatus, HouseRecord, YesNo};

fn create_record(area: f64, bedrooms: u8, bathrooms: u8, stories: u8, parking: u8) -> HouseRecord {
    HouseRecord {
        area,
        bedrooms,
        bathrooms,
        stories,
        parking,
        mainroad: YesNo::Yes,
        guestroom: YesNo::No,
        basement: YesNo::No,
        hotwaterheating: YesNo::No,
        airconditioning: YesNo::Yes,
        prefarea: YesNo::Yes,
        furnishingstatus: FurnishingStatus::Furnished,
    }
}

#[test]
fn test_area_per_bedroom_for_every_bedroom_count() {
    for bedrooms in 1..=6u8 {
        for area in [0.0, 1.0, 1650.0, 7420.0, 16200.0] {
            let derived = derive_features(&create_record(area, bedrooms, 2, 2, 1));
            let expected = area / bedrooms as f64;
            assert!(
                (derived.area_per_bedroom - expected).abs() < 1e-9,
                "area={} bedrooms={} got {}",
                area,
                bedrooms,
                derived.area_per_bedroom
            );
        }
    }
}

#[test]
fn test_bathroom_per_bedroom() {
    for bedrooms in 1..=6u8 {
        for bathrooms in 1..=4u8 {
            let derived = derive_features(&create_record(3000.0, bedrooms, bathrooms, 1, 0));
            let expected = bathrooms as f64 / bedrooms as f64;
            assert!((derived.bathroom_per_bedroom - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn test_good_location_truth_table() {
    // The training script compared prefarea with `>= "yes"`; over the
    // {"yes", "no"} domain that is equality, which is what is checked here.
    for mainroad in YesNo::ALL {
        for prefarea in YesNo::ALL {
            let mut record = create_record(5000.0, 3, 2, 2, 2);
            record.mainroad = mainroad;
            record.prefarea = prefarea;

            let expected = mainroad == YesNo::Yes && prefarea == YesNo::Yes;
            assert_eq!(is_good_location(&record), expected);
            assert_eq!(derive_features(&record).good_location, expected as u8);
        }
    }
}

#[test]
fn test_good_location_ignores_other_columns() {
    let mut record = create_record(5000.0, 3, 2, 2, 2);
    record.guestroom = YesNo::Yes;
    record.basement = YesNo::Yes;
    record.furnishingstatus = FurnishingStatus::Unfurnished;
    assert_eq!(derive_features(&record).good_location, 1);
}

#[test]
fn test_luxury_area_boundary() {
    let at_threshold = derive_features(&create_record(8000.0, 3, 2, 2, 2));
    assert_eq!(at_threshold.luxury_house, 0);

    let above_threshold = derive_features(&create_record(8001.0, 3, 2, 2, 2));
    assert_eq!(above_threshold.luxury_house, 1);
}

#[test]
fn test_luxury_count_boundaries() {
    // Each count exactly at its minimum still qualifies
    assert!(is_luxury_house(&create_record(9000.0, 3, 2, 2, 2)));

    // One below any minimum disqualifies
    assert!(!is_luxury_house(&create_record(9000.0, 2, 2, 2, 2)));
    assert!(!is_luxury_house(&create_record(9000.0, 3, 1, 2, 2)));
    assert!(!is_luxury_house(&create_record(9000.0, 3, 2, 1, 2)));
    assert!(!is_luxury_house(&create_record(9000.0, 3, 2, 2, 1)));

    // Maximum of every range
    assert!(is_luxury_house(&create_record(20000.0, 6, 4, 4, 3)));
}

#[test]
fn test_currency_format() {
    assert_eq!(format_currency(6936384.827872712), "$6,936,384.83");
    assert_eq!(format_currency(12.5), "$12.50");
    assert_eq!(format_currency(-250000.0), "$-250,000.00");
}
