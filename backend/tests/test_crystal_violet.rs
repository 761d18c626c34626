//! Crystal Violet Kinetics Lab Tests
//!
//! The absorbance trace must decay from the starting absorbance towards
//! the cuvette background over the run.

use cek_labs_core::labs::crystal_violet::rate_constant;
use cek_labs_core::{
    CrystalViolet, CrystalVioletConfig, LabError, LabGenerator, ValidationError, Volumes,
};
use serde_json::json;

fn create_lab(student_id: u64) -> CrystalViolet {
    let mut lab = CrystalViolet::new();
    lab.set_student_id(student_id);
    lab.configure(CrystalVioletConfig::new(
        Volumes::new(10.0, 10.0, 10.0),
        298.15,
    ))
    .unwrap();
    lab
}

#[test]
fn test_absorbance_decays() {
    let data = create_lab(123456).create_data_for_lab().unwrap();

    assert_eq!(data.len(), 501);
    let first = data.first().unwrap();
    let last = data.last().unwrap();
    assert!(
        first.y > last.y,
        "absorbance should decay: {} -> {}",
        first.y,
        last.y
    );
    // A0 = 2.5e-5 M * 10/30 * 160e3 ≈ 1.33 plus background
    assert!((first.y - 1.343).abs() < 0.3, "A0 = {}", first.y);
}

#[test]
fn test_time_axis_covers_experiment() {
    let data = create_lab(123456).create_data_for_lab().unwrap();

    assert_eq!(data.first().unwrap().x, 0.0);
    assert!((data.last().unwrap().x - 1000.0).abs() < 1e-9);
    assert!(data.points().windows(2).all(|w| w[0].x < w[1].x));
}

#[test]
fn test_absorbance_never_negative() {
    let data = create_lab(123456).create_data_for_lab().unwrap();
    assert!(data.points().iter().all(|p| p.y > 0.0));
}

#[test]
fn test_warmer_run_decays_faster() {
    assert!(rate_constant(318.15) > rate_constant(298.15));

    let mut lab = CrystalViolet::new();
    lab.set_student_id(123456);
    let mut config = CrystalVioletConfig::new(Volumes::new(10.0, 10.0, 10.0), 298.15);
    config.noise_level = 0.0;
    lab.configure(config.clone()).unwrap();
    let cold = lab.create_data_for_lab().unwrap();

    config.temperature = 318.15;
    lab.configure(config).unwrap();
    let warm = lab.create_data_for_lab().unwrap();

    let mid = cold.len() / 10;
    assert!(warm.points()[mid].y < cold.points()[mid].y);
}

#[test]
fn test_set_parameters_with_nested_volumes() {
    let mut lab = CrystalViolet::new();
    lab.set_student_id(123456);
    let params = json!({
        "volumes": {"cv": 10, "oh": 10, "h2o": 10},
        "temperature": 298.15,
        "number_of_values": 51
    });
    lab.set_parameters(params.as_object().unwrap()).unwrap();

    assert_eq!(lab.config().unwrap().volumes, Volumes::new(10.0, 10.0, 10.0));
    assert_eq!(lab.create_data_for_lab().unwrap().len(), 51);
}

#[test]
fn test_volumes_must_be_an_object() {
    let mut lab = CrystalViolet::new();
    let params = json!({"volumes": 30, "temperature": 298.15});
    let err = lab.set_parameters(params.as_object().unwrap()).unwrap_err();
    assert!(matches!(err, LabError::Validation(_)), "{:?}", err);
}

#[test]
fn test_metadata_records_volumes() {
    let data = create_lab(42).create_data_for_lab().unwrap();
    let meta = data.metadata();

    assert_eq!(meta.get("Laboratory"), Some("Crystal Violet Lab"));
    assert_eq!(meta.get("Volume of CV (mL)"), Some("10"));
    assert_eq!(meta.get("Number of values"), Some("501"));
}

#[test]
fn test_missing_reagent_rejected() {
    for volumes in [
        json!({"cv": 10, "oh": 0, "h2o": 20}),
        json!({"cv": 0, "oh": 10, "h2o": 20}),
    ] {
        let mut lab = CrystalViolet::new();
        let params = json!({"volumes": volumes.clone(), "temperature": 298.15});
        let err = lab.set_parameters(params.as_object().unwrap()).unwrap_err();
        assert!(
            matches!(err, LabError::Validation(ValidationError::OutOfRange { .. })),
            "{}: {:?}",
            volumes,
            err
        );
        assert!(lab.config().is_none());
    }
}

#[test]
fn test_no_water_still_decays() {
    let mut lab = CrystalViolet::new();
    lab.set_student_id(123456);
    lab.configure(CrystalVioletConfig::new(Volumes::new(15.0, 15.0, 0.0), 298.15))
        .unwrap();
    let data = lab.create_data_for_lab().unwrap();
    assert!(data.first().unwrap().y > data.last().unwrap().y);
}
