//! Lab configuration tests
//!
//! Missing inputs are configuration errors naming what is missing; bad
//! values are validation errors; a rejected update leaves the lab as it was.

use cek_labs_core::labs::params::{extract_optional, LabParameters, MAX_VALUES};
use cek_labs_core::{
    new_lab, parse_student_id, ConfigurationError, LabError, LabGenerator, LabKind,
    SurfaceAdsorption, SurfaceAdsorptionConfig, ValidationError,
};
use serde_json::json;

fn params(value: serde_json::Value) -> LabParameters {
    value.as_object().cloned().unwrap()
}

fn valid_params(kind: LabKind) -> LabParameters {
    match kind {
        LabKind::SurfaceAdsorption => params(json!({"temperature": 298.15})),
        LabKind::CrystalViolet => params(json!({
            "volumes": {"cv": 10, "oh": 10, "h2o": 10},
            "temperature": 298.15
        })),
        LabKind::BombCalorimetry => params(json!({"sample": "benzoic"})),
        LabKind::StatisticsLab => params(json!({"sample": "Averages"})),
    }
}

#[test]
fn test_missing_student_id_reported_first() {
    for kind in LabKind::ALL {
        let mut lab = new_lab(kind);
        lab.set_parameters(&valid_params(kind)).unwrap();
        let err = lab.create_data_for_lab().unwrap_err();
        assert_eq!(
            err,
            LabError::Configuration(ConfigurationError::StudentIdRequired),
            "{}",
            kind
        );
        assert!(err.to_string().contains("student ID required"));
    }
}

#[test]
fn test_unconfigured_lab_names_required_key() {
    let expected = [
        (LabKind::SurfaceAdsorption, "temperature"),
        (LabKind::CrystalViolet, "volumes"),
        (LabKind::BombCalorimetry, "sample"),
        (LabKind::StatisticsLab, "sample"),
    ];
    for (kind, key) in expected {
        let mut lab = new_lab(kind);
        lab.set_student_id(123456);
        let err = lab.create_data_for_lab().unwrap_err();
        assert_eq!(
            err,
            LabError::Configuration(ConfigurationError::MissingParameter(key.to_string())),
            "{}",
            kind
        );
    }
}

#[test]
fn test_empty_parameters_name_required_key() {
    let expected = [
        (LabKind::SurfaceAdsorption, "temperature"),
        (LabKind::CrystalViolet, "volumes"),
        (LabKind::BombCalorimetry, "sample"),
        (LabKind::StatisticsLab, "sample"),
    ];
    for (kind, key) in expected {
        let mut lab = new_lab(kind);
        let err = lab.set_parameters(&LabParameters::new()).unwrap_err();
        assert!(err.to_string().contains(key), "{}: {}", kind, err);
    }
}

#[test]
fn test_unrecognized_keys_ignored() {
    for kind in LabKind::ALL {
        let mut p = valid_params(kind);
        p.insert("instructor".to_string(), json!("Dr. Smith"));
        p.insert("attempt".to_string(), json!(3));

        let mut lab = new_lab(kind);
        lab.set_student_id(123456);
        lab.set_parameters(&p).unwrap();

        let mut plain = new_lab(kind);
        plain.set_student_id(123456);
        plain.set_parameters(&valid_params(kind)).unwrap();

        assert_eq!(
            lab.create_data_for_lab().unwrap(),
            plain.create_data_for_lab().unwrap(),
            "{}",
            kind
        );
    }
}

#[test]
fn test_wrong_type_is_validation_error() {
    let mut lab = new_lab(LabKind::SurfaceAdsorption);
    let err = lab
        .set_parameters(&params(json!({"temperature": "warm"})))
        .unwrap_err();
    assert_eq!(
        err,
        LabError::Validation(ValidationError::WrongType {
            name: "temperature".to_string(),
            expected: "a number",
        })
    );

    let err = lab
        .set_parameters(&params(json!({"temperature": 298.15, "number_of_values": 2.5})))
        .unwrap_err();
    assert!(matches!(err, LabError::Validation(_)), "{:?}", err);
}

#[test]
fn test_out_of_range_is_validation_error() {
    let mut lab = new_lab(LabKind::SurfaceAdsorption);
    let err = lab
        .set_parameters(&params(json!({"temperature": -5.0})))
        .unwrap_err();
    assert!(
        matches!(err, LabError::Validation(ValidationError::OutOfRange { .. })),
        "{:?}",
        err
    );
}

#[test]
fn test_failed_update_keeps_previous_configuration() {
    let mut lab = SurfaceAdsorption::new();
    lab.set_student_id(123456);
    lab.set_parameters(&params(json!({"temperature": 310.0})))
        .unwrap();
    let before = lab.create_data_for_lab().unwrap();

    assert!(lab
        .set_parameters(&params(json!({"temperature": 290.0, "volume": -1.0})))
        .is_err());

    assert_eq!(lab.config().unwrap().temperature, 310.0);
    assert_eq!(lab.create_data_for_lab().unwrap(), before);
}

#[test]
fn test_typed_configure_matches_parameters() {
    let mut typed = SurfaceAdsorption::new();
    typed.set_student_id(123456);
    typed
        .configure(SurfaceAdsorptionConfig::new(298.15))
        .unwrap();

    let mut loose = SurfaceAdsorption::new();
    loose.set_student_id(123456);
    loose
        .set_parameters(&valid_params(LabKind::SurfaceAdsorption))
        .unwrap();

    assert_eq!(typed.config(), loose.config());
    assert_eq!(
        typed.create_data_for_lab().unwrap(),
        loose.create_data_for_lab().unwrap()
    );
}

#[test]
fn test_null_counts_as_missing() {
    let p = params(json!({"temperature": null}));
    assert_eq!(extract_optional::<f64>(&p, "temperature"), Ok(None));

    let mut lab = new_lab(LabKind::SurfaceAdsorption);
    let err = lab.set_parameters(&p).unwrap_err();
    assert_eq!(
        err,
        LabError::Configuration(ConfigurationError::MissingParameter(
            "temperature".to_string()
        ))
    );
}

#[test]
fn test_student_id_from_text() {
    assert_eq!(parse_student_id("123456"), Ok(123456));
    assert_eq!(
        parse_student_id("12-34"),
        Err(ValidationError::InvalidStudentId("12-34".to_string()))
    );

    let mut lab = new_lab(LabKind::StatisticsLab);
    lab.set_student_id_str(" 42 ").unwrap();
    assert_eq!(lab.student_id(), Some(42));
    assert!(lab.set_student_id_str("forty-two").is_err());
    assert_eq!(lab.student_id(), Some(42));
}

#[test]
fn test_lab_kind_parsing() {
    assert_eq!("statistics".parse::<LabKind>(), Ok(LabKind::StatisticsLab));
    assert_eq!(
        "surface_adsorption".parse::<LabKind>(),
        Ok(LabKind::SurfaceAdsorption)
    );
    assert_eq!(
        "nmr".parse::<LabKind>(),
        Err(ConfigurationError::UnknownLab("nmr".to_string()))
    );
}

#[test]
fn test_oversized_dataset_rejected_up_front() {
    let huge = 1u64 << 40;
    let requests = [
        (LabKind::SurfaceAdsorption, json!({"temperature": 298.15, "number_of_values": huge})),
        (
            LabKind::CrystalViolet,
            json!({
                "volumes": {"cv": 10, "oh": 10, "h2o": 10},
                "temperature": 298.15,
                "number_of_values": huge
            }),
        ),
        (LabKind::BombCalorimetry, json!({"sample": "benzoic", "number_of_values": huge})),
    ];
    for (kind, request) in requests {
        let mut lab = new_lab(kind);
        let err = lab.set_parameters(&params(request)).unwrap_err();
        assert_eq!(
            err,
            LabError::Validation(ValidationError::OutOfRange {
                name: "number_of_values".to_string(),
                reason: format!("must not exceed {}, got {}", MAX_VALUES, huge),
            }),
            "{}",
            kind
        );
    }
}

#[test]
fn test_largest_dataset_accepted() {
    let mut lab = SurfaceAdsorption::new();
    lab.set_student_id(123456);
    lab.set_parameters(&params(json!({"temperature": 298.15, "number_of_values": MAX_VALUES})))
        .unwrap();
    assert_eq!(lab.create_data_for_lab().unwrap().len(), MAX_VALUES);

    let too_many = params(json!({"temperature": 298.15, "number_of_values": MAX_VALUES + 1}));
    assert!(lab.set_parameters(&too_many).is_err());
}
