//! Statistics Lab Tests
//!
//! Every exercise yields a fixed-size table of (X, Y) values.

use cek_labs_core::labs::statistics::NUMBER_OF_VALUES;
use cek_labs_core::{
    ConfigurationError, LabError, LabGenerator, StatisticsConfig, StatisticsExercise,
    StatisticsLab,
};
use serde_json::json;

fn generate(student_id: u64, exercise: StatisticsExercise) -> cek_labs_core::Dataset {
    let mut lab = StatisticsLab::new();
    lab.set_student_id(student_id);
    lab.configure(StatisticsConfig::new(exercise)).unwrap();
    lab.create_data_for_lab().unwrap()
}

#[test]
fn test_linear_fit_has_ten_points() {
    let mut lab = StatisticsLab::new();
    lab.set_student_id(123456);
    let params = json!({"sample": "Linear fit"});
    lab.set_parameters(params.as_object().unwrap()).unwrap();

    let data = lab.create_data_for_lab().unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(NUMBER_OF_VALUES, 10);
}

#[test]
fn test_every_exercise_has_ten_points() {
    for exercise in StatisticsExercise::ALL {
        let data = generate(123456, exercise);
        assert_eq!(data.len(), NUMBER_OF_VALUES, "{}", exercise);
        assert!(data.points().iter().all(|p| p.is_finite()), "{}", exercise);
    }
}

#[test]
fn test_linear_fit_follows_trend() {
    let data = generate(123456, StatisticsExercise::LinearFit);

    assert!(data.points().windows(2).all(|w| w[0].x <= w[1].x));
    assert!(data.points().iter().all(|p| (0.0..=10.0).contains(&p.x)));
    for p in data.points() {
        let residual = p.y - (12.3 * p.x + 1.0);
        assert!(residual.abs() < 30.0, "residual {} at x = {}", residual, p.x);
    }
}

#[test]
fn test_outlier_exercise_shape() {
    let data = generate(123456, StatisticsExercise::DetectionOfOutliers);

    assert_eq!(data.len(), NUMBER_OF_VALUES);
    assert!(data.points().iter().all(|p| (10.0..=20.0).contains(&p.x)));
    // Noise sd is 1 and a single point is shifted by +2
    let max_residual = data
        .points()
        .iter()
        .map(|p| (p.y - (2.3 * p.x + 0.1)).abs())
        .fold(0.0, f64::max);
    assert!(max_residual < 10.0, "max residual {}", max_residual);
    assert_eq!(data, generate(123456, StatisticsExercise::DetectionOfOutliers));
}

#[test]
fn test_averages_columns_centered() {
    let data = generate(123456, StatisticsExercise::Averages);
    let n = data.len() as f64;
    let mean_x = data.points().iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = data.points().iter().map(|p| p.y).sum::<f64>() / n;

    assert!((mean_x - 1.0).abs() < 0.2, "mean x = {}", mean_x);
    assert!((mean_y - 12.0).abs() < 4.0, "mean y = {}", mean_y);
}

#[test]
fn test_unknown_exercise_rejected() {
    let mut lab = StatisticsLab::new();
    let params = json!({"sample": "Chi squared"});
    let err = lab.set_parameters(params.as_object().unwrap()).unwrap_err();
    assert!(
        matches!(
            err,
            LabError::Configuration(ConfigurationError::UnknownSample { .. })
        ),
        "{:?}",
        err
    );
}

#[test]
fn test_expected_value_in_metadata() {
    let data = generate(123456, StatisticsExercise::LinearFit);
    assert_eq!(data.metadata().get("Sample"), Some("Linear fit"));
    assert_eq!(data.metadata().get("Expected value"), Some("(11.3, 0.9)"));

    let data = generate(123456, StatisticsExercise::NonLinearFit);
    assert_eq!(data.metadata().get("Expected value"), None);
}

#[test]
fn test_available_samples_lists_exercises() {
    let lab = StatisticsLab::new();
    assert_eq!(lab.available_samples().len(), 6);
    assert!(lab.available_samples().contains(&"Averages"));
}
