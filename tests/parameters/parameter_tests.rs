//! Integration tests for the Parameter struct
//!
//! These tests verify that the Parameter struct behaves correctly in various scenarios.

use std::sync::Arc;

use approx::assert_relative_eq;
use lcfit_rs::parameters::{Outputs, Parameter, ParameterError};
use lcfit_rs::printer::{Message, Printer, RecordingPrinter};

#[test]
fn test_parameter_lifecycle() {
    let recorder = RecordingPrinter::new();
    let printer: Arc<dyn Printer> = recorder.clone();

    // Create a free parameter
    let mut param = Parameter::builder("vejecta")
        .min_value(1.0e3)
        .max_value(3.0e4)
        .latex("v_{\\rm ej}")
        .printer(printer)
        .build()
        .unwrap();

    // Check initial state
    assert_eq!(param.name(), "vejecta");
    assert_eq!(param.latex(), "v_{\\rm ej}");
    assert!(param.is_free());
    assert!(!param.is_log());
    assert_eq!(param.min_value(), Some(1.0e3));
    assert_eq!(param.max_value(), Some(3.0e4));
    assert_eq!(param.reference_value(), None);
    assert_eq!(param.derived_keys(), ["reference_vejecta".to_string()]);

    // Resolve from a fraction
    let output = param.process(&Outputs::new(), Some(0.5)).unwrap();
    assert_eq!(output.get("vejecta"), Some(1.55e4));
    assert_eq!(output.len(), 1);

    // Publish a reference value
    param.receive(2.0e4);
    let output = param.process(&Outputs::new(), Some(0.0)).unwrap();
    let keys: Vec<&str> = output.keys().collect();
    assert_eq!(keys, vec!["vejecta", "reference_vejecta"]);
    assert_eq!(output.get("reference_vejecta"), Some(2.0e4));

    // Clear it again
    param.clear_reference();
    assert_eq!(param.process(&Outputs::new(), Some(0.0)).unwrap().len(), 1);

    // Fix the parameter
    param.fix_value(5.0e3);
    assert!(!param.is_free());
    let output = param.process(&Outputs::new(), None).unwrap();
    assert_eq!(output.get("vejecta"), Some(5.0e3));

    // Nothing recoverable went wrong
    assert!(recorder.messages().is_empty());
}

#[test]
fn test_fraction_out_of_range() {
    let param = Parameter::uniform("a", 0.0, 10.0).unwrap();

    // Fractions outside [0, 1] are clamped
    assert_eq!(param.value(-0.5).unwrap(), 0.0);
    assert_eq!(param.value(1.5).unwrap(), 10.0);
}

#[test]
fn test_clip_warning_reported_once() {
    let recorder = RecordingPrinter::new();
    let printer: Arc<dyn Printer> = recorder.clone();
    let param = Parameter::builder("kappa")
        .min_value(0.05)
        .max_value(0.34)
        .printer(printer)
        .build()
        .unwrap();

    // In range, nothing is clipped
    assert_relative_eq!(param.fraction(0.195, true).unwrap(), 0.5, epsilon = 1e-12);
    assert!(recorder.messages().is_empty());

    // Out of range without clipping passes through
    assert!(param.fraction(1.0, false).unwrap() > 1.0);
    assert!(recorder.messages().is_empty());

    // First clip warns, later ones do not
    assert_eq!(param.fraction(1.0, true).unwrap(), 1.0);
    assert_eq!(param.fraction(-1.0, true).unwrap(), 0.0);
    assert_eq!(
        recorder.messages(),
        vec![Message::ParameterClipped {
            name: "kappa".to_string()
        }]
    );
}

#[test]
fn test_log_parameter() {
    let param = Parameter::log_uniform("mejecta", 0.01, 100.0).unwrap();
    assert!(param.is_log());

    // Bounds are stored in natural-log space, reported in physical units
    let bounds = param.bounds().unwrap();
    assert_relative_eq!(bounds.min(), 0.01f64.ln(), epsilon = 1e-12);
    assert_relative_eq!(bounds.max(), 100.0f64.ln(), epsilon = 1e-12);
    assert_relative_eq!(param.min_value().unwrap(), 0.01, max_relative = 1e-12);
    assert_relative_eq!(param.max_value().unwrap(), 100.0, max_relative = 1e-12);

    // Log-uniform: equal fractions per decade
    assert_relative_eq!(param.value(0.25).unwrap(), 0.1, max_relative = 1e-12);
    assert_relative_eq!(param.value(0.5).unwrap(), 1.0, max_relative = 1e-12);
    assert_relative_eq!(param.value(0.75).unwrap(), 10.0, max_relative = 1e-12);

    // Zero or negative bounds cannot be logged
    for (min, max) in [(0.0, 1.0), (-1.0, 1.0), (-2.0, -1.0)] {
        assert!(matches!(
            Parameter::log_uniform("bad", min, max),
            Err(ParameterError::NonPositiveLogBounds { .. })
        ));
    }
}

#[test]
fn test_fixed_parameter() {
    let param = Parameter::fixed("redshift", 0.05);
    assert!(!param.is_free());
    assert_eq!(param.fixed_value(), Some(0.05));

    // Fixed parameters ignore the fraction
    let output = param.process(&Outputs::new(), Some(0.9)).unwrap();
    assert_eq!(output.get("redshift"), Some(0.05));

    // And cannot be sampled
    assert!(matches!(
        param.value(0.5),
        Err(ParameterError::NotSamplable { .. })
    ));
    assert!(param.fraction(0.05, true).is_err());
}

#[test]
fn test_parameter_without_value_or_range() {
    let param = Parameter::builder("lumdist").build().unwrap();
    assert!(matches!(
        param.process(&Outputs::new(), None),
        Err(ParameterError::MissingValue { .. })
    ));

    // A single bound is not a sampling range
    let param = Parameter::builder("lumdist").min_value(1.0).value(3.0).build().unwrap();
    assert!(!param.is_free());
    assert_eq!(param.process(&Outputs::new(), None).unwrap().get("lumdist"), Some(3.0));
}

#[test]
fn test_free_parameter_needs_fraction() {
    let param = Parameter::uniform("a", 0.0, 1.0).unwrap();
    assert!(matches!(
        param.process(&Outputs::new(), None),
        Err(ParameterError::MissingInput { .. })
    ));
}

#[test]
fn test_already_resolved_is_skipped() {
    let param = Parameter::uniform("texplosion", -10.0, 0.0).unwrap();
    let resolved: Outputs = vec![("texplosion".to_string(), -3.0)].into_iter().collect();

    assert!(param.process(&resolved, Some(0.5)).unwrap().is_empty());
}

#[test]
fn test_min_max_same_warns() {
    let recorder = RecordingPrinter::new();
    let printer: Arc<dyn Printer> = recorder.clone();
    let param = Parameter::builder("nnifraction")
        .min_value(0.1)
        .max_value(0.1)
        .value(0.7)
        .printer(printer)
        .build()
        .unwrap();

    // The collapsed range wins over the supplied value
    assert_eq!(param.fixed_value(), Some(0.1));
    assert!(param.bounds().is_none());
    assert_eq!(
        recorder.messages(),
        vec![Message::MinMaxSame {
            name: "nnifraction".to_string()
        }]
    );
}

#[test]
fn test_receive_requests() {
    let mut param = Parameter::fixed("lumdist", 100.0);

    // Empty requests leave nothing behind
    param.receive_requests(Vec::<(String, f64)>::new());
    assert_eq!(param.reference_value(), None);

    // Only the first entry counts
    param.receive_requests(vec![("a", 1.0), ("b", 2.0)]);
    assert_eq!(param.reference_value(), Some(1.0));

    // An empty batch keeps the previous reference
    param.receive_requests(Vec::<(&str, f64)>::new());
    assert_eq!(param.reference_value(), Some(1.0));
}
