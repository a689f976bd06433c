use ltm_core::errors::ErrorKind;
use ltm_core::params::{reaches_threshold, validate_influence, validate_threshold};
use ltm_core::NodeId;

#[test]
fn thresholds_inside_unit_interval_pass() {
    let node = NodeId::from_raw(3);
    assert_eq!(validate_threshold(node, 0.0).unwrap(), 0.0);
    assert_eq!(validate_threshold(node, 1.0).unwrap(), 1.0);
    assert_eq!(validate_threshold(node, 0.55).unwrap(), 0.55);
}

#[test]
fn threshold_above_one_names_node() {
    let err = validate_threshold(NodeId::from_raw(9), 1.5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_eq!(err.info().code, "threshold-out-of-range");
    assert_eq!(err.info().context.get("node"), Some(&"9".to_string()));
    assert_eq!(err.info().context.get("value"), Some(&"1.5".to_string()));
}

#[test]
fn negative_and_nan_values_are_rejected() {
    assert!(validate_threshold(NodeId::from_raw(1), -0.1).is_err());
    assert!(validate_threshold(NodeId::from_raw(1), f64::NAN).is_err());
    let err = validate_influence(NodeId::from_raw(1), NodeId::from_raw(2), 2.3).unwrap_err();
    assert_eq!(err.info().context.get("source"), Some(&"1".to_string()));
    assert_eq!(err.info().context.get("target"), Some(&"2".to_string()));
}

#[test]
fn equal_split_reaches_full_threshold() {
    let third = 1.0 / 3.0;
    assert!(reaches_threshold(third + third + third, 1.0));
    assert!(reaches_threshold(0.5, 0.4));
    assert!(!reaches_threshold(0.2, 0.4));
}
