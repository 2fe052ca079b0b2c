#![cfg(feature = "serde")]

use lpbridge_core::{Sense, SolveMode, SolveParams, SolveStatus};

#[test]
fn test_params_from_partial_json() {
    let params: SolveParams =
        serde_json::from_str(r#"{ "mode": "dual", "time_limit": 30.0 }"#).expect("valid json");

    assert_eq!(params.mode, SolveMode::Dual);
    assert!(params.presolve, "missing fields keep their defaults");
    assert_eq!(params.time_limit, Some(30.0));
    assert_eq!(params.threads, None);
}

#[test]
fn test_params_survive_json() {
    let params = SolveParams::new()
        .with_mode(SolveMode::Barrier)
        .with_presolve(false)
        .with_iteration_limit(1000);

    let json = serde_json::to_string(&params).expect("serialize");
    assert!(json.contains("\"barrier\""));

    let back: SolveParams = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, params);
}

#[test]
fn test_unknown_mode_is_rejected() {
    let result: Result<SolveParams, _> = serde_json::from_str(r#"{ "mode": "sifting" }"#);
    assert!(result.is_err());
}

#[test]
fn test_status_serializes_all_flags() {
    let value = serde_json::to_value(SolveStatus::dual_infeasible()).expect("serialize");
    assert_eq!(value["proven_optimal"], false);
    assert_eq!(value["proven_dual_infeasible"], true);
    assert_eq!(value["abandoned"], false);
}

#[test]
fn test_sense_names() {
    let sense: Sense = serde_json::from_str("\"maximize\"").expect("deserialize");
    assert_eq!(sense, Sense::Maximize);
}
