use lpbridge_highs::{HighsModel, HighsOption, HighsStatus, ObjectiveSense, highs_version};

#[test]
fn test_minimize_with_row() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    // minimize x subject to x >= 1 expressed as a row
    let mut model = HighsModel::new();
    let row = model.add_row(1.0, f64::INFINITY);
    let x = model
        .add_col(0.0, f64::INFINITY, 1.0, &[row], &[1.0])
        .expect("failed to add column");
    model.set_objective_sense(ObjectiveSense::Minimize);

    assert_eq!(model.columns(), 1);
    assert_eq!(model.rows(), 1);

    let status = model.solve();
    assert_eq!(status, HighsStatus::Optimal);
    // the wrapper is emptied by solve
    assert_eq!(model.columns(), 0);
    assert_eq!(model.rows(), 0);

    let obj_value = model.objective_value().expect("missing objective value");
    let snapshot = model.solution_snapshot().expect("missing solution");
    let x_value = snapshot.col_values()[x];

    assert!(
        (obj_value - 1.0).abs() < 1e-6,
        "Expected objective value ~1.0, got {}",
        obj_value
    );
    assert!(
        (x_value - 1.0).abs() < 1e-6,
        "Expected x ~1.0, got {}",
        x_value
    );
    assert!((snapshot.row_values()[row] - 1.0).abs() < 1e-6);
}

#[test]
fn test_maximize_with_options() {
    let mut model = HighsModel::new();
    let row = model.add_row(f64::NEG_INFINITY, 4.0);
    let x = model
        .add_col(0.0, 3.0, 1.0, &[row], &[1.0])
        .expect("failed to add column");
    let y = model
        .add_col(0.0, 3.0, 1.0, &[row], &[1.0])
        .expect("failed to add column");
    model.set_objective_sense(ObjectiveSense::Maximize);
    model.set_option("presolve", HighsOption::Str("off".to_string()));
    model.set_option("solver", HighsOption::Str("simplex".to_string()));

    let status = model.solve();
    assert_eq!(status, HighsStatus::Optimal);

    let snapshot = model.solution_snapshot().expect("missing solution");
    let total = snapshot.col_values()[x] + snapshot.col_values()[y];
    assert!((total - 4.0).abs() < 1e-6, "Expected x + y = 4, got {}", total);
}

#[test]
fn test_version_is_reported() {
    let version = highs_version().expect("HiGHS version");
    assert!(!version.is_empty());
}
