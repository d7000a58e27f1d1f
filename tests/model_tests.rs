//! Model building through the public API.

use mathprog::{
    Binary, Integer, Interval, ModelError, OptimizationModel, Real, SolverParameters, VariableKind,
    WeightedSum,
};

#[test]
fn test_scalar_promotions() {
    assert_eq!(Binary(true) + Binary(true), Binary(false));
    assert_eq!(Binary(true) - Binary(false), Binary(true));
    assert_eq!(Binary(true) + Integer(2), Integer(1));
    assert_eq!(Integer(2) + Real(0.5), Real(2.5));
    assert_eq!(Real(1.5) - Integer(1), Real(0.5));
    assert_eq!(Integer::from(Binary(true)), Integer(1));
    assert_eq!(Real::from(Integer(-3)), Real(-3.0));
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut model = OptimizationModel::<Real, Real>::new();
    model
        .new_continuous_variable(Interval::non_negative(), "x")
        .unwrap();
    let err = model
        .new_integer_variable(Interval::new(Real(0.0), Real(1.0)).unwrap(), "x")
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::VariableAlreadyExists {
            name: "x".to_string()
        }
    );
    assert_eq!(err.to_string(), "Variable with same name already exists: x");
}

#[test]
fn test_weights_must_match_variables() {
    let mut model = OptimizationModel::<Integer, Integer>::new();
    let a = model.new_binary_variable("a").unwrap();
    let b = model.new_binary_variable("b").unwrap();
    let err = model
        .create_weighted_sum_builder()
        .add_terms(&[a, b], &[Integer(1)])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Number of weights must match number of variables. Weights: 1, Variables: 2"
    );
}

#[test]
fn test_repeated_terms_merge() {
    let mut model = OptimizationModel::<Integer, Integer>::new();
    let x = model
        .new_integer_variable(Interval::new(Integer(0), Integer(10)).unwrap(), "x")
        .unwrap();
    let y = model
        .new_integer_variable(Interval::new(Integer(0), Integer(10)).unwrap(), "y")
        .unwrap();

    let first = model
        .create_weighted_sum_builder()
        .add_term(Integer(3), &x)
        .add_term(Integer(4), &y)
        .add_term(Integer(5), &x)
        .build();
    let second: WeightedSum<Integer, Integer> =
        [(y.clone(), Integer(4)), (x.clone(), Integer(8))].into_iter().collect();

    assert_eq!(first, second);
    assert_eq!(first.coefficient(&x), Some(Integer(8)));
    assert_eq!(first.len(), 2);
}

#[test]
fn test_completed_model_is_sealed() {
    let mut model = OptimizationModel::<Integer, Real>::new();
    let x = model.new_binary_variable("x").unwrap();
    let y = model
        .new_integer_variable(Interval::new(Integer(0), Integer(5)).unwrap(), "y")
        .unwrap();
    let objective = model
        .create_objective_function_builder()
        .add_term(Real(1.0), &x)
        .add_term(Real(2.0), &y)
        .with_offset(Real(0.5))
        .build();
    let completed = model.set_objective(objective);

    assert!(completed.objective().maximize());
    assert_eq!(completed.objective().offset(), Some(Real(0.5)));
    assert_eq!(completed.num_integer_variables(), 2);
    assert_eq!(completed.variable("x").unwrap().kind(), VariableKind::Binary);
    assert!(completed.variable("z").is_none());
}

#[test]
fn test_parameters_load_from_json() {
    let parameters = SolverParameters::from_json(
        r#"{ "relativeGap": 0.01, "timeLimitInMilliseconds": 2500, "numberOfThreads": 4 }"#,
    )
    .unwrap();
    assert_eq!(parameters.relative_gap, Some(0.01));
    assert_eq!(parameters.time_limit_seconds(), Some(2.5));
    assert_eq!(parameters.threads(), Some(4));
    assert!(!parameters.enable_solver_output);
}
