//! Engine-backed solves through the linear program adapter.
#![cfg(feature = "highs")]

use mathprog::{
    Integer, Interval, ModelInMpsFormat, OptimizationModel, OptimizationSolver, Real,
    SolverFactory, SolverParameters, SolverResultStatus, SolverType,
};

const TOL: f64 = 1e-6;

// min 2x + 2y s.t. 0 <= x - y, x ∈ [1, 3], y ∈ [0, 1] integer
// Solution: x = 1, y = 0, objective 2
fn small_ilp() -> mathprog::CompletedOptimizationModel<Integer, Real> {
    let mut model = OptimizationModel::new();
    let x = model
        .new_integer_variable(Interval::new(Integer(1), Integer(3)).unwrap(), "x")
        .unwrap();
    let y = model
        .new_integer_variable(Interval::new(Integer(0), Integer(1)).unwrap(), "y")
        .unwrap();
    let constraint = model
        .create_constraint_builder()
        .add_term(Real(1.0), &x)
        .add_term(Real(-1.0), &y)
        .build(Interval::new(Real(0.0), Real::INFINITY).unwrap());
    model.add_constraint(constraint);
    let objective = model
        .create_objective_function_builder()
        .add_term(Real(2.0), &x)
        .add_term(Real(2.0), &y)
        .minimize()
        .build();
    model.set_objective(objective)
}

#[test]
fn test_small_ilp_is_optimal() {
    let model = small_ilp();
    let result = SolverFactory::linear(SolverType::Highs)
        .solve(&model, &SolverParameters::default())
        .expect("Should solve");

    assert_eq!(result.status(), SolverResultStatus::Optimal);
    assert!(result.is_optimal());
    assert!(result.is_feasible());
    assert!(!result.switched_to_default_solver());

    let objective = result.objective_value().unwrap();
    assert!((objective - 2.0).abs() < TOL, "Expected 2.0, got {}", objective);
    assert!(result.optimality_gap().unwrap() < TOL);

    let x = result.solution_values().get(model.variable("x").unwrap()).unwrap();
    let y = result.solution_values().get(model.variable("y").unwrap()).unwrap();
    assert!((x.0 - 1.0).abs() < TOL, "Expected x=1, got {}", x);
    assert!(y.0.abs() < TOL, "Expected y=0, got {}", y);
}

#[test]
fn test_infeasible_model_has_no_solution() {
    // x ∈ [0, 1] integer, x = 3
    let mut model = OptimizationModel::<Integer, Real>::new();
    let x = model
        .new_integer_variable(Interval::new(Integer(0), Integer(1)).unwrap(), "x")
        .unwrap();
    let constraint = model
        .create_constraint_builder()
        .add_term(Real(1.0), &x)
        .build(Interval::point(Real(3.0)));
    model.add_constraint(constraint);
    let objective = model
        .create_objective_function_builder()
        .add_term(Real(1.0), &x)
        .build();
    let result = SolverFactory::linear(SolverType::Highs)
        .solve(&model.set_objective(objective), &SolverParameters::default())
        .expect("Should return a result");

    assert_eq!(result.status(), SolverResultStatus::Infeasible);
    assert!(!result.is_feasible());
    assert!(!result.is_optimal());
    assert!(result.solution_values().is_empty());
    assert_eq!(result.objective_value(), None);
}

#[test]
fn test_unbounded_lp() {
    // max 2x, x ∈ [0, ∞)
    let mut model = OptimizationModel::<Real, Real>::new();
    let x = model
        .new_continuous_variable(Interval::non_negative(), "x")
        .unwrap();
    let objective = model
        .create_objective_function_builder()
        .add_term(Real(2.0), &x)
        .build();
    let result = SolverFactory::linear(SolverType::Highs)
        .solve(&model.set_objective(objective), &SolverParameters::default())
        .expect("Should return a result");

    assert_eq!(result.status(), SolverResultStatus::Unbounded);
    assert!(result.solution_values().is_empty());
}

#[test]
fn test_unlinked_engine_falls_back_to_highs() {
    let model = small_ilp();
    let result = SolverFactory::linear(SolverType::Gurobi)
        .solve(&model, &SolverParameters::default())
        .expect("Should solve with the fallback engine");

    assert!(result.switched_to_default_solver());
    assert_eq!(result.status(), SolverResultStatus::Optimal);
    assert!((result.objective_value().unwrap() - 2.0).abs() < TOL);
}

#[test]
fn test_parameters_reach_the_engine() {
    let parameters = SolverParameters::default()
        .with_relative_gap(Some(1e-4))
        .with_time_limit_ms(5_000)
        .with_threads(1)
        .with_parameter("presolve", "off");
    let result = SolverFactory::linear(SolverType::Highs)
        .solve(&small_ilp(), &parameters)
        .expect("Should solve");
    assert_eq!(result.status(), SolverResultStatus::Optimal);
}

#[test]
fn test_mps_text_solves_like_the_model() {
    let model = small_ilp();
    let solver = SolverFactory::linear(SolverType::Highs);
    let parameters = SolverParameters::default();

    let direct = solver.solve(&model, &parameters).expect("Should solve");
    let text = ModelInMpsFormat::from_model(&model).unwrap();
    let from_text = solver.solve_mps(&text, &parameters).expect("Should solve");

    assert_eq!(from_text.status(), direct.status());
    assert_eq!(from_text.is_feasible(), direct.is_feasible());
    assert_eq!(from_text.is_optimal(), direct.is_optimal());
    let a = direct.objective_value().unwrap();
    let b = from_text.objective_value().unwrap();
    assert!((a - b).abs() < TOL, "Expected {}, got {}", a, b);
    let x = from_text.solution_values().get_by_name("x").unwrap();
    assert!((x.0 - 1.0).abs() < TOL);
}

#[test]
fn test_export_writes_model_file() {
    let path = std::env::temp_dir().join(format!("mathprog-export-{}.mps", std::process::id()));
    let parameters = SolverParameters::default().with_export_path(&path);
    let result = SolverFactory::linear(SolverType::Highs)
        .solve(&small_ilp(), &parameters)
        .expect("Should solve");
    assert_eq!(result.status(), SolverResultStatus::Optimal);

    let written = ModelInMpsFormat::read_from(&path).unwrap();
    let flat = written.parse().unwrap();
    assert_eq!(flat.columns.len(), 2);
    assert_eq!(flat.rows.len(), 1);
    std::fs::remove_file(&path).unwrap();
}
