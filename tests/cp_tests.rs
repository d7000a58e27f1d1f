//! Constraint programming adapter: enumeration and optimization.

use mathprog::{
    Integer, Interval, OptimizationModel, OptimizationSolver, SolutionValues, SolverFactory,
    SolverParameters, SolverResultStatus,
};

// x, y ∈ [0, 2], x + y = 2
fn pairs_summing_to_two() -> mathprog::CompletedOptimizationModel<Integer, Integer> {
    let mut model = OptimizationModel::new();
    let domain = Interval::new(Integer(0), Integer(2)).unwrap();
    let x = model.new_integer_variable(domain, "x").unwrap();
    let y = model.new_integer_variable(domain, "y").unwrap();
    let constraint = model
        .create_constraint_builder()
        .add_term(Integer(1), &x)
        .add_term(Integer(1), &y)
        .build(Interval::point(Integer(2)));
    model.add_constraint(constraint);
    let objective = model
        .create_objective_function_builder()
        .add_term(Integer(1), &x)
        .build();
    model.set_objective(objective)
}

#[test]
fn test_enumerates_every_solution() {
    let model = pairs_summing_to_two();
    let mut seen = Vec::new();
    let mut record = |values: &SolutionValues<Integer, Integer>| {
        seen.push((
            values.get_by_name("x").unwrap().0,
            values.get_by_name("y").unwrap().0,
        ));
    };

    let result = SolverFactory::constraint_programming()
        .solve_with_callback(&model, &SolverParameters::default(), Some(&mut record), false)
        .expect("Should solve");

    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|(x, y)| x + y == 2));
    assert!(result.is_feasible());
    assert_eq!(result.objective_value(), Some(0.0));
}

#[test]
fn test_enumerates_binary_square() {
    // x, y ∈ {0, 1}, 0 <= x + y <= 3
    let mut model = OptimizationModel::<Integer, Integer>::new();
    let domain = Interval::new(Integer(0), Integer(1)).unwrap();
    let x = model.new_integer_variable(domain, "x").unwrap();
    let y = model.new_integer_variable(domain, "y").unwrap();
    let constraint = model
        .create_constraint_builder()
        .add_term(Integer(1), &x)
        .add_term(Integer(1), &y)
        .build(Interval::new(Integer(0), Integer(3)).unwrap());
    model.add_constraint(constraint);
    let objective = model.create_objective_function_builder().build();
    let model = model.set_objective(objective);

    let mut seen = Vec::new();
    let mut record = |values: &SolutionValues<Integer, Integer>| {
        seen.push((values.get(&x).unwrap().0, values.get(&y).unwrap().0));
    };
    SolverFactory::constraint_programming()
        .solve_with_callback(&model, &SolverParameters::default(), Some(&mut record), false)
        .expect("Should solve");

    seen.sort_unstable();
    assert_eq!(seen, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn test_optimizes_objective() {
    let model = pairs_summing_to_two();
    let result = SolverFactory::constraint_programming()
        .solve(&model, &SolverParameters::default())
        .expect("Should solve");

    assert_eq!(result.status(), SolverResultStatus::Optimal);
    assert_eq!(result.objective_value(), Some(2.0));
    assert_eq!(result.optimality_gap(), Some(0.0));
    assert_eq!(result.solution_values().get_by_name("x"), Some(Integer(2)));
    assert_eq!(result.solution_values().get_by_name("y"), Some(Integer(0)));
}

#[test]
fn test_binary_variables_are_supported() {
    // max a + b s.t. a + b <= 1
    let mut model = OptimizationModel::<Integer, Integer>::new();
    let a = model.new_binary_variable("a").unwrap();
    let b = model.new_binary_variable("b").unwrap();
    let constraint = model
        .create_constraint_builder()
        .add_term(Integer(1), &a)
        .add_term(Integer(1), &b)
        .build(Interval::new(Integer(0), Integer(1)).unwrap());
    model.add_constraint(constraint);
    let objective = model
        .create_objective_function_builder()
        .add_term(Integer(1), &a)
        .add_term(Integer(1), &b)
        .build();
    let result = SolverFactory::constraint_programming()
        .solve(&model.set_objective(objective), &SolverParameters::default())
        .expect("Should solve");

    assert_eq!(result.status(), SolverResultStatus::Optimal);
    assert_eq!(result.objective_value(), Some(1.0));
}
