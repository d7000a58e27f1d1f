// Example: Mixed-Integer Programming (MIP) - 0/1 Knapsack Problem
//
// A hiker has a knapsack with capacity of 15 kg.
// There are 5 items to choose from:
//
// Item   | Weight (kg) | Value ($)
// -------|-------------|----------
// Tent   |     7       |   150
// Stove  |     3       |    90
// Food   |     4       |   120
// Water  |     5       |   100
// Camera |     2       |    80
//
// Decision Variables: x_i ∈ {0, 1} for each item
// Maximize: 150*x₁ + 90*x₂ + 120*x₃ + 100*x₄ + 80*x₅
// Subject to: 7*x₁ + 3*x₂ + 4*x₃ + 5*x₄ + 2*x₅ ≤ 15

use mathprog::{
    Integer, Interval, OptimizationModel, OptimizationSolver, SolverFactory, SolverParameters,
    SolverType,
};

const ITEMS: [(&str, i64, i64); 5] = [
    ("tent", 7, 150),
    ("stove", 3, 90),
    ("food", 4, 120),
    ("water", 5, 100),
    ("camera", 2, 80),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Knapsack Problem (Mixed-Integer Programming) ===\n");

    let mut model = OptimizationModel::<Integer, Integer>::new();
    let take = ITEMS
        .iter()
        .map(|(name, _, _)| model.new_binary_variable(name))
        .collect::<Result<Vec<_>, _>>()?;

    let weights: Vec<Integer> = ITEMS.iter().map(|&(_, w, _)| Integer(w)).collect();
    let values: Vec<Integer> = ITEMS.iter().map(|&(_, _, v)| Integer(v)).collect();

    let capacity = model
        .create_constraint_builder()
        .with_name("capacity")
        .add_terms(&take, &weights)?
        .build(Interval::new(Integer(0), Integer(15))?);
    model.add_constraint(capacity);

    let objective = model
        .create_objective_function_builder()
        .add_terms(&take, &values)?
        .build();
    let model = model.set_objective(objective);

    let solver = SolverFactory::linear(SolverType::CoinCbc);
    let parameters = SolverParameters::default().with_time_limit_ms(10_000);
    let result = solver.solve(&model, &parameters)?;

    println!("Status: {}", result.status());
    if result.switched_to_default_solver() {
        println!("(COIN-OR CBC not linked, solved with HiGHS)");
    }
    if let Some(value) = result.objective_value() {
        println!("Total value: ${value:.0}");
    }
    for (variable, value) in result.solution_values().iter() {
        if value.0 > 0.5 {
            println!("  pack {}", variable.name());
        }
    }
    Ok(())
}
