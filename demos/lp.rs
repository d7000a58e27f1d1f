// Example: Linear Programming - Production Planning
//
// A workshop builds tables and chairs.
// Table: 8h carpentry, 2h finishing, profit $70
// Chair: 4h carpentry, 2h finishing, profit $45
// Weekly capacity: 160h carpentry, 60h finishing
//
// Maximize: 70*t + 45*c
// Subject to: 8t + 4c ≤ 160, 2t + 2c ≤ 60, t, c ≥ 0
//
// The model is also written as MPS text and solved a second time from it.

use mathprog::{
    Interval, ModelInMpsFormat, OptimizationModel, OptimizationSolver, Real, SolverFactory,
    SolverParameters, SolverType,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Production Planning (Linear Programming) ===\n");

    let mut model = OptimizationModel::<Real, Real>::new();
    let tables = model.new_continuous_variable(Interval::non_negative(), "tables")?;
    let chairs = model.new_continuous_variable(Interval::non_negative(), "chairs")?;

    let carpentry = model
        .create_constraint_builder()
        .with_name("carpentry")
        .add_term(Real(8.0), &tables)
        .add_term(Real(4.0), &chairs)
        .build(Interval::new(Real::NEG_INFINITY, Real(160.0))?);
    let finishing = model
        .create_constraint_builder()
        .with_name("finishing")
        .add_term(Real(2.0), &tables)
        .add_term(Real(2.0), &chairs)
        .build(Interval::new(Real::NEG_INFINITY, Real(60.0))?);
    model.add_constraints([carpentry, finishing]);

    let objective = model
        .create_objective_function_builder()
        .add_term(Real(70.0), &tables)
        .add_term(Real(45.0), &chairs)
        .build();
    let model = model.set_objective(objective);
    println!("{model}\n");

    let solver = SolverFactory::linear(SolverType::Highs);
    let parameters = SolverParameters::default();
    let result = solver.solve(&model, &parameters)?;

    println!("Status: {}", result.status());
    println!("Profit: ${:.2}", result.objective_value().unwrap_or(f64::NAN));
    for variable in [&tables, &chairs] {
        if let Some(value) = result.solution_values().get(variable) {
            println!("  {} = {:.2}", variable.name(), value.0);
        }
    }

    let mps = ModelInMpsFormat::from_model(&model)?;
    println!("\n{}", mps.as_str());
    let from_text = solver.solve_mps(&mps, &parameters)?;
    println!(
        "Solved from MPS text: {} with profit ${:.2}",
        from_text.status(),
        from_text.objective_value().unwrap_or(f64::NAN)
    );
    Ok(())
}
