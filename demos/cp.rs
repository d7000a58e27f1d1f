// Example: Constraint Programming - enumerate every solution
//
// x, y ∈ {0, 1, 2}, x + y = 2
// Every assignment is reported through the callback as the search finds it.

use mathprog::{
    Integer, Interval, OptimizationModel, SolutionValues, SolverFactory, SolverParameters,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Solution Enumeration (Constraint Programming) ===\n");

    let mut model = OptimizationModel::<Integer, Integer>::new();
    let domain = Interval::new(Integer(0), Integer(2))?;
    let x = model.new_integer_variable(domain, "x")?;
    let y = model.new_integer_variable(domain, "y")?;

    let sum = model
        .create_constraint_builder()
        .add_term(Integer(1), &x)
        .add_term(Integer(1), &y)
        .build(Interval::point(Integer(2)));
    model.add_constraint(sum);
    let objective = model.create_objective_function_builder().build();
    let model = model.set_objective(objective);

    let mut count = 0;
    let mut print = |values: &SolutionValues<Integer, Integer>| {
        count += 1;
        let assignment: Vec<String> = values
            .iter()
            .map(|(variable, value)| format!("{} = {}", variable.name(), value))
            .collect();
        println!("  #{count}: {}", assignment.join(", "));
    };

    let result = SolverFactory::constraint_programming().solve_with_callback(
        &model,
        &SolverParameters::default(),
        Some(&mut print),
        false,
    )?;
    println!("\nStatus: {} after {count} solutions", result.status());
    Ok(())
}
