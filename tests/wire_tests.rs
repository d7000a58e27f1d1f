//! Job service wire format.

use mathprog::application::{
    to_job_request, to_optimization_model, to_solution_response, to_solver_result, JobRequest,
    SolutionResponse,
};
use mathprog::{
    Integer, Interval, OptimizationModel, OptimizationSolver, SolverFactory, SolverParameters,
    SolverResultStatus,
};

const REQUEST: &str = r#"{
    "variables": [
        { "name": "x", "lowerBound": 0, "upperBound": 4 },
        { "name": "y", "lowerBound": 0 }
    ],
    "constraints": [
        {
            "terms": [
                { "coefficient": 1, "variable": "x" },
                { "coefficient": 1, "variable": "y" }
            ],
            "upperBound": 6
        }
    ],
    "objective": {
        "expression": [
            { "coefficient": 3, "variable": "x" },
            { "coefficient": 1, "variable": "y" }
        ],
        "maximize": true,
        "offset": 1
    }
}"#;

#[test]
fn test_request_json_round_trip() {
    let request: JobRequest = serde_json::from_str(REQUEST).unwrap();
    let model = to_optimization_model(&request).unwrap();

    assert_eq!(model.variables().len(), 2);
    assert_eq!(model.constraints().len(), 1);
    assert_eq!(to_job_request(&model), request);
}

#[test]
fn test_response_json_keeps_status_name() {
    let mut model = OptimizationModel::<Integer, Integer>::new();
    let x = model
        .new_integer_variable(Interval::new(Integer(0), Integer(3)).unwrap(), "x")
        .unwrap();
    let objective = model
        .create_objective_function_builder()
        .add_term(Integer(1), &x)
        .build();
    let model = model.set_objective(objective);
    let result = SolverFactory::constraint_programming()
        .solve(&model, &SolverParameters::default())
        .unwrap();

    let response = to_solution_response(&result, &model);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["solverResultStatus"], "Optimal");
    assert_eq!(json["variableValues"]["x"], 3.0);
    assert_eq!(json["isOptimal"], true);

    let parsed: SolutionResponse = serde_json::from_value(json).unwrap();
    let back = to_solver_result(&parsed, &model).unwrap();
    assert_eq!(back.status(), SolverResultStatus::Optimal);
    assert_eq!(back.objective_value(), Some(3.0));
}
