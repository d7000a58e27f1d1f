// Application layer: mapping between the job service wire format and the domain

pub mod mappers;

pub use mappers::{
    to_job_request, to_optimization_model, to_solution_response, to_solver_result, JobRequest,
    LinearExpression, SolutionResponse, WireConstraint, WireObjective, WireVariable,
};
