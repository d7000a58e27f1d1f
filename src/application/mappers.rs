// Mappers: Convert between the job service wire format and domain models
// The wire side only knows names and plain floats; typed variables live on the domain side

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    CompletedOptimizationModel, Interval, ModelError, ModelResult, OptimizationModel, Real,
    Scalar, SolutionValues, SolverResult, SolverResultStatus, Variable, VariableKind,
    WeightedSum,
};

/// Job submitted to the solver service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub variables: Vec<WireVariable>,
    pub constraints: Vec<WireConstraint>,
    pub objective: WireObjective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVariable {
    pub name: String,
    /// `None` means unbounded below
    #[serde(default)]
    pub lower_bound: Option<f64>,
    /// `None` means unbounded above
    #[serde(default)]
    pub upper_bound: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireConstraint {
    pub terms: Vec<LinearExpression>,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
}

/// `coefficient * variable`, the variable referenced by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearExpression {
    pub coefficient: f64,
    pub variable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireObjective {
    pub expression: Vec<LinearExpression>,
    pub maximize: bool,
    #[serde(default)]
    pub offset: Option<f64>,
}

/// Solution as reported by the solver service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionResponse {
    pub is_feasible: bool,
    #[serde(default)]
    pub gap: Option<f64>,
    #[serde(default)]
    pub objective_value: Option<f64>,
    pub is_optimal: bool,
    #[serde(default)]
    pub solver_result_status: Option<String>,
    #[serde(default)]
    pub variable_values: BTreeMap<String, Option<f64>>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn to_wire_terms<S: Scalar, C: Scalar>(sum: &WeightedSum<S, C>) -> Vec<LinearExpression> {
    sum.iter()
        .map(|(variable, coefficient)| LinearExpression {
            coefficient: coefficient.to_f64(),
            variable: variable.name().to_string(),
        })
        .collect()
}

/// Convert a completed model to a job request.
///
/// Infinite bounds are left out, JSON has no representation for them.
pub fn to_job_request<S: Scalar, C: Scalar>(model: &CompletedOptimizationModel<S, C>) -> JobRequest {
    let variables = model
        .variables()
        .iter()
        .map(|variable| WireVariable {
            name: variable.name().to_string(),
            lower_bound: finite(variable.lower_bound().to_bound()),
            upper_bound: finite(variable.upper_bound().to_bound()),
        })
        .collect();

    let constraints = model
        .constraints()
        .iter()
        .map(|constraint| WireConstraint {
            terms: to_wire_terms(constraint.weighted_sum()),
            lower_bound: finite(constraint.interval().lower().to_bound()),
            upper_bound: finite(constraint.interval().upper().to_bound()),
        })
        .collect();

    let objective = model.objective();
    JobRequest {
        variables,
        constraints,
        objective: WireObjective {
            expression: to_wire_terms(objective.weighted_sum()),
            maximize: objective.maximize(),
            offset: objective.offset().map(Scalar::to_f64),
        },
    }
}

fn lookup<'a>(
    variables: &'a HashMap<String, Variable<Real>>,
    name: &str,
) -> ModelResult<&'a Variable<Real>> {
    variables
        .get(name)
        .ok_or_else(|| ModelError::UnknownVariable {
            name: name.to_string(),
        })
}

fn to_weighted_sum(
    variables: &HashMap<String, Variable<Real>>,
    terms: &[LinearExpression],
) -> ModelResult<WeightedSum<Real, Real>> {
    let mut sum = WeightedSum::new();
    for term in terms {
        sum.add(lookup(variables, &term.variable)?.clone(), Real(term.coefficient));
    }
    Ok(sum)
}

/// Kind every imported variable gets
pub const IMPORTED_VARIABLE_KIND: VariableKind = VariableKind::Integer;

/// Convert a job request to a completed model.
///
/// Every variable becomes an integer variable; missing bounds are infinite.
pub fn to_optimization_model(
    request: &JobRequest,
) -> ModelResult<CompletedOptimizationModel<Real, Real>> {
    let mut model = OptimizationModel::<Real, Real>::new();
    let mut variables = HashMap::with_capacity(request.variables.len());
    for wire in &request.variables {
        let interval = Interval::new(
            Real(wire.lower_bound.unwrap_or(f64::NEG_INFINITY)),
            Real(wire.upper_bound.unwrap_or(f64::INFINITY)),
        )?;
        let variable = model.new_variable(IMPORTED_VARIABLE_KIND, interval, &wire.name)?;
        variables.insert(wire.name.clone(), variable);
    }

    for wire in &request.constraints {
        let interval = Interval::new(
            Real(wire.lower_bound.unwrap_or(f64::NEG_INFINITY)),
            Real(wire.upper_bound.unwrap_or(f64::INFINITY)),
        )?;
        let constraint = model
            .create_constraint_builder()
            .add_weighted_sum(to_weighted_sum(&variables, &wire.terms)?)
            .build(interval);
        model.add_constraint(constraint);
    }

    let mut objective = model
        .create_objective_function_builder()
        .add_weighted_sum(to_weighted_sum(&variables, &request.objective.expression)?)
        .maximize(request.objective.maximize);
    if let Some(offset) = request.objective.offset {
        objective = objective.with_offset(Real(offset));
    }
    Ok(model.set_objective(objective.build()))
}

/// Convert a solver result to the wire response; every model variable gets an entry
pub fn to_solution_response<S: Scalar, C: Scalar, V: Scalar>(
    result: &SolverResult<S, V>,
    model: &CompletedOptimizationModel<S, C>,
) -> SolutionResponse {
    let variable_values = model
        .variables()
        .iter()
        .map(|variable| {
            let value = result.solution_values().get(variable).map(Scalar::to_f64);
            (variable.name().to_string(), value)
        })
        .collect();

    SolutionResponse {
        is_feasible: result.is_feasible(),
        gap: result.optimality_gap(),
        objective_value: result.objective_value(),
        is_optimal: result.is_optimal(),
        solver_result_status: Some(result.status().as_str().to_string()),
        variable_values,
    }
}

/// Convert a wire response back to a solver result for `model`.
///
/// A missing status reads as `UnknownStatus`, a missing gap as `f64::MAX` and a missing
/// value as NaN. Names that are not part of the model are rejected.
pub fn to_solver_result<S: Scalar, C: Scalar>(
    response: &SolutionResponse,
    model: &CompletedOptimizationModel<S, C>,
) -> ModelResult<SolverResult<S, Real>> {
    let values = response
        .variable_values
        .iter()
        .map(|(name, value)| {
            let variable = model
                .variable(name)
                .ok_or_else(|| ModelError::UnknownVariable { name: name.clone() })?;
            Ok::<_, ModelError>((variable.clone(), Real(value.unwrap_or(f64::NAN))))
        })
        .collect::<ModelResult<SolutionValues<S, Real>>>()?;

    let status = match &response.solver_result_status {
        Some(name) => name.parse().unwrap_or_else(|err| {
            warn!(error = %err, "unrecognized status in solution response");
            SolverResultStatus::UnknownStatus
        }),
        None => SolverResultStatus::UnknownStatus,
    };

    Ok(SolverResult::from_parts(
        values,
        response.objective_value,
        response.is_feasible,
        response.is_optimal,
        Some(response.gap.unwrap_or(f64::MAX)),
        status,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CompletedOptimizationModel<Real, Real> {
        let mut model = OptimizationModel::<Real, Real>::new();
        let x = model
            .new_integer_variable(Interval::new(Real(1.0), Real(3.0)).unwrap(), "x")
            .unwrap();
        let y = model
            .new_integer_variable(Interval::new(Real(0.0), Real::INFINITY).unwrap(), "y")
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
            .with_offset(Real(1.5))
            .build();
        model.set_objective(objective)
    }

    #[test]
    fn request_uses_camel_case_and_skips_infinite_bounds() {
        let request = to_job_request(&model());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["variables"][1]["name"], "y");
        assert_eq!(json["variables"][1]["lowerBound"], 0.0);
        assert!(json["variables"][1]["upperBound"].is_null());
        assert!(json["constraints"][0]["upperBound"].is_null());
        assert_eq!(json["objective"]["maximize"], false);
        assert_eq!(json["objective"]["offset"], 1.5);
        assert_eq!(json["objective"]["expression"][0]["variable"], "x");
    }

    #[test]
    fn request_converts_back_to_an_equal_model() {
        let original = model();
        let json = serde_json::to_string(&to_job_request(&original)).unwrap();
        let request: JobRequest = serde_json::from_str(&json).unwrap();
        let rebuilt = to_optimization_model(&request).unwrap();

        assert_eq!(rebuilt.variables(), original.variables());
        assert_eq!(rebuilt.constraints(), original.constraints());
        assert_eq!(rebuilt.objective(), original.objective());
        assert!(rebuilt
            .variables()
            .iter()
            .all(|v| v.kind() == IMPORTED_VARIABLE_KIND));
    }

    #[test]
    fn missing_bounds_are_infinite() {
        let json = r#"{
            "variables": [{ "name": "z" }],
            "constraints": [{ "terms": [{ "coefficient": 1.0, "variable": "z" }], "upperBound": 4.0 }],
            "objective": { "expression": [], "maximize": true }
        }"#;
        let request: JobRequest = serde_json::from_str(json).unwrap();
        let model = to_optimization_model(&request).unwrap();

        let z = model.variable("z").unwrap();
        assert_eq!(z.lower_bound(), Real::NEG_INFINITY);
        assert_eq!(z.upper_bound(), Real::INFINITY);
        assert_eq!(model.constraints()[0].interval().lower(), Real::NEG_INFINITY);
        assert!(model.objective().maximize());
        assert_eq!(model.objective().offset(), None);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let request = JobRequest {
            variables: vec![],
            constraints: vec![],
            objective: WireObjective {
                expression: vec![LinearExpression {
                    coefficient: 1.0,
                    variable: "ghost".to_string(),
                }],
                maximize: false,
                offset: None,
            },
        };
        assert_eq!(
            to_optimization_model(&request).unwrap_err(),
            ModelError::UnknownVariable {
                name: "ghost".to_string()
            }
        );
    }

    #[test]
    fn response_defaults() {
        let model = model();
        let json = r#"{
            "isFeasible": true,
            "isOptimal": false,
            "objectiveValue": 3.5,
            "variableValues": { "x": 1.0, "y": null }
        }"#;
        let response: SolutionResponse = serde_json::from_str(json).unwrap();
        let result = to_solver_result(&response, &model).unwrap();

        assert_eq!(result.status(), SolverResultStatus::UnknownStatus);
        assert_eq!(result.optimality_gap(), Some(f64::MAX));
        assert_eq!(result.objective_value(), Some(3.5));
        assert!(result.is_feasible());
        assert!(!result.switched_to_default_solver());
        assert_eq!(result.solution_values().get_by_name("x"), Some(Real(1.0)));
        assert!(result.solution_values().get_by_name("y").unwrap().0.is_nan());
    }

    #[test]
    fn result_maps_to_response_with_every_variable() {
        let model = model();
        let x = model.variable("x").unwrap().clone();
        let values: SolutionValues<Real, Real> = [(x, Real(1.0))].into_iter().collect();
        let result = SolverResult::solved(SolverResultStatus::Optimal, values, 2.0, Some(0.0));
        let response = to_solution_response(&result, &model);

        assert_eq!(response.solver_result_status.as_deref(), Some("Optimal"));
        assert_eq!(response.variable_values["x"], Some(1.0));
        assert_eq!(response.variable_values["y"], None);

        let back = to_solver_result(&response, &model).unwrap();
        assert_eq!(back.status(), SolverResultStatus::Optimal);
        assert!(back.is_optimal());
        assert_eq!(back.optimality_gap(), Some(0.0));
    }
}
