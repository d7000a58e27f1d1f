// Linear, integer-linear and mixed-integer solve pipeline
// flatten -> optional export -> resolve engine -> solve -> normalize

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CompletedOptimizationModel, Interval, OptimizationSolver, Real, Result, Scalar,
    SolverParameters, SolverResult, SolverType, Variable,
};
use crate::infrastructure::mps::ModelInMpsFormat;

use super::engine::LinearEngine;
use super::factory::SolverFactory;
use super::flat_model::FlatModel;
use super::normalize::into_result;

enum EngineChoice {
    Requested(SolverType),
    Fixed(Arc<dyn LinearEngine>),
}

/// Adapter for LP/ILP/MIP models; solution values are reals
pub struct LinearProgramSolver {
    engine: EngineChoice,
}

impl LinearProgramSolver {
    /// Solver for `solver_type`, falling back to HiGHS when it is not linked
    pub fn new(solver_type: SolverType) -> Self {
        Self {
            engine: EngineChoice::Requested(solver_type),
        }
    }

    /// Solver running a given engine, without fallback
    pub fn with_engine(engine: Arc<dyn LinearEngine>) -> Self {
        Self {
            engine: EngineChoice::Fixed(engine),
        }
    }

    fn resolve(&self) -> Result<(Arc<dyn LinearEngine>, bool)> {
        match &self.engine {
            EngineChoice::Requested(solver_type) => SolverFactory::resolve(*solver_type),
            EngineChoice::Fixed(engine) => Ok((Arc::clone(engine), false)),
        }
    }

    fn run<S: Scalar>(
        &self,
        flat: &FlatModel,
        variables: &[Variable<S>],
        parameters: &SolverParameters,
    ) -> Result<SolverResult<S, Real>> {
        if let Some(path) = &parameters.export_model_file_path {
            ModelInMpsFormat::from_flat(flat)?.write_to(path)?;
        }

        let (engine, switched) = self.resolve()?;
        info!(
            engine = engine.name(),
            family = %engine.family(),
            variables = flat.columns.len(),
            constraints = flat.rows.len(),
            "solving model"
        );
        let outcome = engine.solve_flat(flat, parameters)?;
        Ok(into_result(outcome.status, outcome.raw, variables)?
            .with_switched_to_default_solver(switched))
    }

    /// Solves a model given as MPS text.
    ///
    /// The variables of the result are rebuilt from the column names and bounds, so look
    /// values up with [`SolutionValues::get_by_name`](crate::domain::SolutionValues::get_by_name).
    pub fn solve_mps(
        &self,
        model: &ModelInMpsFormat,
        parameters: &SolverParameters,
    ) -> Result<SolverResult<Real, Real>> {
        let flat = model.parse()?;
        let variables = flat
            .columns
            .iter()
            .map(|column| {
                let interval = Interval::new(Real(column.lower), Real(column.upper))?;
                Ok(Variable::new(column.name.as_str(), interval, column.kind))
            })
            .collect::<Result<Vec<_>>>()?;
        self.run(&flat, &variables, parameters)
    }
}

impl<S: Scalar, C: Scalar> OptimizationSolver<S, C> for LinearProgramSolver {
    type Value = Real;

    fn solve(
        &self,
        model: &CompletedOptimizationModel<S, C>,
        parameters: &SolverParameters,
    ) -> Result<SolverResult<S, Real>> {
        let (flat, variables) = FlatModel::from_completed(model)?;
        self.run(&flat, &variables, parameters)
    }

    fn name(&self) -> &str {
        match &self.engine {
            EngineChoice::Requested(_) => "linear program solver",
            EngineChoice::Fixed(engine) => engine.name(),
        }
    }
}
