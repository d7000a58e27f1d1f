// Engine-neutral flattened model: indexed columns, sparse rows and an objective

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{
    CompletedOptimizationModel, Result, Scalar, SolverError, Variable, VariableKind,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub lower: f64,
    pub upper: f64,
    pub kind: VariableKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub lower: f64,
    pub upper: f64,
}

/// What every engine adapter consumes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatModel {
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    pub objective: Vec<(usize, f64)>,
    pub offset: f64,
    pub maximize: bool,
}

impl FlatModel {
    /// Flattens `model`; the returned variables are indexed like the columns.
    ///
    /// Fails if a constraint or the objective references a variable that the model does not own.
    pub fn from_completed<S: Scalar, C: Scalar>(
        model: &CompletedOptimizationModel<S, C>,
    ) -> Result<(FlatModel, Vec<Variable<S>>)> {
        let variables = model.variables().to_vec();
        let index: HashMap<&Variable<S>, usize> =
            variables.iter().enumerate().map(|(i, v)| (v, i)).collect();

        let columns = variables
            .iter()
            .map(|v| Column {
                name: v.name().to_string(),
                lower: v.lower_bound().to_bound(),
                upper: v.upper_bound().to_bound(),
                kind: v.kind(),
            })
            .collect();

        let lookup = |variable: &Variable<S>| {
            index
                .get(variable)
                .copied()
                .ok_or_else(|| SolverError::UnknownVariable {
                    name: variable.name().to_string(),
                })
        };

        let names: Vec<Option<&str>> = model.constraints().iter().map(|c| c.name()).collect();
        let mut rows = Vec::with_capacity(model.constraints().len());
        for (constraint, name) in model.constraints().iter().zip(unique_row_names(&names)) {
            let terms = constraint
                .weighted_sum()
                .iter()
                .map(|(v, c)| Ok((lookup(v)?, c.to_f64())))
                .collect::<Result<Vec<_>>>()?;
            rows.push(Row {
                name,
                terms,
                lower: constraint.interval().lower().to_bound(),
                upper: constraint.interval().upper().to_bound(),
            });
        }

        let objective_fn = model.objective();
        let objective = objective_fn
            .weighted_sum()
            .iter()
            .map(|(v, c)| Ok((lookup(v)?, c.to_f64())))
            .collect::<Result<Vec<_>>>()?;

        let flat = FlatModel {
            name: "model".to_string(),
            columns,
            rows,
            objective,
            offset: objective_fn.offset().map_or(0.0, Scalar::to_f64),
            maximize: objective_fn.maximize(),
        };
        debug!(
            variables = flat.columns.len(),
            constraints = flat.rows.len(),
            "flattened model"
        );
        Ok((flat, variables))
    }

    /// Objective coefficient per column
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coefficients = vec![0.0; self.columns.len()];
        for &(column, coefficient) in &self.objective {
            coefficients[column] += coefficient;
        }
        coefficients
    }

    /// `offset + Σ c · x` for a full assignment
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|&(column, coefficient)| coefficient * values[column])
            .sum::<f64>()
            + self.offset
    }

    pub fn has_integer_columns(&self) -> bool {
        self.columns.iter().any(|c| c.kind.is_integral())
    }
}

/// One distinct name per constraint.
///
/// Unnamed constraints get `c{index}`. The first use of an explicit name keeps it; repeats and
/// default names that clash get a `_{k}` suffix that no other constraint uses.
fn unique_row_names(names: &[Option<&str>]) -> Vec<String> {
    let explicit: HashSet<&str> = names.iter().flatten().copied().collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(names.len());
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let base = name.map_or_else(|| format!("c{i}"), str::to_string);
            let mut candidate = base.clone();
            let mut k = 0;
            while taken.contains(&candidate)
                || ((k > 0 || name.is_none()) && explicit.contains(candidate.as_str()))
            {
                k += 1;
                candidate = format!("{base}_{k}");
            }
            if k > 0 {
                debug!(name = %base, renamed = %candidate, "renamed clashing constraint");
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}
