// Bounded depth-first search over finite integer domains
// Used as the constraint programming engine for small integer models

use std::time::{Duration, Instant};

use crate::domain::SolverResultStatus;

use super::flat_model::FlatModel;
use super::normalize::NativeStatus;

/// Widest domain a single variable may have
pub const MAX_DOMAIN_WIDTH: i64 = 1_000_000;

const NODES_BETWEEN_CLOCK_CHECKS: u64 = 1024;

/// Status set reported by the search, mirroring CP-SAT's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpStatus {
    Unknown,
    ModelInvalid,
    Feasible,
    Infeasible,
    Optimal,
}

impl NativeStatus for CpStatus {
    const ENGINE: &'static str = "CP search";

    fn to_result_status(&self) -> std::result::Result<SolverResultStatus, String> {
        Ok(match self {
            CpStatus::Unknown => SolverResultStatus::UnknownStatus,
            CpStatus::ModelInvalid => SolverResultStatus::ModelInvalid,
            CpStatus::Feasible => SolverResultStatus::Feasible,
            CpStatus::Infeasible => SolverResultStatus::Infeasible,
            CpStatus::Optimal => SolverResultStatus::Optimal,
        })
    }
}

/// Integer model the search runs on
#[derive(Debug, Clone, PartialEq)]
pub struct CpProblem {
    domains: Vec<(i64, i64)>,
    /// Dense coefficients, one vector per row
    rows: Vec<Vec<i128>>,
    row_bounds: Vec<(Option<i128>, Option<i128>)>,
    objective: Vec<i128>,
    offset: i128,
    maximize: bool,
}

fn integral(value: f64) -> Option<i128> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i128)
}

fn bound(value: f64, what: &str) -> std::result::Result<Option<i128>, String> {
    if value.is_infinite() {
        return Ok(None);
    }
    integral(value)
        .map(Some)
        .ok_or_else(|| format!("{what} {value} is not integral"))
}

/// Largest `|Σ cⱼ·xⱼ| + |offset|` over the domains, `None` past `i128`.
///
/// Every partial sum the search forms is bounded by it.
fn magnitude(coefficients: &[i128], domains: &[(i64, i64)], offset: i128) -> Option<i128> {
    coefficients
        .iter()
        .zip(domains)
        .try_fold(offset.checked_abs()?, |total, (&c, &(lo, hi))| {
            let a = c.checked_mul(i128::from(lo))?.checked_abs()?;
            let b = c.checked_mul(i128::from(hi))?.checked_abs()?;
            total.checked_add(a.max(b))
        })
}

impl CpProblem {
    /// Rejects infinite or too wide domains, fractional data and activities past `i128`
    pub fn from_flat(model: &FlatModel) -> std::result::Result<Self, String> {
        let domains = model
            .columns
            .iter()
            .map(|column| {
                let lower = integral(column.lower.ceil()).and_then(|l| i64::try_from(l).ok());
                let upper = integral(column.upper.floor()).and_then(|u| i64::try_from(u).ok());
                match (lower, upper) {
                    (Some(l), Some(u)) if i128::from(u) - i128::from(l) < i128::from(MAX_DOMAIN_WIDTH) => {
                        Ok((l, u))
                    }
                    _ => Err(format!(
                        "domain of {} is unbounded or wider than {MAX_DOMAIN_WIDTH}",
                        column.name
                    )),
                }
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let n = domains.len();
        let mut rows = Vec::with_capacity(model.rows.len());
        let mut row_bounds = Vec::with_capacity(model.rows.len());
        for row in &model.rows {
            let mut dense = vec![0i128; n];
            for &(column, coefficient) in &row.terms {
                let value = integral(coefficient)
                    .ok_or_else(|| format!("coefficient {coefficient} is not integral"))?;
                dense[column] = dense[column]
                    .checked_add(value)
                    .ok_or_else(|| format!("coefficients of row {} overflow", row.name))?;
            }
            if magnitude(&dense, &domains, 0).is_none() {
                return Err(format!("activity of row {} overflows", row.name));
            }
            rows.push(dense);
            row_bounds.push((bound(row.lower, "bound")?, bound(row.upper, "bound")?));
        }

        let mut objective = vec![0i128; n];
        for &(column, coefficient) in &model.objective {
            let value = integral(coefficient)
                .ok_or_else(|| format!("objective coefficient {coefficient} is not integral"))?;
            objective[column] = objective[column]
                .checked_add(value)
                .ok_or_else(|| "objective coefficients overflow".to_string())?;
        }
        let offset = integral(model.offset).ok_or_else(|| "offset is not integral".to_string())?;
        if magnitude(&objective, &domains, offset).is_none() {
            return Err("objective value overflows".to_string());
        }

        Ok(Self {
            domains,
            rows,
            row_bounds,
            objective,
            offset,
            maximize: model.maximize,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    fn objective_value(&self, values: &[i64]) -> i128 {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, &v)| c * i128::from(v))
            .sum::<i128>()
            + self.offset
    }
}

/// Final state of a search
#[derive(Debug, Clone, PartialEq)]
pub struct CpOutcome {
    pub status: CpStatus,
    /// Best solution when optimizing, last one when enumerating
    pub solution: Option<Vec<i64>>,
    pub objective_value: Option<f64>,
    pub best_bound: Option<f64>,
}

/// Per row and objective: min/max contribution of the variables from `depth` on
struct Suffix {
    min: Vec<i128>,
    max: Vec<i128>,
}

impl Suffix {
    fn new(coefficients: &[i128], domains: &[(i64, i64)]) -> Self {
        let n = domains.len();
        let mut min = vec![0i128; n + 1];
        let mut max = vec![0i128; n + 1];
        for j in (0..n).rev() {
            let (lo, hi) = domains[j];
            let a = coefficients[j] * i128::from(lo);
            let b = coefficients[j] * i128::from(hi);
            min[j] = min[j + 1] + a.min(b);
            max[j] = max[j + 1] + a.max(b);
        }
        Self { min, max }
    }
}

/// Depth-first search with bound propagation over row activities.
///
/// With `optimize` it keeps the best solution and prunes on the objective bound and reports
/// each improving solution. Otherwise it reports every feasible assignment.
pub struct CpSearch<'a> {
    problem: &'a CpProblem,
    optimize: bool,
    deadline: Option<Instant>,
    on_solution: &'a mut dyn FnMut(&[i64]),
    row_suffix: Vec<Suffix>,
    objective_suffix: Suffix,
    activity: Vec<i128>,
    objective: i128,
    values: Vec<i64>,
    incumbent: Option<(Vec<i64>, i128)>,
    nodes: u64,
    timed_out: bool,
}

impl<'a> CpSearch<'a> {
    pub fn new(
        problem: &'a CpProblem,
        optimize: bool,
        time_limit: Option<Duration>,
        on_solution: &'a mut dyn FnMut(&[i64]),
    ) -> Self {
        let row_suffix = problem
            .rows
            .iter()
            .map(|row| Suffix::new(row, &problem.domains))
            .collect();
        Self {
            problem,
            optimize,
            deadline: time_limit.map(|limit| Instant::now() + limit),
            on_solution,
            row_suffix,
            objective_suffix: Suffix::new(&problem.objective, &problem.domains),
            activity: vec![0; problem.rows.len()],
            objective: 0,
            values: vec![0; problem.num_variables()],
            incumbent: None,
            nodes: 0,
            timed_out: false,
        }
    }

    pub fn run(mut self) -> CpOutcome {
        if self.consistent(0) {
            self.descend(0);
        }
        let found = self.incumbent.is_some();
        let status = match (self.timed_out, found) {
            (false, true) => CpStatus::Optimal,
            (false, false) => CpStatus::Infeasible,
            (true, true) => CpStatus::Feasible,
            (true, false) => CpStatus::Unknown,
        };

        let root_bound = if self.problem.maximize {
            self.objective_suffix.max[0]
        } else {
            self.objective_suffix.min[0]
        } + self.problem.offset;

        match self.incumbent {
            Some((solution, objective)) => {
                // Without an objective the engine reports zero for both
                let (objective_value, best_bound) = match (self.optimize, self.timed_out) {
                    (false, _) => (0.0, 0.0),
                    (true, false) => (objective as f64, objective as f64),
                    (true, true) => (objective as f64, root_bound as f64),
                };
                CpOutcome {
                    status,
                    solution: Some(solution),
                    objective_value: Some(objective_value),
                    best_bound: Some(best_bound),
                }
            }
            None => CpOutcome {
                status,
                solution: None,
                objective_value: None,
                best_bound: None,
            },
        }
    }

    /// False once the search has to stop
    fn descend(&mut self, depth: usize) -> bool {
        self.nodes += 1;
        if self.nodes % NODES_BETWEEN_CLOCK_CHECKS == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.timed_out = true;
                    return false;
                }
            }
        }

        if depth == self.values.len() {
            self.record();
            return true;
        }

        let (lo, hi) = self.problem.domains[depth];
        for value in lo..=hi {
            self.assign(depth, value, 1);
            let keep_going =
                !(self.consistent(depth + 1) && self.can_improve(depth + 1)) || self.descend(depth + 1);
            self.assign(depth, value, -1);
            if !keep_going {
                return false;
            }
        }
        true
    }

    fn assign(&mut self, depth: usize, value: i64, sign: i128) {
        let v = i128::from(value) * sign;
        for (row, activity) in self.problem.rows.iter().zip(self.activity.iter_mut()) {
            *activity += row[depth] * v;
        }
        self.objective += self.problem.objective[depth] * v;
        if sign > 0 {
            self.values[depth] = value;
        }
    }

    /// Every row can still reach its interval with the unassigned variables
    fn consistent(&self, depth: usize) -> bool {
        self.activity
            .iter()
            .zip(&self.row_suffix)
            .zip(&self.problem.row_bounds)
            .all(|((activity, suffix), (lower, upper))| {
                lower.map_or(true, |l| activity + suffix.max[depth] >= l)
                    && upper.map_or(true, |u| activity + suffix.min[depth] <= u)
            })
    }

    fn can_improve(&self, depth: usize) -> bool {
        if !self.optimize {
            return true;
        }
        match &self.incumbent {
            None => true,
            Some((_, best)) if self.problem.maximize => {
                self.objective + self.objective_suffix.max[depth] + self.problem.offset > *best
            }
            Some((_, best)) => {
                self.objective + self.objective_suffix.min[depth] + self.problem.offset < *best
            }
        }
    }

    fn record(&mut self) {
        let objective = self.problem.objective_value(&self.values);
        (self.on_solution)(&self.values);
        self.incumbent = Some((self.values.clone(), objective));
    }
}
