// Literal parameter names per engine family. Pure data, keep it that way.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::parameters::SolverParameters;

/// Engine family a parameter string is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineFamily {
    Scip,
    Gurobi,
    Highs,
    CoinCbc,
    CpSat,
}

impl fmt::Display for EngineFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineFamily::Scip => write!(f, "SCIP"),
            EngineFamily::Gurobi => write!(f, "Gurobi"),
            EngineFamily::Highs => write!(f, "HiGHS"),
            EngineFamily::CoinCbc => write!(f, "COIN-OR CBC"),
            EngineFamily::CpSat => write!(f, "CP-SAT"),
        }
    }
}

/// Logical parameter concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKey {
    RelativeGap,
    NumberOfThreads,
    TimeLimit,
}

const KEYS: &[(EngineFamily, ParameterKey, &str)] = &[
    (EngineFamily::Scip, ParameterKey::RelativeGap, "limits/gap"),
    (EngineFamily::Scip, ParameterKey::NumberOfThreads, "parallel/maxnthreads"),
    (EngineFamily::Scip, ParameterKey::TimeLimit, "limits/time"),
    (EngineFamily::Gurobi, ParameterKey::RelativeGap, "MIPGap"),
    (EngineFamily::Gurobi, ParameterKey::NumberOfThreads, "Threads"),
    (EngineFamily::Gurobi, ParameterKey::TimeLimit, "TimeLimit"),
    (EngineFamily::Highs, ParameterKey::RelativeGap, "mip_rel_gap"),
    (EngineFamily::Highs, ParameterKey::NumberOfThreads, "threads"),
    (EngineFamily::Highs, ParameterKey::TimeLimit, "time_limit"),
    (EngineFamily::CoinCbc, ParameterKey::RelativeGap, "ratioGap"),
    (EngineFamily::CoinCbc, ParameterKey::NumberOfThreads, "threads"),
    (EngineFamily::CoinCbc, ParameterKey::TimeLimit, "seconds"),
    (EngineFamily::CpSat, ParameterKey::RelativeGap, "relative_gap_limit"),
    (EngineFamily::CpSat, ParameterKey::NumberOfThreads, "num_workers"),
    (EngineFamily::CpSat, ParameterKey::TimeLimit, "max_time_in_seconds"),
];

const SEPARATORS: &[(EngineFamily, char)] = &[
    (EngineFamily::Scip, '='),
    (EngineFamily::Gurobi, '='),
    (EngineFamily::Highs, '='),
    (EngineFamily::CoinCbc, '='),
    (EngineFamily::CpSat, ':'),
];

/// Literal name of `key` for `family`
pub fn parameter_key(family: EngineFamily, key: ParameterKey) -> &'static str {
    KEYS.iter()
        .find(|(f, k, _)| *f == family && *k == key)
        .map(|(_, _, literal)| *literal)
        .unwrap_or_default()
}

/// Key/value separator used in `family`'s parameter strings
pub fn parameter_separator(family: EngineFamily) -> char {
    SEPARATORS
        .iter()
        .find(|(f, _)| *f == family)
        .map_or('=', |(_, separator)| *separator)
}

impl SolverParameters {
    /// Mapped (key, value) pairs: gap, threads, time limit, then the verbatim extras
    pub fn to_solver_specific_parameters(&self, family: EngineFamily) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(gap) = self.relative_gap {
            pairs.push((
                parameter_key(family, ParameterKey::RelativeGap).to_string(),
                gap.to_string(),
            ));
        }
        if let Some(threads) = self.threads() {
            pairs.push((
                parameter_key(family, ParameterKey::NumberOfThreads).to_string(),
                threads.to_string(),
            ));
        }
        if let Some(seconds) = self.time_limit_seconds() {
            pairs.push((
                parameter_key(family, ParameterKey::TimeLimit).to_string(),
                seconds.to_string(),
            ));
        }
        pairs.extend(self.additional_solver_specific_parameters.iter().cloned());
        pairs
    }

    /// One `key<separator>value` per line
    pub fn to_parameter_string(&self, family: EngineFamily) -> String {
        let separator = parameter_separator(family);
        self.to_solver_specific_parameters(family)
            .into_iter()
            .map(|(key, value)| format!("{key}{separator}{value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_family_maps_every_key() {
        for family in [
            EngineFamily::Scip,
            EngineFamily::Gurobi,
            EngineFamily::Highs,
            EngineFamily::CoinCbc,
            EngineFamily::CpSat,
        ] {
            for key in [
                ParameterKey::RelativeGap,
                ParameterKey::NumberOfThreads,
                ParameterKey::TimeLimit,
            ] {
                assert!(!parameter_key(family, key).is_empty(), "{family} {key:?}");
            }
        }
    }

    #[test]
    fn literal_names() {
        assert_eq!(parameter_key(EngineFamily::Scip, ParameterKey::RelativeGap), "limits/gap");
        assert_eq!(
            parameter_key(EngineFamily::Scip, ParameterKey::NumberOfThreads),
            "parallel/maxnthreads"
        );
        assert_eq!(parameter_key(EngineFamily::Gurobi, ParameterKey::RelativeGap), "MIPGap");
        assert_eq!(parameter_key(EngineFamily::Gurobi, ParameterKey::NumberOfThreads), "Threads");
        assert_eq!(parameter_separator(EngineFamily::CpSat), ':');
        assert_eq!(parameter_separator(EngineFamily::Scip), '=');
    }

    #[test]
    fn renders_parameter_strings() {
        let params = SolverParameters::default()
            .with_threads(2)
            .with_time_limit_ms(2500)
            .with_parameter("presolving/maxrounds", "0");

        assert_eq!(
            params.to_parameter_string(EngineFamily::Scip),
            "limits/gap=0.0000001\nparallel/maxnthreads=2\nlimits/time=2.5\npresolving/maxrounds=0"
        );
        assert_eq!(
            SolverParameters::default()
                .with_relative_gap(None)
                .with_time_limit_ms(10_000)
                .to_parameter_string(EngineFamily::CpSat),
            "max_time_in_seconds:10"
        );
    }
}
