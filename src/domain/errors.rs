// Error taxonomy: model construction, text import and solve-time failures

use std::path::PathBuf;

/// Errors raised while assembling a model. They signal a caller bug and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Lower bound {lower} is larger than upper bound {upper}")]
    InadmissibleBounds { lower: String, upper: String },

    #[error("Variable with same name already exists: {name}")]
    VariableAlreadyExists { name: String },

    #[error(
        "Number of weights must match number of variables. Weights: {weights}, Variables: {variables}"
    )]
    NumberOfWeightsNotEqualToNumberOfVariables { variables: usize, weights: usize },

    #[error("Unknown variable referenced: {name}")]
    UnknownVariable { name: String },
}

/// Errors raised while reading MPS text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MpsError {
    #[error("line {line}: unexpected section '{section}'")]
    UnexpectedSection { line: usize, section: String },

    #[error("line {line}: missing field in {section} record")]
    MissingField { line: usize, section: &'static str },

    #[error("line {line}: invalid number '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: unknown row '{name}'")]
    UnknownRow { line: usize, name: String },

    #[error("line {line}: row '{name}' is declared twice")]
    DuplicateRow { line: usize, name: String },

    #[error("line {line}: unknown column '{name}'")]
    UnknownColumn { line: usize, name: String },

    #[error("line {line}: unknown bound type '{kind}'")]
    UnknownBoundType { line: usize, kind: String },

    #[error("line {line}: unknown row type '{kind}'")]
    UnknownRowType { line: usize, kind: String },

    #[error("model has no objective row")]
    MissingObjectiveRow,

    #[error("name '{name}' cannot be written to MPS")]
    InvalidName { name: String },

    #[error("name '{name}' is used by more than one row or column")]
    DuplicateName { name: String },
}

/// Errors raised by solver adapters
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error(
        "Neither the expected solver {expected} nor fallback solver {fallback} could be initialized."
    )]
    SolverNotSupported { expected: String, fallback: String },

    #[error("Error in solver: {0}")]
    ProgramNotSolved(String),

    #[error("Unknown result status in solver {engine}: {status}")]
    UnmappedStatus { engine: &'static str, status: String },

    #[error("Variable {name} of kind {kind} is not supported by this solver")]
    UnsupportedVariable { name: String, kind: String },

    #[error("Variable {name} is not part of the model")]
    UnknownVariable { name: String },

    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),

    #[error("Invalid MPS model: {0}")]
    Mps(#[from] MpsError),

    #[error("Could not read model from {path}: {source}")]
    Import {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not export model to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
