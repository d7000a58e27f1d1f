// Domain module: scalar algebra, model building and the solver contract

pub mod builders;
pub mod errors;
pub mod interval;
pub mod models;
pub mod parameter_keys;
pub mod parameters;
pub mod scalar;
pub mod solution;
pub mod solver_service;
pub mod value_objects;
pub mod variable;
pub mod weighted_sum;

pub use builders::*;
pub use errors::*;
pub use interval::*;
pub use models::*;
pub use parameter_keys::*;
pub use parameters::*;
pub use scalar::*;
pub use solution::*;
pub use solver_service::*;
pub use value_objects::*;
pub use variable::*;
pub use weighted_sum::*;
