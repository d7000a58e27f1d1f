// Infrastructure: external text formats

pub mod mps;

pub use mps::{parse_mps, write_mps, ModelInMpsFormat};
