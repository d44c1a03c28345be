//! Payment screening by degree of separation in the payment graph.

pub use classifier::{classify, Classifier, Verdicts};
pub use data::{build_index, GraphIndex};
pub use error::{Error, Result};

pub mod classifier;
pub mod data;
pub mod error;
pub mod task;
pub mod types;

pub(crate) mod tools;
