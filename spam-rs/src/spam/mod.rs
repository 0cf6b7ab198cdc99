//! Spam classification module
//!
//! Provides the word-presence Bayesian model, batch classification and
//! evaluation metrics.

pub mod metrics;
pub mod model;
pub mod snapshot;
pub mod types;

pub use metrics::{accuracy, precision, Metrics};
pub use model::{SpamModel, SMOOTHING};
pub use snapshot::{ModelSnapshot, TokenCount};
pub use types::*;
