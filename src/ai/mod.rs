//! AI: greedy one-ply planner over deep-copied snapshots.

pub mod evaluator;
pub mod planner;

pub use evaluator::EvalWeights;
pub use planner::{legal_actions, simulate, Planner};
