//! Action queue and execution pipeline state.

mod queue;

pub use queue::{ActionQueue, PipelineState, Suspension};
