//! Turn and flow control: the per-match `Battle` context.

pub mod battle;

pub use battle::{Battle, PlayerSetup};
