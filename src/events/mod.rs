//! State-change notifications and the bus that delivers them.

mod bus;
mod event;

pub use bus::{EventBus, SubscriptionId};
pub use event::BattleEvent;
