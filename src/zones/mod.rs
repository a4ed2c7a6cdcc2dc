//! Canonical battle state ownership: fields, partner zones and the
//! zone/resource manager.

pub mod field;
pub mod manager;

pub use field::{FieldZone, PartnerZone, Totem, Unit};
pub use manager::{PlayedCard, ZoneManager};
