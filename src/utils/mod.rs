pub mod coerce;
pub mod partial_update;

pub use coerce::*;
pub use partial_update::{FieldKind, UpdatableField, UpdatePlan, build_update};
