pub mod common;
pub mod donor;
pub mod user_activity;

pub use common::*;
pub use donor::*;
pub use user_activity::*;
