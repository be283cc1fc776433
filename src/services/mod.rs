pub mod donor_service;
pub mod user_activity_service;

pub use donor_service::*;
pub use user_activity_service::*;
