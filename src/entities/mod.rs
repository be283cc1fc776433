pub mod donors;
pub mod user_activities;

pub use donors as donor_entity;
pub use user_activities as user_activity_entity;
pub use user_activities::ActivityType;
