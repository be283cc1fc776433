use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "activity_type")]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    #[sea_orm(string_value = "login")]
    Login,
    #[sea_orm(string_value = "register")]
    Register,
}

impl ActivityType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "login" => Some(ActivityType::Login),
            "register" => Some(ActivityType::Register),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityType::Login => write!(f, "login"),
            ActivityType::Register => write!(f, "register"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "user_activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub email: String,
    pub login_method: String,
    pub activity_type: ActivityType,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub platform: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
