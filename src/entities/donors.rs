use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub blood_type: String,
    pub weight: f64,
    pub gender: String,
    pub last_donation_date: Option<NaiveDate>,
    pub has_disease: bool,
    pub disease_details: Option<String>,
    pub is_on_medication: bool,
    pub had_recent_surgery: bool,
    pub district: String,
    pub area: String,
    pub address: String,
    pub emergency_contact: String,
    pub terms_accepted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
