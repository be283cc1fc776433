use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::entities::donor_entity;

/// 献血者注册请求
///
/// `weight` 接受数字或数字字符串；布尔标记按真值语义转换。
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonorRequest {
    #[schema(example = "Nimali Silva")]
    pub full_name: Option<String>,
    #[schema(example = "nimali@example.com")]
    pub email: Option<String>,
    #[schema(example = "+94712345678")]
    pub phone: Option<String>,
    #[schema(example = "1994-06-18")]
    pub date_of_birth: Option<String>,
    #[schema(example = "O+")]
    pub blood_type: Option<String>,
    #[schema(value_type = Option<f64>, example = 58.5)]
    pub weight: Option<Value>,
    #[schema(example = "female")]
    pub gender: Option<String>,
    #[schema(example = "2024-12-01")]
    pub last_donation: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub has_disease: Option<Value>,
    pub disease_details: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub is_on_medication: Option<Value>,
    #[schema(value_type = Option<bool>)]
    pub had_recent_surgery: Option<Value>,
    #[schema(example = "Colombo")]
    pub district: Option<String>,
    #[schema(example = "Dehiwala")]
    pub area: Option<String>,
    #[schema(example = "12 Galle Road")]
    pub address: Option<String>,
    #[schema(example = "+94778889999")]
    pub emergency_contact: Option<String>,
    #[schema(value_type = Option<bool>)]
    pub terms: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDonorResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub blood_type: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DonorResponse {
    pub id: i64,
    pub full_name: String,
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

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonorSearchQuery {
    pub blood_type: Option<String>,
    pub district: Option<String>,
}

impl From<donor_entity::Model> for DonorResponse {
    fn from(m: donor_entity::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            phone: m.phone,
            date_of_birth: m.date_of_birth,
            blood_type: m.blood_type,
            weight: m.weight,
            gender: m.gender,
            last_donation_date: m.last_donation_date,
            has_disease: m.has_disease,
            disease_details: m.disease_details,
            is_on_medication: m.is_on_medication,
            had_recent_surgery: m.had_recent_surgery,
            district: m.district,
            area: m.area,
            address: m.address,
            emergency_contact: m.emergency_contact,
            terms_accepted: m.terms_accepted,
            created_at: m.created_at,
        }
    }
}

impl From<donor_entity::Model> for CreatedDonorResponse {
    fn from(m: donor_entity::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            blood_type: m.blood_type,
        }
    }
}

/// `PUT /donors/:id` 可更新字段；请求体中其它键会被忽略
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDonorRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub weight: Option<f64>,
    #[schema(example = "2025-01-15")]
    pub last_donation_date: Option<NaiveDate>,
    pub has_disease: Option<bool>,
    pub disease_details: Option<String>,
    pub is_on_medication: Option<bool>,
    pub had_recent_surgery: Option<bool>,
    pub district: Option<String>,
    pub area: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
}
