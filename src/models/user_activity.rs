use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{ActivityType, user_activity_entity};

/// 登录/注册行为上报请求
///
/// 所有字段均为可选，缺失或空字符串在服务层统一按"未提供"处理。
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[schema(example = "firebase-uid-123")]
    pub user_id: Option<String>,
    #[schema(example = "kamal@example.com")]
    pub email: Option<String>,
    #[schema(example = "google")]
    pub login_method: Option<String>,
    #[schema(example = "register")]
    pub activity_type: Option<String>,
    #[schema(example = "Kamal Perera")]
    pub name: Option<String>,
    #[schema(example = "+94771234567")]
    pub phone: Option<String>,
    /// RFC 3339，缺省为服务器接收时间
    #[schema(example = "2025-03-01T08:30:00Z")]
    pub timestamp: Option<String>,
    pub user_agent: Option<String>,
    #[schema(example = "web")]
    pub platform: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedActivityResponse {
    pub id: i64,
    pub user_id: String,
    pub email: String,
    pub activity_type: ActivityType,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserActivityResponse {
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

impl From<user_activity_entity::Model> for UserActivityResponse {
    fn from(m: user_activity_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            email: m.email,
            login_method: m.login_method,
            activity_type: m.activity_type,
            name: m.name,
            phone: m.phone,
            timestamp: m.timestamp,
            user_agent: m.user_agent,
            platform: m.platform,
        }
    }
}

impl From<user_activity_entity::Model> for CreatedActivityResponse {
    fn from(m: user_activity_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            email: m.email,
            activity_type: m.activity_type,
        }
    }
}

/// `PUT /users/:id` 可更新字段；请求体中其它键会被忽略
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
