use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 所有接口共用的统一响应信封
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// 未归类的后端错误原文，仅在此类失败时出现
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            count: None,
            error: None,
        }
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            count: None,
            error: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            message: None,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            count: None,
            error: None,
        }
    }

    pub fn failure(message: String, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            count: None,
            error,
        }
    }
}

/// `GET /health` 数据库连通性
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub database: String,
}
