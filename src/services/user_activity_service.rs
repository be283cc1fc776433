use crate::database::DbPool;
use crate::entities::{ActivityType, user_activity_entity as activities};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{RequiredFields, UpdatableField, build_update, non_empty};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde_json::{Map, Value};

/// `PUT /users/:id` 可修改的列，按语句顺序排列
pub const USER_UPDATABLE_FIELDS: &[UpdatableField] = &[
    UpdatableField::text("name"),
    UpdatableField::text("phone"),
    UpdatableField::text("email"),
];

#[derive(Clone)]
pub struct UserActivityService {
    pool: DbPool,
}

impl UserActivityService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 记录一次登录或注册行为
    pub async fn record_activity(
        &self,
        request: CreateActivityRequest,
    ) -> AppResult<CreatedActivityResponse> {
        let mut required = RequiredFields::new();
        let user_id = required.text("userId", request.user_id.as_deref());
        let email = required.text("email", request.email.as_deref());
        let login_method = required.text("loginMethod", request.login_method.as_deref());
        let activity_type = required.text("activityType", request.activity_type.as_deref());
        required.finish()?;

        let activity_type = ActivityType::parse(activity_type).ok_or_else(|| {
            AppError::ValidationError("activityType must be 'login' or 'register'".to_string())
        })?;

        let name = non_empty(request.name.as_deref());
        if activity_type == ActivityType::Register && name.is_none() {
            return Err(AppError::ValidationError(
                "Name is required for registration".to_string(),
            ));
        }

        let timestamp = match non_empty(request.timestamp.as_deref()) {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    AppError::ValidationError("timestamp must be an RFC 3339 datetime".to_string())
                })?,
            None => Utc::now(),
        };

        let model = activities::ActiveModel {
            user_id: Set(user_id.to_string()),
            email: Set(email.to_string()),
            login_method: Set(login_method.to_string()),
            activity_type: Set(activity_type),
            name: Set(name.map(str::to_string)),
            phone: Set(non_empty(request.phone.as_deref()).map(str::to_string)),
            timestamp: Set(timestamp),
            user_agent: Set(non_empty(request.user_agent.as_deref()).map(str::to_string)),
            platform: Set(non_empty(request.platform.as_deref()).map(str::to_string)),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!(
            "Recorded {} activity {} for user {}",
            model.activity_type,
            model.id,
            model.user_id
        );
        Ok(model.into())
    }

    /// 全部行为记录，按时间倒序
    pub async fn list_activities(&self) -> AppResult<Vec<UserActivityResponse>> {
        let rows = activities::Entity::find()
            .order_by_desc(activities::Column::Timestamp)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_activity(&self, id: i64) -> AppResult<UserActivityResponse> {
        activities::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 某个业务用户的全部行为记录；没有记录时返回空列表
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<UserActivityResponse>> {
        let rows = activities::Entity::find()
            .filter(activities::Column::UserId.eq(user_id))
            .order_by_desc(activities::Column::Timestamp)
            .all(self.pool.as_ref())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 按白名单部分更新，单条语句完成
    pub async fn update_user(
        &self,
        id: i64,
        payload: Map<String, Value>,
    ) -> AppResult<UserActivityResponse> {
        let plan = build_update(&payload, USER_UPDATABLE_FIELDS)?;
        if plan.is_empty() {
            return Err(AppError::ValidationError(
                "No valid fields to update. Allowed fields: name, phone, email".to_string(),
            ));
        }

        let columns = plan.columns();
        let statement = plan.into_statement(activities::Entity, id);
        let updated = activities::Entity::find()
            .from_raw_sql(statement)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        log::info!("Updated user activity {id}: {columns:?}");
        Ok(updated.into())
    }

    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        let result = activities::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        log::info!("Deleted user activity {id}");
        Ok(())
    }
}
