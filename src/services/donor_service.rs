use crate::database::DbPool;
use crate::entities::donor_entity as donors;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{
    RequiredFields, UpdatableField, build_update, coerce_f64, non_empty, parse_date,
    truthy_to_bool,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QueryTrait, Select, Set,
};
use serde_json::{Map, Value};

/// `PUT /donors/:id` 可修改的列，按语句顺序排列
///
/// `email`、`blood_type`、`date_of_birth`、`gender`、`terms_accepted` 注册后不可修改。
pub const DONOR_UPDATABLE_FIELDS: &[UpdatableField] = &[
    UpdatableField::text("full_name"),
    UpdatableField::text("phone"),
    UpdatableField::float("weight"),
    UpdatableField::date("last_donation_date"),
    UpdatableField::boolean("has_disease"),
    UpdatableField::text("disease_details"),
    UpdatableField::boolean("is_on_medication"),
    UpdatableField::boolean("had_recent_surgery"),
    UpdatableField::text("district"),
    UpdatableField::text("area"),
    UpdatableField::text("address"),
    UpdatableField::text("emergency_contact"),
];

#[derive(Clone)]
pub struct DonorService {
    pool: DbPool,
}

impl DonorService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 注册献血者
    pub async fn register_donor(
        &self,
        request: CreateDonorRequest,
    ) -> AppResult<CreatedDonorResponse> {
        let mut required = RequiredFields::new();
        let full_name = required.text("fullName", request.full_name.as_deref());
        let email = required.text("email", request.email.as_deref());
        let phone = required.text("phone", request.phone.as_deref());
        let date_of_birth = required.text("dateOfBirth", request.date_of_birth.as_deref());
        let blood_type = required.text("bloodType", request.blood_type.as_deref());
        let weight = required.value("weight", request.weight.as_ref());
        let gender = required.text("gender", request.gender.as_deref());
        let district = required.text("district", request.district.as_deref());
        let area = required.text("area", request.area.as_deref());
        let address = required.text("address", request.address.as_deref());
        let emergency_contact =
            required.text("emergencyContact", request.emergency_contact.as_deref());
        required.finish()?;

        let weight = weight
            .and_then(coerce_f64)
            .ok_or_else(|| AppError::ValidationError("weight must be a number".to_string()))?;
        let date_of_birth = parse_date("dateOfBirth", date_of_birth)?;
        let last_donation_date = non_empty(request.last_donation.as_deref())
            .map(|raw| parse_date("lastDonation", raw))
            .transpose()?;

        let model = donors::ActiveModel {
            full_name: Set(full_name.to_string()),
            email: Set(email.to_string()),
            phone: Set(phone.to_string()),
            date_of_birth: Set(date_of_birth),
            blood_type: Set(blood_type.to_string()),
            weight: Set(weight),
            gender: Set(gender.to_string()),
            last_donation_date: Set(last_donation_date),
            has_disease: Set(truthy_to_bool(request.has_disease.as_ref())),
            disease_details: Set(non_empty(request.disease_details.as_deref()).map(str::to_string)),
            is_on_medication: Set(truthy_to_bool(request.is_on_medication.as_ref())),
            had_recent_surgery: Set(truthy_to_bool(request.had_recent_surgery.as_ref())),
            district: Set(district.to_string()),
            area: Set(area.to_string()),
            address: Set(address.to_string()),
            emergency_contact: Set(emergency_contact.to_string()),
            terms_accepted: Set(truthy_to_bool(request.terms.as_ref())),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await
        .map_err(|e| email_conflict(AppError::from(e)))?;

        log::info!("Registered donor {} ({})", model.id, model.blood_type);
        Ok(model.into())
    }

    /// 全部献血者，按注册时间倒序
    pub async fn list_donors(&self) -> AppResult<Vec<DonorResponse>> {
        self.search_donors(&DonorSearchQuery::default()).await
    }

    pub async fn get_donor(&self, id: i64) -> AppResult<DonorResponse> {
        donors::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Donor not found".to_string()))
    }

    /// 按血型、地区筛选（均可选，同时提供时取交集）
    pub async fn search_donors(&self, query: &DonorSearchQuery) -> AppResult<Vec<DonorResponse>> {
        let rows = search_query(query).all(self.pool.as_ref()).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// 按白名单部分更新，单条语句完成
    pub async fn update_donor(
        &self,
        id: i64,
        payload: Map<String, Value>,
    ) -> AppResult<DonorResponse> {
        let plan = build_update(&payload, DONOR_UPDATABLE_FIELDS)?;
        if plan.is_empty() {
            let allowed = DONOR_UPDATABLE_FIELDS
                .iter()
                .map(|f| f.column)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::ValidationError(format!(
                "No valid fields to update. Allowed fields: {allowed}"
            )));
        }

        let columns = plan.columns();
        let statement = plan.into_statement(donors::Entity, id);
        let updated = donors::Entity::find()
            .from_raw_sql(statement)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound("Donor not found".to_string()))?;

        log::info!("Updated donor {id}: {columns:?}");
        Ok(updated.into())
    }

    pub async fn delete_donor(&self, id: i64) -> AppResult<()> {
        let result = donors::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Donor not found".to_string()));
        }
        log::info!("Deleted donor {id}");
        Ok(())
    }
}

/// 献血者表唯一约束只有 email
fn email_conflict(err: AppError) -> AppError {
    match err {
        AppError::Conflict(_) => {
            AppError::Conflict("A donor with this email already exists".to_string())
        }
        other => other,
    }
}

/// 空字符串视为未提供
pub fn search_query(query: &DonorSearchQuery) -> Select<donors::Entity> {
    donors::Entity::find()
        .apply_if(non_empty(query.blood_type.as_deref()), |q, blood_type| {
            q.filter(donors::Column::BloodType.eq(blood_type))
        })
        .apply_if(non_empty(query.district.as_deref()), |q, district| {
            q.filter(donors::Column::District.eq(district))
        })
        .order_by_desc(donors::Column::CreatedAt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use crate::database::{mock_pool, transaction_log};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use serde_json::json;

    fn donor(id: i64, blood_type: &str, district: &str) -> donors::Model {
        donors::Model {
            id,
            full_name: "Nimali Silva".to_string(),
            email: format!("donor{id}@example.com"),
            phone: "+94712345678".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1994, 6, 18).unwrap(),
            blood_type: blood_type.to_string(),
            weight: 58.5,
            gender: "female".to_string(),
            last_donation_date: None,
            has_disease: false,
            disease_details: None,
            is_on_medication: false,
            had_recent_surgery: false,
            district: district.to_string(),
            area: "Dehiwala".to_string(),
            address: "12 Galle Road".to_string(),
            emergency_contact: "+94778889999".to_string(),
            terms_accepted: true,
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 10, 0, 0).unwrap(),
        }
    }

    fn registration() -> CreateDonorRequest {
        CreateDonorRequest {
            full_name: Some("Nimali Silva".to_string()),
            email: Some("donor1@example.com".to_string()),
            phone: Some("+94712345678".to_string()),
            date_of_birth: Some("1994-06-18".to_string()),
            blood_type: Some("O+".to_string()),
            weight: Some(json!("58.5")),
            gender: Some("female".to_string()),
            district: Some("Colombo".to_string()),
            area: Some("Dehiwala".to_string()),
            address: Some("12 Galle Road".to_string()),
            emergency_contact: Some("+94778889999".to_string()),
            terms: Some(json!(true)),
            ..Default::default()
        }
    }

    fn sql_of(query: &DonorSearchQuery) -> String {
        search_query(query).build(DatabaseBackend::Postgres).sql
    }

    #[test]
    fn search_with_both_filters_uses_and() {
        let sql = sql_of(&DonorSearchQuery {
            blood_type: Some("O+".to_string()),
            district: Some("Colombo".to_string()),
        });
        assert!(sql.contains(r#"WHERE "donors"."blood_type" = $1 AND "donors"."district" = $2"#));
        assert!(sql.contains(r#"ORDER BY "donors"."created_at" DESC"#));
    }

    #[test]
    fn search_with_one_filter() {
        let sql = sql_of(&DonorSearchQuery {
            blood_type: None,
            district: Some("Kandy".to_string()),
        });
        assert!(sql.contains(r#"WHERE "donors"."district" = $1"#));
        assert!(!sql.contains(r#""donors"."blood_type" ="#));
    }

    #[test]
    fn search_without_filters_selects_everything() {
        let sql = sql_of(&DonorSearchQuery {
            blood_type: Some(String::new()),
            district: None,
        });
        assert!(!sql.contains("WHERE"));
        assert!(sql.contains(r#"ORDER BY "donors"."created_at" DESC"#));
    }

    #[test]
    fn duplicate_email_message() {
        let err = email_conflict(AppError::Conflict("Duplicate entry".to_string()));
        assert!(
            matches!(err, AppError::Conflict(msg) if msg == "A donor with this email already exists")
        );

        let err = email_conflict(AppError::NotFound("Donor not found".to_string()));
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn allow_list_excludes_fixed_columns() {
        let columns: Vec<_> = DONOR_UPDATABLE_FIELDS.iter().map(|f| f.column).collect();
        for fixed in ["email", "blood_type", "date_of_birth", "gender", "terms_accepted"] {
            assert!(!columns.contains(&fixed), "{fixed} must not be updatable");
        }
        assert_eq!(columns.len(), 12);
    }

    #[tokio::test]
    async fn register_returns_identifying_fields() {
        let db = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![donor(1, "O+", "Colombo")]]),
        );
        let service = DonorService::new(db);

        let created = service.register_donor(registration()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.full_name, "Nimali Silva");
        assert_eq!(created.email, "donor1@example.com");
        assert_eq!(created.blood_type, "O+");
    }

    #[tokio::test]
    async fn register_lists_missing_fields_without_touching_storage() {
        let db = mock_pool(MockDatabase::new(DatabaseBackend::Postgres));
        let service = DonorService::new(db.clone());

        let request = CreateDonorRequest {
            weight: Some(json!(0)),
            area: None,
            ..registration()
        };
        let err = service.register_donor(request).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(msg) if msg == "Missing required fields: weight, area"
        ));
        assert!(transaction_log(&db).is_empty());
    }

    #[tokio::test]
    async fn register_rejects_non_numeric_weight() {
        let db = mock_pool(MockDatabase::new(DatabaseBackend::Postgres));
        let service = DonorService::new(db);

        let request = CreateDonorRequest {
            weight: Some(json!("sixty")),
            ..registration()
        };
        let err = service.register_donor(request).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg == "weight must be a number"));
    }

    #[tokio::test]
    async fn update_with_disallowed_fields_only_is_rejected() {
        let db = mock_pool(MockDatabase::new(DatabaseBackend::Postgres));
        let service = DonorService::new(db.clone());

        let payload = json!({ "email": "x" });
        let err = service
            .update_donor(1, payload.as_object().cloned().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(transaction_log(&db).is_empty());
    }

    #[tokio::test]
    async fn update_applies_allowed_fields() {
        let mut refreshed = donor(2, "A-", "Galle");
        refreshed.weight = 61.0;
        let db = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![refreshed]]),
        );
        let service = DonorService::new(db);

        let payload = json!({ "weight": 61, "blood_type": "B+" });
        let updated = service
            .update_donor(2, payload.as_object().cloned().unwrap())
            .await
            .unwrap();
        assert_eq!(updated.weight, 61.0);
        assert_eq!(updated.blood_type, "A-");
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let db = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 0,
                    },
                ]),
        );
        let service = DonorService::new(db);

        assert!(service.delete_donor(9).await.is_ok());
        assert!(matches!(
            service.delete_donor(9).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn missing_donor_is_not_found() {
        let db = mock_pool(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<donors::Model>::new()]),
        );
        let service = DonorService::new(db);

        assert!(matches!(
            service.get_donor(12).await,
            Err(AppError::NotFound(_))
        ));
    }
}
