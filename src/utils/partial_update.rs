use chrono::NaiveDate;
use sea_orm::sea_query::ColumnType;
use sea_orm::{ColumnTrait, DbBackend, EntityName, EntityTrait, IdenStatic, Iterable, Statement, Value};
use serde_json::{Map, Value as JsonValue};

use crate::error::{AppError, AppResult};
use crate::utils::coerce::{coerce_f64, parse_date, truthy_to_bool};

/// 绑定参数时使用的列类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
    Bool,
    Date,
}

/// 部分更新允许修改的单个列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatableField {
    pub column: &'static str,
    pub kind: FieldKind,
}

impl UpdatableField {
    pub const fn text(column: &'static str) -> Self {
        Self {
            column,
            kind: FieldKind::Text,
        }
    }

    pub const fn float(column: &'static str) -> Self {
        Self {
            column,
            kind: FieldKind::Float,
        }
    }

    pub const fn boolean(column: &'static str) -> Self {
        Self {
            column,
            kind: FieldKind::Bool,
        }
    }

    pub const fn date(column: &'static str) -> Self {
        Self {
            column,
            kind: FieldKind::Date,
        }
    }

    fn bind(&self, value: &JsonValue) -> AppResult<Value> {
        let column = self.column;
        match self.kind {
            FieldKind::Text => match value {
                JsonValue::Null => Ok(Option::<String>::None.into()),
                JsonValue::String(s) => Ok(s.clone().into()),
                JsonValue::Number(n) => Ok(n.to_string().into()),
                _ => Err(AppError::ValidationError(format!(
                    "{column} must be a string"
                ))),
            },
            FieldKind::Float => match value {
                JsonValue::Null => Ok(Option::<f64>::None.into()),
                other => coerce_f64(other).map(Value::from).ok_or_else(|| {
                    AppError::ValidationError(format!("{column} must be a number"))
                }),
            },
            FieldKind::Bool => Ok(truthy_to_bool(Some(value)).into()),
            FieldKind::Date => match value {
                JsonValue::Null => Ok(Option::<NaiveDate>::None.into()),
                JsonValue::String(s) if s.is_empty() => Ok(Option::<NaiveDate>::None.into()),
                JsonValue::String(s) => Ok(parse_date(column, s)?.into()),
                _ => Err(AppError::ValidationError(format!(
                    "{column} must be a date (YYYY-MM-DD)"
                ))),
            },
        }
    }
}

/// 有序的 `column = $n` 赋值及其绑定值
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub assignments: Vec<(&'static str, String)>,
    pub values: Vec<Value>,
}

impl UpdatePlan {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    /// 单条 `UPDATE ... RETURNING` 语句，行 id 最后绑定
    pub fn into_statement<E: EntityTrait>(self, entity: E, id: i64) -> Statement {
        let set_clause = self
            .assignments
            .iter()
            .map(|(column, placeholder)| format!("\"{column}\" = {placeholder}"))
            .collect::<Vec<_>>()
            .join(", ");
        let id_placeholder = format!("${}", self.values.len() + 1);
        let sql = format!(
            "UPDATE \"{}\" SET {set_clause} WHERE \"id\" = {id_placeholder} RETURNING {}",
            entity.table_name(),
            returning_columns::<E>(),
        );

        let mut values = self.values;
        values.push(id.into());
        Statement::from_sql_and_values(DbBackend::Postgres, &sql, values)
    }
}

/// 实体的全部列；枚举列转成 text，原始语句的结果才能解码回 Model
pub fn returning_columns<E: EntityTrait>() -> String {
    E::Column::iter()
        .map(|column| {
            let name = column.as_str();
            match column.def().get_column_type() {
                ColumnType::Enum { .. } => format!("\"{name}\"::text AS \"{name}\""),
                _ => format!("\"{name}\""),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// 按白名单顺序取 `payload` 与 `allow_list` 的交集
///
/// 白名单以外的键被忽略；没有可更新字段时返回空计划，由调用方决定如何报错。
pub fn build_update(
    payload: &Map<String, JsonValue>,
    allow_list: &[UpdatableField],
) -> AppResult<UpdatePlan> {
    let mut assignments = Vec::new();
    let mut values = Vec::new();

    for field in allow_list {
        let Some(raw) = payload.get(field.column) else {
            continue;
        };
        values.push(field.bind(raw)?);
        assignments.push((field.column, format!("${}", values.len())));
    }

    Ok(UpdatePlan {
        assignments,
        values,
    })
}
