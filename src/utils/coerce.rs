use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// 按 JavaScript 真值语义把 JSON 值转换为布尔值
///
/// `null`、`false`、`0`、空字符串以及缺省字段视为 `false`，其余均为 `true`。
pub fn truthy_to_bool(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// 数字或数字字符串转换为 f64
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// 缺省或空字符串统一视为 None
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// 必填字段收集器：逐个取值，最后统一报告全部缺失字段
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// 缺失或空字符串时记录字段名并返回空串
    pub fn text<'a>(&mut self, name: &'static str, value: Option<&'a str>) -> &'a str {
        match non_empty(value) {
            Some(v) => v,
            None => {
                self.missing.push(name);
                ""
            }
        }
    }

    /// 非字符串字段按真值语义判断是否提供
    pub fn value<'a>(&mut self, name: &'static str, value: Option<&'a Value>) -> Option<&'a Value> {
        if truthy_to_bool(value) {
            value
        } else {
            self.missing.push(name);
            None
        }
    }

    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }

    pub fn finish(self) -> AppResult<()> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(AppError::ValidationError(format!(
            "Missing required fields: {}",
            self.missing.join(", ")
        )))
    }
}

/// 解析日期，接受 `YYYY-MM-DD` 或 RFC 3339 时间戳（取日期部分）
pub fn parse_date(field: &str, raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::ValidationError(format!("{field} must be a date (YYYY-MM-DD)")))
}
