use crate::domain::model::GeneratedNameResult;
use crate::utils::error::{NaminatorError, Result};
use serde_json::Value;

pub const MIN_GOODNESS: f64 = 0.0;
pub const MAX_GOODNESS: f64 = 5.0;
pub const MISSING_NAME: &str = "undefined";

/// 解析模型回覆的文字：必須是 JSON 陣列，每個元素再各自正規化
pub fn parse_name_combinations(text: &str) -> Result<Vec<GeneratedNameResult>> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return Err(malformed(format!("Invalid JSON: {}", e), text)),
    };

    match value {
        Value::Array(items) => Ok(items.iter().map(normalize_entry).collect()),
        _ => Err(malformed("Response is not an array".to_string(), text)),
    }
}

fn malformed(reason: String, text: &str) -> NaminatorError {
    tracing::error!(raw = %text, "Failed to parse model response: {}", reason);
    NaminatorError::MalformedResponse {
        reason,
        raw: text.to_string(),
    }
}

/// Non-object elements behave like objects with no fields.
pub fn normalize_entry(item: &Value) -> GeneratedNameResult {
    GeneratedNameResult {
        name: coerce_name(item.get("name")),
        goodness: normalize_goodness(coerce_number(item.get("goodness"))),
    }
}

pub fn coerce_name(value: Option<&Value>) -> String {
    match value {
        None => MISSING_NAME.to_string(),
        Some(Value::String(s)) => s.clone(),
        // null / 數字 / 布林 / 陣列 / 物件 都用精簡 JSON 文字
        Some(other) => other.to_string(),
    }
}

/// NaN means the value could not be read as a number.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        // 超出 f64 範圍的數字 (例如 1e400) as_f64 會回傳 None，改從原始文字解析成 ±inf
        Some(Value::Number(n)) => n
            .as_f64()
            .or_else(|| n.to_string().parse::<f64>().ok())
            .unwrap_or(f64::NAN),
        Some(Value::String(s)) => coerce_numeric_str(s),
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Null) => 0.0,
        None | Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

/// Only decimal notation and the exact spellings `Infinity` / `+Infinity` / `-Infinity`
/// are numbers; `inf`, `nan` and other words are NaN.
fn coerce_numeric_str(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed
            .chars()
            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') =>
        {
            f64::NAN
        }
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// Clamp to [0, 5] and round to one decimal. NaN maps to 0.0.
pub fn normalize_goodness(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_GOODNESS;
    }
    let clamped = raw.clamp(MIN_GOODNESS, MAX_GOODNESS);
    // + 0.0 把 -0.0 轉成 +0.0
    (clamped * 10.0).round() / 10.0 + 0.0
}
