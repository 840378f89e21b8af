use crate::utils::error::{NaminatorError, Result};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> NaminatorError {
    NaminatorError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// API 根網址：http/https、必須有主機，且不能帶 query 或 fragment (後面會接 /v1/messages)
pub fn validate_api_base_url(field: &str, base_url: &str) -> Result<()> {
    let url = Url::parse(base_url)
        .map_err(|e| invalid(field, base_url, format!("Not a valid API base URL: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            base_url,
            format!("API base URL must use http or https, got {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, base_url, "API base URL has no host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field,
            base_url,
            "API base URL cannot carry a query string or fragment",
        ));
    }
    Ok(())
}

/// Model identifiers are single tokens such as `claude-haiku-4-5`.
pub fn validate_model_id(field: &str, model: &str) -> Result<()> {
    if model.is_empty() || model.chars().any(char::is_whitespace) {
        return Err(invalid(
            field,
            model,
            "Model identifier must be non-empty and contain no whitespace",
        ));
    }
    Ok(())
}

pub fn validate_env_var_name(field: &str, name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(invalid(
            field,
            name,
            "Environment variable name may only contain letters, digits and '_'",
        ));
    }
    Ok(())
}

/// `anthropic-version` 標頭是日期格式，例如 2023-06-01
pub fn validate_api_version(field: &str, version: &str) -> Result<()> {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$")
        .map_err(|e| invalid(field, version, format!("Invalid version pattern: {}", e)))?;
    if !re.is_match(version) {
        return Err(invalid(
            field,
            version,
            "API version must be a date such as 2023-06-01",
        ));
    }
    Ok(())
}

pub fn validate_limit<T: PartialOrd + std::fmt::Display + Copy>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field,
            value,
            format!("Must be between {} and {}", min, max),
        ));
    }
    Ok(())
}
