use crate::utils::error::{NaminatorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-haiku-4-5";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const MAX_TOKENS_LIMIT: u32 = 64_000;
pub const MAX_RETRIES_LIMIT: u32 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NaminatorConfig {
    pub api: ApiConfig,
    pub generation: GenerationConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// 明確指定時優先於環境變數
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub anthropic_version: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            anthropic_version: DEFAULT_ANTHROPIC_VERSION.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub max_tokens: u32,
    /// `{{first}}` / `{{second}}` 會被替換成輸入名稱
    pub prompt_template: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            prompt_template: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_delay_ms: 500,
        }
    }
}

impl RetryConfig {
    /// 指數退避：initial_delay * 2^attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_millis(self.initial_delay_ms.saturating_mul(factor))
    }
}

impl NaminatorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NaminatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NaminatorError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ANTHROPIC_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NaminatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 取得 API 金鑰：設定檔優先，其次環境變數
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = self.api.api_key.as_deref() {
            if !key.trim().is_empty() && !key.starts_with("${") {
                return Ok(key.to_string());
            }
        }

        match std::env::var(&self.api.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(NaminatorError::MissingConfigError {
                field: self.api.api_key_env.clone(),
            }),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for NaminatorConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_api_base_url("api.base_url", &self.api.base_url)?;
        validation::validate_env_var_name("api.api_key_env", &self.api.api_key_env)?;
        validation::validate_api_version("api.anthropic_version", &self.api.anthropic_version)?;
        validation::validate_model_id("generation.model", &self.generation.model)?;
        validation::validate_limit(
            "generation.max_tokens",
            self.generation.max_tokens,
            1,
            MAX_TOKENS_LIMIT,
        )?;
        validation::validate_limit("retry.max_retries", self.retry.max_retries, 0, MAX_RETRIES_LIMIT)?;

        if let Some(template) = &self.generation.prompt_template {
            crate::core::prompt::PromptTemplate::new(template.clone()).validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = NaminatorConfig::default();

        assert_eq!(config.api.base_url, "https://api.anthropic.com");
        assert_eq!(config.generation.model, "claude-haiku-4-5");
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.retry.max_retries, 0);
        assert!(config.request_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_content = r#"
[api]
timeout_seconds = 30

[generation]
model = "claude-sonnet-4-5"
"#;

        let config = NaminatorConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.generation.model, "claude-sonnet-4-5");
        assert_eq!(config.generation.max_tokens, 1024);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("NAMINATOR_TEST_BASE_URL", "http://localhost:9999");

        let toml_content = r#"
[api]
base_url = "${NAMINATOR_TEST_BASE_URL}"
"#;

        let config = NaminatorConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9999");

        std::env::remove_var("NAMINATOR_TEST_BASE_URL");
    }

    #[test]
    fn test_explicit_api_key_wins() {
        let mut config = NaminatorConfig::default();
        config.api.api_key = Some("sk-explicit".to_string());
        config.api.api_key_env = "NAMINATOR_TEST_UNSET_KEY".to_string();

        assert_eq!(config.resolve_api_key().unwrap(), "sk-explicit");
    }

    #[test]
    fn test_missing_api_key() {
        let mut config = NaminatorConfig::default();
        config.api.api_key_env = "NAMINATOR_TEST_DEFINITELY_UNSET".to_string();

        match config.resolve_api_key() {
            Err(NaminatorError::MissingConfigError { field }) => {
                assert_eq!(field, "NAMINATOR_TEST_DEFINITELY_UNSET")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_placeholder_falls_back_to_env() {
        std::env::set_var("NAMINATOR_TEST_FALLBACK_KEY", "sk-from-env");

        let mut config = NaminatorConfig::default();
        config.api.api_key = Some("${NAMINATOR_TEST_NOT_SET}".to_string());
        config.api.api_key_env = "NAMINATOR_TEST_FALLBACK_KEY".to_string();

        assert_eq!(config.resolve_api_key().unwrap(), "sk-from-env");

        std::env::remove_var("NAMINATOR_TEST_FALLBACK_KEY");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = NaminatorConfig::from_toml_str("[api]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(invalid_url.validate().is_err());

        let zero_tokens = NaminatorConfig::from_toml_str("[generation]\nmax_tokens = 0\n").unwrap();
        assert!(zero_tokens.validate().is_err());

        let bad_version =
            NaminatorConfig::from_toml_str("[api]\nanthropic_version = \"latest\"\n").unwrap();
        assert!(bad_version.validate().is_err());

        let spaced_model =
            NaminatorConfig::from_toml_str("[generation]\nmodel = \"claude haiku\"\n").unwrap();
        assert!(spaced_model.validate().is_err());

        let too_many_retries = NaminatorConfig::from_toml_str("[retry]\nmax_retries = 50\n").unwrap();
        assert!(too_many_retries.validate().is_err());

        let bad_template =
            NaminatorConfig::from_toml_str("[generation]\nprompt_template = \"only {{first}}\"\n")
                .unwrap();
        assert!(bad_template.validate().is_err());
    }

    #[test]
    fn test_retry_backoff() {
        let retry = RetryConfig {
            max_retries: 3,
            initial_delay_ms: 100,
        };

        assert_eq!(retry.delay_for(0), Duration::from_millis(100));
        assert_eq!(retry.delay_for(1), Duration::from_millis(200));
        assert_eq!(retry.delay_for(3), Duration::from_millis(800));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[generation]
max_tokens = 512

[retry]
max_retries = 2
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = NaminatorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.generation.max_tokens, 512);
        assert_eq!(config.retry.max_retries, 2);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            NaminatorConfig::from_toml_str("[generation\nmodel = 1"),
            Err(NaminatorError::ConfigError { .. })
        ));
    }
}
