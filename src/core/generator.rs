use crate::adapters::AnthropicClient;
use crate::config::NaminatorConfig;
use crate::core::normalize::parse_name_combinations;
use crate::core::prompt::PromptTemplate;
use crate::domain::messages::{Message, MessageRequest};
use crate::domain::model::{GeneratedNameResult, NameCombinationRequest};
use crate::domain::ports::MessagesApi;
use crate::utils::error::{NaminatorError, Result};
use crate::utils::validation::Validate;

pub struct NameCombinationGenerator<A: MessagesApi> {
    api: A,
    model: String,
    max_tokens: u32,
    prompt: PromptTemplate,
}

impl NameCombinationGenerator<AnthropicClient> {
    /// 依設定建立 Anthropic 客戶端，設定會先經過驗證
    pub fn from_config(config: &NaminatorConfig) -> Result<Self> {
        config.validate()?;
        let api = AnthropicClient::from_config(config)?;
        Ok(Self::with_api(api, config))
    }
}

impl<A: MessagesApi> NameCombinationGenerator<A> {
    pub fn with_api(api: A, config: &NaminatorConfig) -> Self {
        Self {
            api,
            model: config.generation.model.clone(),
            max_tokens: config.generation.max_tokens,
            prompt: PromptTemplate::from_option(config.generation.prompt_template.as_deref()),
        }
    }

    pub fn build_request(&self, request: &NameCombinationRequest) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message::user(self.prompt.render(request))],
        }
    }

    pub async fn generate(&self, name1: &str, name2: &str) -> Result<Vec<GeneratedNameResult>> {
        self.generate_request(&NameCombinationRequest::new(name1, name2))
            .await
    }

    pub async fn generate_request(
        &self,
        request: &NameCombinationRequest,
    ) -> Result<Vec<GeneratedNameResult>> {
        tracing::debug!(
            "Generating name combinations for {:?} + {:?} with {}",
            request.first,
            request.second,
            self.model
        );

        let response = self.api.create_message(&self.build_request(request)).await?;

        if let Some(usage) = response.usage {
            tracing::debug!(
                "Token usage - input: {}, output: {}",
                usage.input_tokens,
                usage.output_tokens
            );
        }
        if response.stop_reason.as_deref() == Some("max_tokens") {
            tracing::warn!(
                "⚠️ Response hit the max_tokens limit ({}), output may be truncated",
                self.max_tokens
            );
        }

        let text = response.first_text().ok_or(NaminatorError::NoTextResponse)?;
        let results = parse_name_combinations(text)?;

        tracing::info!("✅ Generated {} name combinations", results.len());
        Ok(results)
    }
}

/// 使用環境變數 (ANTHROPIC_API_KEY) 與預設設定產生名稱組合
pub async fn generate_name_combinations(
    name1: &str,
    name2: &str,
) -> Result<Vec<GeneratedNameResult>> {
    let generator = NameCombinationGenerator::from_config(&NaminatorConfig::default())?;
    generator.generate(name1, name2).await
}
