use crate::domain::model::NameCombinationRequest;
use crate::utils::error::{NaminatorError, Result};

pub const FIRST_PLACEHOLDER: &str = "{{first}}";
pub const SECOND_PLACEHOLDER: &str = "{{second}}";

pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"You are "The Naminator" - a creative name combination generator.

Given two names, generate 6-8 creative combined names using techniques like:
- Concatenation (e.g., "John" + "Bob" = "JohnBob")
- Interleaving letters (e.g., "JBoohbn")
- Partial overlaps (e.g., "Johob" where shared letters merge)
- Portmanteau / blending (e.g., "Jocob")
- Reversed combination (e.g., "BobJohn")
- Creative mashups that sound like real names

For each generated name, also provide a "goodness" score from 0.0 to 5.0 based on:
- How pronounceable it is
- How natural it sounds as a name
- How creative/fun it is

The two input names are: "{{first}}" and "{{second}}"

Respond ONLY with valid JSON in this exact format (no markdown, no explanation):
[
  { "name": "ExampleName", "goodness": 3.5 },
  { "name": "AnotherName", "goodness": 4.2 }
]"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_TEMPLATE)
    }
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn from_option(template: Option<&str>) -> Self {
        template.map(Self::new).unwrap_or_default()
    }

    /// 模板必須同時包含兩個佔位符
    pub fn validate(&self) -> Result<()> {
        for placeholder in [FIRST_PLACEHOLDER, SECOND_PLACEHOLDER] {
            if !self.template.contains(placeholder) {
                return Err(NaminatorError::InvalidConfigValueError {
                    field: "generation.prompt_template".to_string(),
                    value: self.template.clone(),
                    reason: format!("Template must contain {}", placeholder),
                });
            }
        }
        Ok(())
    }

    /// Names are inserted verbatim. Both placeholders are replaced in one pass so a
    /// name that itself contains `{{second}}` is not expanded again.
    pub fn render(&self, request: &NameCombinationRequest) -> String {
        let mut output = String::with_capacity(
            self.template.len() + request.first.len() + request.second.len(),
        );
        let mut rest = self.template.as_str();

        loop {
            let first = rest.find(FIRST_PLACEHOLDER);
            let second = rest.find(SECOND_PLACEHOLDER);

            let (index, placeholder, value) = match (first, second) {
                (Some(a), Some(b)) if b < a => (b, SECOND_PLACEHOLDER, &request.second),
                (Some(a), _) => (a, FIRST_PLACEHOLDER, &request.first),
                (None, Some(b)) => (b, SECOND_PLACEHOLDER, &request.second),
                (None, None) => break,
            };

            output.push_str(&rest[..index]);
            output.push_str(value);
            rest = &rest[index + placeholder.len()..];
        }

        output.push_str(rest);
        output
    }
}
