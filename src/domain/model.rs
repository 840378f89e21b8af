use serde::{Deserialize, Serialize};

/// 兩個輸入名稱，原樣嵌入提示詞，不做任何驗證
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCombinationRequest {
    pub first: String,
    pub second: String,
}

impl NameCombinationRequest {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

/// A generated name and its score, always within [0.0, 5.0] at one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNameResult {
    pub name: String,
    pub goodness: f64,
}
