use crate::domain::messages::{MessageRequest, MessageResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can answer a single Messages API request.
#[async_trait]
pub trait MessagesApi: Send + Sync {
    async fn create_message(&self, request: &MessageRequest) -> Result<MessageResponse>;
}
