pub mod generator;
pub mod normalize;
pub mod prompt;

pub use crate::domain::model::{GeneratedNameResult, NameCombinationRequest};
pub use crate::domain::ports::MessagesApi;
pub use crate::utils::error::Result;
