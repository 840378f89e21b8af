pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::AnthropicClient;
pub use config::NaminatorConfig;
pub use core::generator::{generate_name_combinations, NameCombinationGenerator};
pub use domain::model::{GeneratedNameResult, NameCombinationRequest};
pub use utils::error::{ErrorCategory, NaminatorError, Result};
