mod client;
mod types;

pub use client::{LlmClient, OpenAiVisionClient};
pub use types::*;
