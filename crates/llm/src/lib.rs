//! Hosted model integration for the askdocs service.
//!
//! Provides the `ModelClient` abstraction over the managed model-invocation
//! service, plus the request/response types carrying the fixed decoding
//! parameters and token-usage counters.
//!
//! # Example
//! ```no_run
//! use askdocs_llm::{ModelClient, ModelRequest, providers::BedrockModel};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BedrockModel::new(reqwest::Client::new(), "https://model.example.com");
//! let request = ModelRequest::new("Hello, world!", "example.model-v1");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod providers;

// Re-export main types
pub use client::{ModelClient, ModelRequest, ModelResponse, TokenUsage};
pub use providers::BedrockModel;
