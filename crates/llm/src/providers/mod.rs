//! Model provider implementations.

mod bedrock;

pub use bedrock::BedrockModel;
