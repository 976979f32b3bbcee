//! Content-safety guardrail integration for the askdocs service.
//!
//! The pipeline screens exactly two texts per successful request through the
//! guardrail: the incoming question and the extracted answer. This crate
//! provides the `SafetyFilter` abstraction and the client speaking the
//! managed guardrail's REST contract.

pub mod client;
pub mod providers;

pub use client::{FilterVerdict, SafetyFilter, PASS_ACTION};
pub use providers::BedrockGuardrail;
