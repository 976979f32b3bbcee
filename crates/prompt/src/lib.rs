//! Prompt rendering and answer extraction for the askdocs service.
//!
//! The pipeline uses a single fixed instruction template: it pins the
//! assistant's persona, delimits the retrieved context and the user question
//! with tags, and requires the answer wrapped in `<answer></answer>` tags so
//! it can be extracted from the raw model output.

pub mod builder;
pub mod parser;
pub mod template;

pub use builder::render_prompt;
pub use parser::extract_answer;
pub use template::QA_TEMPLATE;
