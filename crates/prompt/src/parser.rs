//! Answer extraction from raw model output.

use askdocs_core::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn answer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)<answer>(.*)</answer>").expect("answer pattern is valid")
    })
}

/// Extract the text between the `<answer></answer>` delimiters.
///
/// The inner text is returned as-is; trimming happens at response assembly.
/// Output without the delimiter pair is an internal fault, not retried.
pub fn extract_answer(raw: &str) -> AppResult<String> {
    let captures = answer_pattern().captures(raw).ok_or_else(|| {
        AppError::Parse("Model output did not contain <answer></answer> tags".to_string())
    })?;

    Ok(captures[1].to_string())
}
