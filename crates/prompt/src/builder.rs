//! Prompt builder for rendering the instruction template.

use crate::template::QA_TEMPLATE;
use askdocs_core::{AppError, AppResult};
use handlebars::Handlebars;
use serde_json::json;

/// Render the question-answering prompt.
///
/// Substitutes the question and the concatenated retrieval context into the
/// fixed instruction template.
pub fn render_prompt(question: &str, context: &str) -> AppResult<String> {
    tracing::debug!("Rendering question-answering prompt");
    render_template(QA_TEMPLATE, question, context)
}

/// Render a Handlebars template with question and context variables.
fn render_template(template: &str, question: &str, context: &str) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("qa", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("qa", &json!({ "question": question, "context": context }))
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
