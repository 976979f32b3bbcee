//! Document-id to documentation-URL derivation.
//!
//! Retrieved document identifiers are object-storage paths into the indexed
//! corpus. A small rule table maps corpus prefixes to their public
//! documentation sites; identifiers outside the corpus yield no link.

use regex::Regex;
use std::sync::OnceLock;

struct LinkRule {
    pattern: Regex,
    prefix: &'static str,
    suffix: &'static str,
}

/// Rules evaluated in order, first match wins.
fn rules() -> &'static [LinkRule] {
    static RULES: OnceLock<Vec<LinkRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (
                r"s3://.*?/rag/lambda-developer-guide-231030/(.*)\.md$",
                "https://docs.aws.amazon.com/lambda/latest/dg/",
                ".html",
            ),
            (
                r"s3://.*?/rag/sagemaker-developer-guide/(.*)\.md$",
                "https://docs.aws.amazon.com/sagemaker/latest/dg/",
                ".html",
            ),
            (
                r"s3://.*?/rag/blogs/(.*)\.md$",
                "https://aws.amazon.com/blogs/compute/",
                "/",
            ),
        ]
        .into_iter()
        .map(|(pattern, prefix, suffix)| LinkRule {
            pattern: Regex::new(pattern).expect("link rule pattern is valid"),
            prefix,
            suffix,
        })
        .collect()
    })
}

/// Derive the public documentation URL for a document identifier.
///
/// Pure function of its input; identifiers matching no rule return `None`.
pub fn link_for_document(document_id: &str) -> Option<String> {
    for rule in rules() {
        if let Some(captures) = rule.pattern.captures(document_id) {
            return Some(format!("{}{}{}", rule.prefix, &captures[1], rule.suffix));
        }
    }
    None
}
