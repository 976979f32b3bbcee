//! Safety filter abstraction and verdict types.

use askdocs_core::AppResult;

/// Action code returned by the guardrail when it takes no action.
/// Any other value means the content was blocked.
pub const PASS_ACTION: &str = "NONE";

/// Outcome of a single guardrail check.
#[derive(Debug, Clone)]
pub struct FilterVerdict {
    /// Action code from the service (`NONE` passes)
    pub action: String,

    /// Service-assigned request id, used for audit logging only
    pub request_id: String,
}

impl FilterVerdict {
    /// Whether the guardrail let the content through.
    pub fn passed(&self) -> bool {
        self.action == PASS_ACTION
    }
}

/// Trait for content-safety filter services.
#[async_trait::async_trait]
pub trait SafetyFilter: Send + Sync {
    /// Identifier of the guardrail policy, for audit logging.
    fn guardrail_id(&self) -> &str;

    /// Screen a text and return the service's verdict.
    ///
    /// A returned verdict never aborts by itself; interpreting a non-pass
    /// action is the pipeline's responsibility. Transport failures surface
    /// as `AppError::Guardrail`.
    async fn check(&self, text: &str) -> AppResult<FilterVerdict>;
}
