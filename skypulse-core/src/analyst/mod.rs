//! The seam between the dashboard and the remote language model.
//!
//! All analytical work happens behind [`Analyst`]. The TUI holds an
//! `Arc<dyn Analyst>` and spawns one task per call; tests substitute a
//! scripted implementation.

mod error;
pub mod gemini;

use async_trait::async_trait;

pub use error::AnalystError;
pub use gemini::{GeminiAnalyst, GeminiConfig};

use crate::chat::ChatRequest;
use crate::report::DashboardReport;

/// Result alias for analyst calls.
pub type AnalystResult<T> = Result<T, AnalystError>;

/// A remote model that can score review batches and hold a conversation.
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Scores a newline-joined `[SOURCE] text` batch into a full report.
    ///
    /// `focus` scopes the analysis to one category name.
    async fn analyze(&self, batch: &str, focus: Option<&str>) -> AnalystResult<DashboardReport>;

    /// Produces the model's reply to `request.prompt` given the prior turns.
    async fn chat(&self, request: &ChatRequest) -> AnalystResult<String>;
}
