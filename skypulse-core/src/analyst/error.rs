use thiserror::Error;

/// Everything that can go wrong in one call to the remote model.
///
/// The dashboard never retries. Callers map any variant onto their recovery
/// policy: keep the previous report, or append the chat fallback.
#[derive(Error, Debug)]
pub enum AnalystError {
    /// No API key was found in the environment or config.
    #[error("no Gemini API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingApiKey,

    /// Connection, TLS, or timeout failure.
    #[error("request to model failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx reply; `message` is the API error text when one was returned.
    #[error("model API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The reply carried no candidate text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The reply text was not the expected JSON shape.
    #[error("could not parse model response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON parsed but violates a report invariant.
    #[error("invalid report: {0}")]
    InvalidReport(String),
}
