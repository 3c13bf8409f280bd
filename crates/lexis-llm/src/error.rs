use thiserror::Error;

/// Failures of a language-model request.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Empty response from language model")]
    EmptyPayload,

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request failed after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: Box<LlmError> },

    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,
}
