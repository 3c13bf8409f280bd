//! Lexis Core — analysis data model, service configuration, shared errors.

pub mod config;
pub mod error;
pub mod model;

pub use config::{DataPaths, LexisConfig};
pub use error::{Error, Result};
pub use model::{AnalysisResult, Metadata, Sentiment};
