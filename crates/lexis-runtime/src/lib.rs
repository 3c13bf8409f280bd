//! Runtime orchestrator — runs one text analysis end to end.
//!
//! Summary and metadata requests run concurrently against a `TextAnalyzer`,
//! local keywords are merged into the metadata, and the whole call is
//! bounded by an optional timeout.

pub mod orchestrator;
pub mod types;

pub use orchestrator::AnalysisOrchestrator;
pub use types::OrchestratorSettings;
