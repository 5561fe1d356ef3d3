//! Business-maturity diagnostic for short-term rental concierge operators.
//!
//! A submission carries 22 answers and client-computed area scores. The service
//! classifies the total into a segment, finds the weakest area, writes the
//! narrative (templates or a language model) and records the result.

pub mod domain;
pub mod llm;
pub mod narrative;
pub mod questionnaire;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{Area, DiagnosticRequest, ScoreBundle, Segment, UserInfo, ValidationError};
pub use llm::{
    CompletionClient, CompletionError, CompletionPrompt, LanguageModelAnalyst,
    OpenAiCompletionClient,
};
pub use report::{DiagnosticReport, ExtendedAnalysis, Narrative};
pub use router::diagnostic_router;
pub use scoring::{AreaStatus, ScoreProfile};
pub use service::{DiagnosticService, DiagnosticServiceError, NarrativeEngine};
pub use store::{
    DiagnosticDocument, DocumentStore, StatusCheck, StoreError, STATUS_CHECK_LIST_LIMIT,
};
