use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::report::DiagnosticReport;

/// Upper bound on status checks returned by a single listing.
pub const STATUS_CHECK_LIST_LIMIT: usize = 1000;

/// Persisted copy of a produced report together with the raw answers.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticDocument {
    #[serde(flatten)]
    pub report: DiagnosticReport,
    pub answers: BTreeMap<String, u8>,
    pub timestamp: DateTime<Utc>,
}

impl DiagnosticDocument {
    pub fn new(report: DiagnosticReport, answers: BTreeMap<String, u8>) -> Self {
        Self {
            report,
            answers,
            timestamp: Utc::now(),
        }
    }
}

/// Liveness probe record kept alongside diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Storage abstraction so the service can run against memory, SQLite, or a failing stub.
pub trait DocumentStore: Send + Sync {
    fn insert_diagnostic(&self, document: DiagnosticDocument) -> Result<(), StoreError>;
    fn insert_status_check(&self, check: StatusCheck) -> Result<StatusCheck, StoreError>;
    /// Oldest first, at most `limit` entries.
    fn status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store record could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),
}
