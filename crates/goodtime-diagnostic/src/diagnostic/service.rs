use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{DiagnosticRequest, ScoreBundle, ValidationError};
use super::llm::{CompletionError, LanguageModelAnalyst};
use super::narrative;
use super::report::DiagnosticReport;
use super::scoring::ScoreProfile;
use super::store::{
    DiagnosticDocument, DocumentStore, StatusCheck, StoreError, STATUS_CHECK_LIST_LIMIT,
};

/// Strategy used to write the narrative blocks. One per process.
#[derive(Clone)]
pub enum NarrativeEngine {
    /// Template copy plus per-area analyses, valuation and roadmap.
    Deterministic,
    /// Model-written blocks only.
    LanguageModel(LanguageModelAnalyst),
}

impl NarrativeEngine {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::LanguageModel(_) => "llm",
        }
    }
}

/// Service composing validation, scoring, narrative generation and persistence.
pub struct DiagnosticService<S> {
    store: Arc<S>,
    engine: NarrativeEngine,
}

impl<S> DiagnosticService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>, engine: NarrativeEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &NarrativeEngine {
        &self.engine
    }

    /// Produce a report and record it. Storage failures never fail the analysis.
    pub async fn analyze(
        &self,
        request: DiagnosticRequest,
    ) -> Result<DiagnosticReport, DiagnosticServiceError> {
        request.validate()?;

        if !request.answers.is_empty() {
            let derived = ScoreBundle::from_answers(&request.answers);
            if derived != request.scores {
                warn!(
                    supplied_total = request.scores.total,
                    derived_total = derived.total,
                    "supplied scores disagree with answers, keeping supplied scores"
                );
            }
        }

        let profile = ScoreProfile::from_scores(request.scores);
        let report = match &self.engine {
            NarrativeEngine::Deterministic => narrative::extended_report(&request),
            NarrativeEngine::LanguageModel(analyst) => {
                let narrative = analyst.narrate(&request, &profile).await?;
                DiagnosticReport::assemble(&request.user_info, &profile, narrative, None)
            }
        };

        let document = DiagnosticDocument::new(report.clone(), request.answers);
        let persisted = self
            .with_store(move |store| store.insert_diagnostic(document))
            .await;
        if let Err(err) = persisted {
            warn!(error = %err, "failed to persist diagnostic");
        }

        info!(
            engine = self.engine.name(),
            segment = profile.segment.as_str(),
            score = profile.scores.total,
            weakest = profile.weakest.label(),
            "diagnostic analyzed"
        );

        Ok(report)
    }

    pub async fn record_status_check(
        &self,
        client_name: String,
    ) -> Result<StatusCheck, DiagnosticServiceError> {
        let check = StatusCheck::new(client_name);
        let stored = self
            .with_store(move |store| store.insert_status_check(check))
            .await?;
        Ok(stored)
    }

    pub async fn status_checks(&self) -> Result<Vec<StatusCheck>, DiagnosticServiceError> {
        let checks = self
            .with_store(|store| store.status_checks(STATUS_CHECK_LIST_LIMIT))
            .await?;
        Ok(checks)
    }

    /// Store calls may block on disk, so they run on the blocking pool.
    async fn with_store<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: FnOnce(&S) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || call(&store))
            .await
            .map_err(|err| StoreError::Unavailable(format!("store task failed: {err}")))?
    }
}

/// Error raised by the diagnostic service.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
