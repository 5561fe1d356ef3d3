use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::diagnostic::domain::{Area, DiagnosticRequest, ScoreBundle, UserInfo};
use crate::diagnostic::llm::{
    CompletionClient, CompletionError, CompletionPrompt, LanguageModelAnalyst,
};
use crate::diagnostic::questionnaire;
use crate::diagnostic::service::{DiagnosticService, NarrativeEngine};
use crate::diagnostic::store::{DiagnosticDocument, DocumentStore, StatusCheck, StoreError};

pub(super) fn user_info() -> UserInfo {
    UserInfo {
        first_name: "Marie".to_string(),
        last_name: "Dupont".to_string(),
        email: "marie@conciergerie-azur.fr".to_string(),
        phone: "0612345678".to_string(),
        city: "Nice".to_string(),
        units: "15".to_string(),
    }
}

/// Answers whose per-area sums match the given scores, highest values first.
pub(super) fn answers_for(structure: i32, acquisition: i32, value: i32) -> BTreeMap<String, u8> {
    let mut answers = BTreeMap::new();
    for (area, mut remaining) in [
        (Area::Structure, structure),
        (Area::Acquisition, acquisition),
        (Area::Value, value),
    ] {
        for question in questionnaire::questions_for(area) {
            let answer = remaining.clamp(0, 2);
            remaining -= answer;
            answers.insert(question.id.to_string(), answer as u8);
        }
    }
    answers
}

pub(super) fn request(structure: i32, acquisition: i32, value: i32) -> DiagnosticRequest {
    DiagnosticRequest {
        user_info: user_info(),
        answers: answers_for(structure, acquisition, value),
        scores: ScoreBundle {
            total: structure + acquisition + value,
            structure,
            acquisition,
            value,
        },
    }
}

pub(super) fn artisanal_request() -> DiagnosticRequest {
    request(6, 4, 2)
}

pub(super) fn transition_request() -> DiagnosticRequest {
    request(10, 9, 3)
}

pub(super) fn machine_request() -> DiagnosticRequest {
    request(20, 18, 6)
}

pub(super) fn deterministic_service() -> (DiagnosticService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = DiagnosticService::new(store.clone(), NarrativeEngine::Deterministic);
    (service, store)
}

pub(super) fn model_service<C>(client: C) -> (DiagnosticService<MemoryStore>, Arc<MemoryStore>)
where
    C: CompletionClient + 'static,
{
    let store = Arc::new(MemoryStore::default());
    let analyst = LanguageModelAnalyst::new(Arc::new(client));
    let service = DiagnosticService::new(store.clone(), NarrativeEngine::LanguageModel(analyst));
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    diagnostics: Arc<Mutex<Vec<DiagnosticDocument>>>,
    checks: Arc<Mutex<Vec<StatusCheck>>>,
}

impl MemoryStore {
    pub(super) fn diagnostics(&self) -> Vec<DiagnosticDocument> {
        self.diagnostics.lock().expect("store mutex poisoned").clone()
    }
}

impl DocumentStore for MemoryStore {
    fn insert_diagnostic(&self, document: DiagnosticDocument) -> Result<(), StoreError> {
        self.diagnostics
            .lock()
            .expect("store mutex poisoned")
            .push(document);
        Ok(())
    }

    fn insert_status_check(&self, check: StatusCheck) -> Result<StatusCheck, StoreError> {
        self.checks
            .lock()
            .expect("store mutex poisoned")
            .push(check.clone());
        Ok(check)
    }

    fn status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        let guard = self.checks.lock().expect("store mutex poisoned");
        Ok(guard.iter().take(limit).cloned().collect())
    }
}

/// Store whose every call fails, counting diagnostic insert attempts.
#[derive(Default)]
pub(super) struct UnavailableStore {
    pub(super) attempts: AtomicUsize,
}

impl UnavailableStore {
    pub(super) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl DocumentStore for UnavailableStore {
    fn insert_diagnostic(&self, _document: DiagnosticDocument) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert_status_check(&self, _check: StatusCheck) -> Result<StatusCheck, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn status_checks(&self, _limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// Completion client replying with a fixed body and recording prompts.
pub(super) struct CannedCompletion {
    reply: String,
    prompts: Mutex<Vec<CompletionPrompt>>,
}

impl CannedCompletion {
    pub(super) fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<CompletionPrompt> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl CompletionClient for CannedCompletion {
    async fn complete(&self, prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.clone());
        Ok(self.reply.clone())
    }
}

pub(super) struct FailingCompletion;

#[async_trait]
impl CompletionClient for FailingCompletion {
    async fn complete(&self, _prompt: &CompletionPrompt) -> Result<String, CompletionError> {
        Err(CompletionError::Status {
            status: 503,
            body: "upstream overloaded".to_string(),
        })
    }
}

pub(super) const MODEL_REPLY: &str = "```json\n{\"diagSummary\": \"Marie, ta structure tient.\", \"mainBlocker\": \"Process non écrits\", \"priority\": \"Documenter l'onboarding.\", \"goodtimeRecommendation\": \"Goodtime t'accompagne.\"}\n```";

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("valid json")
}
