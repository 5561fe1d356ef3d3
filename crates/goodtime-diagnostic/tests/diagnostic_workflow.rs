use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use goodtime_diagnostic::diagnostic::{
    questionnaire, scoring, Area, DiagnosticDocument, DiagnosticRequest, DiagnosticService,
    DocumentStore, NarrativeEngine, ScoreBundle, Segment, StatusCheck, StoreError, UserInfo,
};

#[derive(Default)]
struct RecordingStore {
    documents: Mutex<Vec<DiagnosticDocument>>,
}

impl DocumentStore for RecordingStore {
    fn insert_diagnostic(&self, document: DiagnosticDocument) -> Result<(), StoreError> {
        self.documents
            .lock()
            .expect("store mutex poisoned")
            .push(document);
        Ok(())
    }

    fn insert_status_check(&self, check: StatusCheck) -> Result<StatusCheck, StoreError> {
        Ok(check)
    }

    fn status_checks(&self, _limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        Ok(Vec::new())
    }
}

fn submission(answers: BTreeMap<String, u8>) -> DiagnosticRequest {
    DiagnosticRequest {
        user_info: UserInfo {
            first_name: "Jean".to_string(),
            last_name: "Martin".to_string(),
            email: "jean@conciergerie.fr".to_string(),
            phone: "0698765432".to_string(),
            city: "Lyon".to_string(),
            units: "30".to_string(),
        },
        scores: ScoreBundle::from_answers(&answers),
        answers,
    }
}

#[test]
fn questionnaire_maxima_match_area_weights() {
    for area in Area::ALL {
        let max: i32 = questionnaire::questions_for(area)
            .map(|_| i32::from(questionnaire::MAX_ANSWER_VALUE))
            .sum();
        assert_eq!(max, area.max_score(), "{area:?}");
    }
    assert_eq!(questionnaire::QUESTIONS.len(), 22);
}

#[test]
fn classification_covers_every_total() {
    for total in 0..=44 {
        let expected = match total {
            t if t <= 18 => Segment::Artisanal,
            t if t <= 32 => Segment::Transition,
            _ => Segment::Machine,
        };
        assert_eq!(scoring::classify(total), expected, "total {total}");
    }
}

#[tokio::test]
async fn full_questionnaire_produces_machine_report_and_document() {
    let answers: BTreeMap<String, u8> = questionnaire::QUESTIONS
        .iter()
        .map(|question| (question.id.to_string(), 2))
        .collect();
    let store = Arc::new(RecordingStore::default());
    let service = DiagnosticService::new(store.clone(), NarrativeEngine::Deterministic);

    let report = service
        .analyze(submission(answers))
        .await
        .expect("report builds");

    assert_eq!(report.segment, Segment::Machine);
    assert_eq!(report.score, 44);
    let extended = report.extended.as_ref().expect("extended sections");
    assert_eq!(extended.roadmap.phases.len(), 4);

    let documents = store.documents.lock().expect("store mutex poisoned");
    assert_eq!(documents.len(), 1);
    let stored = serde_json::to_value(&documents[0]).expect("document serializes");
    assert_eq!(stored["segment"], "machine");
    assert_eq!(stored["answers"]["22"], 2);
    assert!(stored["timestamp"].is_string());
    assert!(stored.get("roadmap").is_some());
}

#[tokio::test]
async fn empty_questionnaire_is_artisanal() {
    let answers: BTreeMap<String, u8> = questionnaire::QUESTIONS
        .iter()
        .map(|question| (question.id.to_string(), 0))
        .collect();
    let service = DiagnosticService::new(
        Arc::new(RecordingStore::default()),
        NarrativeEngine::Deterministic,
    );

    let report = service
        .analyze(submission(answers))
        .await
        .expect("report builds");

    assert_eq!(report.segment, Segment::Artisanal);
    assert_eq!(report.segment.display_name(), "Conciergerie artisanale fragile");
    assert!(report.narrative.diag_summary.starts_with("Jean"));
}
