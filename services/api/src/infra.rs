use goodtime_diagnostic::diagnostic::{DiagnosticDocument, DocumentStore, StatusCheck, StoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryDocumentStore {
    diagnostics: Arc<Mutex<Vec<DiagnosticDocument>>>,
    checks: Arc<Mutex<Vec<StatusCheck>>>,
}

impl InMemoryDocumentStore {
    #[cfg(test)]
    pub(crate) fn diagnostics(&self) -> Vec<DiagnosticDocument> {
        self.diagnostics
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert_diagnostic(&self, document: DiagnosticDocument) -> Result<(), StoreError> {
        lock(&self.diagnostics)?.push(document);
        Ok(())
    }

    fn insert_status_check(&self, check: StatusCheck) -> Result<StatusCheck, StoreError> {
        lock(&self.checks)?.push(check.clone());
        Ok(check)
    }

    fn status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        let guard = lock(&self.checks)?;
        Ok(guard.iter().take(limit).cloned().collect())
    }
}

const DATABASE_FILE: &str = "goodtime.db";

fn sqlite_err(err: rusqlite::Error) -> StoreError {
    StoreError::Unavailable(format!("sqlite: {err}"))
}

/// SQLite database under a single directory. Row ids keep insertion order.
pub(crate) struct SqliteDocumentStore {
    conn: Mutex<Connection>,
}

impl SqliteDocumentStore {
    pub(crate) fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join(DATABASE_FILE)).map_err(sqlite_err)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;
             CREATE TABLE IF NOT EXISTS diagnostics (
                 seq INTEGER PRIMARY KEY AUTOINCREMENT,
                 segment TEXT NOT NULL,
                 document TEXT NOT NULL,
                 created_at TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS status_checks (
                 seq INTEGER PRIMARY KEY AUTOINCREMENT,
                 id TEXT NOT NULL UNIQUE,
                 client_name TEXT NOT NULL,
                 timestamp TEXT NOT NULL
             );",
        )
        .map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn insert_diagnostic(&self, document: DiagnosticDocument) -> Result<(), StoreError> {
        let body = serde_json::to_string(&document)?;
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO diagnostics (segment, document, created_at) VALUES (?1, ?2, ?3)",
            params![document.report.segment.as_str(), body, document.timestamp],
        )
        .map_err(sqlite_err)?;
        Ok(())
    }

    fn insert_status_check(&self, check: StatusCheck) -> Result<StatusCheck, StoreError> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO status_checks (id, client_name, timestamp) VALUES (?1, ?2, ?3)",
            params![check.id, check.client_name, check.timestamp],
        )
        .map_err(sqlite_err)?;
        Ok(check)
    }

    fn status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = lock(&self.conn)?;
        let mut stmt = conn
            .prepare("SELECT id, client_name, timestamp FROM status_checks ORDER BY seq LIMIT ?1")
            .map_err(sqlite_err)?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(StatusCheck {
                    id: row.get(0)?,
                    client_name: row.get(1)?,
                    timestamp: row.get(2)?,
                })
            })
            .map_err(sqlite_err)?;

        let mut checks = Vec::new();
        for row in rows {
            checks.push(row.map_err(sqlite_err)?);
        }
        Ok(checks)
    }
}

/// Store selected at startup from `DIAGNOSTIC_STORE_DIR`.
pub(crate) enum ConfiguredStore {
    Memory(InMemoryDocumentStore),
    Sqlite(SqliteDocumentStore),
}

impl ConfiguredStore {
    pub(crate) fn from_dir(dir: Option<&Path>) -> Result<Self, StoreError> {
        match dir {
            Some(dir) => Ok(Self::Sqlite(SqliteDocumentStore::open(dir)?)),
            None => Ok(Self::Memory(InMemoryDocumentStore::default())),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Sqlite(_) => "sqlite",
        }
    }
}

impl DocumentStore for ConfiguredStore {
    fn insert_diagnostic(&self, document: DiagnosticDocument) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.insert_diagnostic(document),
            Self::Sqlite(store) => store.insert_diagnostic(document),
        }
    }

    fn insert_status_check(&self, check: StatusCheck) -> Result<StatusCheck, StoreError> {
        match self {
            Self::Memory(store) => store.insert_status_check(check),
            Self::Sqlite(store) => store.insert_status_check(check),
        }
    }

    fn status_checks(&self, limit: usize) -> Result<Vec<StatusCheck>, StoreError> {
        match self {
            Self::Memory(store) => store.status_checks(limit),
            Self::Sqlite(store) => store.status_checks(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goodtime_diagnostic::diagnostic::{narrative, DiagnosticRequest};
    use serde_json::{json, Value};

    fn sample_request() -> DiagnosticRequest {
        serde_json::from_value(json!({
            "userInfo": {
                "firstName": "Marie",
                "lastName": "Dupont",
                "email": "marie@conciergerie-azur.fr",
                "phone": "0612345678",
                "city": "Nice",
                "units": "15"
            },
            "answers": { "1": 2, "20": 1 },
            "scores": { "total": 12, "structure": 6, "acquisition": 4, "value": 2 }
        }))
        .expect("valid request")
    }

    fn stored_documents(dir: &Path) -> Vec<(String, Value)> {
        let conn = Connection::open(dir.join(DATABASE_FILE)).expect("reopen");
        let mut stmt = conn
            .prepare("SELECT segment, document FROM diagnostics ORDER BY seq")
            .expect("prepare");
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .expect("query");
        rows.map(|row| {
            let (segment, body) = row.expect("row");
            (segment, serde_json::from_str(&body).expect("json document"))
        })
        .collect()
    }

    #[test]
    fn sqlite_store_keeps_flat_diagnostic_documents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteDocumentStore::open(dir.path()).expect("store opens");
        let request = sample_request();
        let report = narrative::extended_report(&request);

        store
            .insert_diagnostic(DiagnosticDocument::new(report.clone(), request.answers.clone()))
            .expect("first insert");
        store
            .insert_diagnostic(DiagnosticDocument::new(report, request.answers))
            .expect("second insert");

        let documents = stored_documents(dir.path());
        assert_eq!(documents.len(), 2);
        let (segment, document) = &documents[0];
        assert_eq!(segment, "artisanal");
        assert_eq!(document["segment"], "artisanal");
        assert_eq!(document["firstName"], "Marie");
        assert_eq!(document["answers"]["20"], 1);
        assert!(document["timestamp"].is_string());
    }

    #[test]
    fn sqlite_store_lists_status_checks_in_order_with_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SqliteDocumentStore::open(dir.path()).expect("store opens");
        assert!(store.status_checks(10).expect("empty listing").is_empty());

        let first = store
            .insert_status_check(StatusCheck::new("uptime"))
            .expect("first");
        let second = store
            .insert_status_check(StatusCheck::new("deploy"))
            .expect("second");
        store
            .insert_status_check(StatusCheck::new("manual"))
            .expect("third");

        let listed = store.status_checks(2).expect("listing");
        assert_eq!(listed, vec![first, second]);
    }

    #[test]
    fn sqlite_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let check = {
            let store = SqliteDocumentStore::open(dir.path()).expect("store opens");
            store
                .insert_status_check(StatusCheck::new("uptime"))
                .expect("insert")
        };

        let reopened = SqliteDocumentStore::open(dir.path()).expect("store reopens");
        assert_eq!(reopened.status_checks(10).expect("listing"), vec![check]);
    }

    #[test]
    fn store_selection_follows_configured_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let on_disk = ConfiguredStore::from_dir(Some(dir.path())).expect("sqlite store");
        assert_eq!(on_disk.kind(), "sqlite");
        let in_memory = ConfiguredStore::from_dir(None).expect("memory store");
        assert_eq!(in_memory.kind(), "memory");
    }

    #[test]
    fn in_memory_store_keeps_diagnostics() {
        let store = InMemoryDocumentStore::default();
        let request = sample_request();
        store
            .insert_diagnostic(DiagnosticDocument::new(
                narrative::extended_report(&request),
                request.answers,
            ))
            .expect("insert");
        assert_eq!(store.diagnostics().len(), 1);
    }
}
