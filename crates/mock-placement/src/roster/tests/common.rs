use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::placement::{classify, PlacementEngine, ScoreMap};
use crate::roster::domain::{MockTestResult, StudentRecord};
use crate::roster::repository::{StoreError, StudentStore};
use crate::roster::service::RosterService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn student(id: &str, index_number: &str, name: &str) -> StudentRecord {
    StudentRecord {
        id: id.to_string(),
        name: name.to_string(),
        index_number: index_number.to_string(),
        class_name: "JHS 3 Prudence".to_string(),
        gender: "Female".to_string(),
        date_of_birth: "2009-02-14".to_string(),
        strengths: vec!["Science".to_string()],
        weaknesses: vec!["French".to_string()],
        mock_tests: Vec::new(),
    }
}

pub(super) fn scored_test(test_id: &str, on: NaiveDate, aggregate: u32) -> MockTestResult {
    MockTestResult {
        test_id: test_id.to_string(),
        test_name: format!("Mock {test_id}"),
        date: on,
        scores: ScoreMap::new(),
        aggregate,
        category: classify(aggregate),
        predicted_school: "Wesley Girls' High School".to_string(),
        predicted_program: "Science".to_string(),
    }
}

pub(super) fn strong_scores() -> ScoreMap {
    [("ENG", 92), ("MATH", 95), ("SCI", 88), ("SOC", 90), ("ICT", 71)]
        .into_iter()
        .collect()
}

pub(super) fn build_service(
    seed: Vec<StudentRecord>,
) -> (RosterService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded(seed));
    let service = RosterService::new(store.clone(), Arc::new(PlacementEngine::standard()));
    (service, store)
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<Vec<StudentRecord>>>,
}

impl MemoryStore {
    pub(super) fn seeded(records: Vec<StudentRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(super) fn snapshot(&self) -> Vec<StudentRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

impl StudentStore for MemoryStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(self.snapshot())
    }

    fn upsert(&self, record: StudentRecord) -> Result<StudentRecord, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => guard.push(record.clone()),
        }
        Ok(record)
    }
}

/// Accepts everything except records with the given index number.
pub(super) struct RejectingStore {
    pub(super) inner: MemoryStore,
    pub(super) rejected_index: String,
}

impl StudentStore for RejectingStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        self.inner.list()
    }

    fn upsert(&self, record: StudentRecord) -> Result<StudentRecord, StoreError> {
        if record.index_number == self.rejected_index {
            return Err(StoreError::Rejected("quota exceeded".to_string()));
        }
        self.inner.upsert(record)
    }
}

pub(super) struct UnavailableStore;

impl StudentStore for UnavailableStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _record: StudentRecord) -> Result<StudentRecord, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
