use metrics_exporter_prometheus::PrometheusHandle;
use mock_placement::error::AppError;
use mock_placement::placement::PlacementEngine;
use mock_placement::roster::{StoreError, StudentRecord, StudentStore};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<PlacementEngine>,
}

/// Process-local student store. Records keep their insertion order so
/// analytics tie-breaks are stable across requests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentStore {
    records: Arc<Mutex<Vec<StudentRecord>>>,
}

impl InMemoryStudentStore {
    pub(crate) fn seeded(records: Vec<StudentRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<StudentRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("student store mutex poisoned".to_string()))
    }
}

impl StudentStore for InMemoryStudentStore {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn upsert(&self, record: StudentRecord) -> Result<StudentRecord, StoreError> {
        let mut guard = self.lock()?;
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => guard.push(record.clone()),
        }
        Ok(record)
    }
}

/// Read a JSON array of student records.
pub(crate) fn load_roster(path: &Path) -> Result<Vec<StudentRecord>, AppError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
