use super::domain::StudentRecord;

/// Storage abstraction so the roster service can be exercised in isolation.
///
/// `upsert` is keyed by `StudentRecord::id`: it creates the record when the
/// id is new and replaces the whole record otherwise. `list` returns records
/// in a stable collection order, which analytics uses to break ranking ties.
pub trait StudentStore: Send + Sync {
    fn list(&self) -> Result<Vec<StudentRecord>, StoreError>;
    fn upsert(&self, record: StudentRecord) -> Result<StudentRecord, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("record rejected: {0}")]
    Rejected(String),
}
