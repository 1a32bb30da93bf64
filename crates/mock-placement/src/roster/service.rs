use std::collections::HashSet;
use std::io::Read;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::domain::{MockTestResult, MockTestSubmission, StudentRecord};
use super::filter::RosterFilter;
use super::report::views::{DashboardView, ReportView};
use super::report::{RosterAnalytics, DEFAULT_TOP_PERFORMERS};
use super::repository::{StoreError, StudentStore};
use crate::placement::PlacementEngine;
use crate::spreadsheet::{
    parse_rows, ImportRowError, ImportSummary, MockTestRow, SpreadsheetRow, StudentProfileRow,
};

/// Service composing the student store with the placement engine and analytics.
pub struct RosterService<S> {
    store: Arc<S>,
    engine: Arc<PlacementEngine>,
    top_performers: usize,
}

static TEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_test_id() -> String {
    let seq = TEST_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("MT{}_{seq}", Utc::now().timestamp_millis())
}

impl<S> RosterService<S>
where
    S: StudentStore + 'static,
{
    pub fn new(store: Arc<S>, engine: Arc<PlacementEngine>) -> Self {
        Self {
            store,
            engine,
            top_performers: DEFAULT_TOP_PERFORMERS,
        }
    }

    /// Default size of the dashboard's top performer list.
    pub fn with_top_performers(mut self, count: usize) -> Self {
        self.top_performers = count;
        self
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn students(
        &self,
        filter: &RosterFilter,
    ) -> Result<Vec<StudentRecord>, RosterServiceError> {
        let students = self.store.list()?;
        Ok(filter.apply(students))
    }

    pub fn student(&self, student_id: &str) -> Result<Option<StudentRecord>, RosterServiceError> {
        let students = self.store.list()?;
        Ok(students.into_iter().find(|student| student.id == student_id))
    }

    /// Create or fully replace a student record keyed by its id.
    pub fn upsert_student(
        &self,
        record: StudentRecord,
    ) -> Result<StudentRecord, RosterServiceError> {
        if record.id.trim().is_empty() {
            return Err(RosterServiceError::MissingStudentId);
        }
        let stored = self.store.upsert(record)?;
        debug!(student_id = %stored.id, "student upserted");
        Ok(stored)
    }

    /// Score a new mock test and append it to the student's history.
    ///
    /// Returns `Ok(None)` when no student has the given id.
    pub fn record_mock_test(
        &self,
        student_id: &str,
        submission: MockTestSubmission,
    ) -> Result<Option<StudentRecord>, RosterServiceError> {
        let Some(mut student) = self.student(student_id)? else {
            return Ok(None);
        };

        let outcome = self.engine.assess(&submission.scores);
        let date = submission
            .date
            .unwrap_or_else(|| Local::now().date_naive());
        info!(
            student_id = %student.id,
            aggregate = outcome.aggregate,
            category = outcome.category.label(),
            "mock test recorded"
        );

        student.mock_tests.push(MockTestResult::from_outcome(
            next_test_id(),
            submission.test_name,
            date,
            submission.scores,
            outcome,
        ));
        let stored = self.store.upsert(student)?;
        Ok(Some(stored))
    }

    pub fn analytics(&self, top: Option<usize>) -> Result<RosterAnalytics, RosterServiceError> {
        let students = self.store.list()?;
        Ok(RosterAnalytics::compute(
            &students,
            top.unwrap_or(self.top_performers),
        ))
    }

    pub fn dashboard(&self, top: Option<usize>) -> Result<DashboardView, RosterServiceError> {
        Ok(self.analytics(top)?.dashboard())
    }

    pub fn report(&self) -> Result<ReportView, RosterServiceError> {
        Ok(self.analytics(None)?.report())
    }

    /// Import student profiles. Rows matching an existing index number replace
    /// that student's profile but keep its id and mock tests. Rows without an
    /// index number always create a new student with a generated, unused one.
    pub fn import_students<R: Read>(&self, reader: R) -> Result<ImportSummary, RosterServiceError> {
        let rows = parse_rows(reader)?;
        let mut known = self.store.list()?;
        let mut taken_ids: HashSet<String> =
            known.iter().map(|student| student.id.clone()).collect();
        let mut taken_indexes: HashSet<String> = known
            .iter()
            .map(|student| student.index_number.clone())
            .collect();
        let roster_size = known.len();
        let mut summary = ImportSummary::default();

        for (position, row) in rows.into_iter().enumerate() {
            let row_number = position + 1;
            let sequence = roster_size + row_number;
            let result = row.map_err(ImportRowError::from).and_then(|row| {
                let profile = StudentProfileRow::from_row(&row, sequence);
                let existing = profile.index_number.as_deref().and_then(|index_number| {
                    known
                        .iter()
                        .position(|student| student.index_number == index_number)
                });
                let record = match existing {
                    Some(slot) => {
                        let current = &known[slot];
                        let index_number = current.index_number.clone();
                        profile.into_record(
                            current.id.clone(),
                            index_number,
                            current.mock_tests.clone(),
                        )
                    }
                    None => {
                        let id = free_student_id(&taken_ids, sequence);
                        let index_number = match profile.index_number.clone() {
                            Some(index_number) => index_number,
                            None => free_index_number(&taken_indexes, sequence),
                        };
                        profile.into_record(id, index_number, Vec::new())
                    }
                };
                let stored = self.store.upsert(record)?;
                Ok((existing, stored))
            });

            match result {
                Ok((existing, stored)) => {
                    taken_ids.insert(stored.id.clone());
                    taken_indexes.insert(stored.index_number.clone());
                    match existing {
                        Some(slot) => known[slot] = stored,
                        None => known.push(stored),
                    }
                    summary.record_success();
                }
                Err(error) => {
                    warn!(row = row_number, %error, "skipping student row");
                    summary.record_failure(row_number, &error);
                }
            }
        }

        info!(
            imported = summary.imported,
            failed = summary.failed,
            "student import finished"
        );
        Ok(summary)
    }

    /// Import mock test results, dating undated rows today.
    pub fn import_mock_tests<R: Read>(
        &self,
        reader: R,
    ) -> Result<ImportSummary, RosterServiceError> {
        self.import_mock_tests_on(reader, Local::now().date_naive())
    }

    /// Import mock test results; rows without a date use `today`.
    ///
    /// Rows for the same student accumulate: each row sees the tests appended
    /// by earlier rows in the batch.
    pub fn import_mock_tests_on<R: Read>(
        &self,
        reader: R,
        today: NaiveDate,
    ) -> Result<ImportSummary, RosterServiceError> {
        let rows = parse_rows(reader)?;
        let mut students = self.store.list()?;
        let mut summary = ImportSummary::default();

        for (position, row) in rows.into_iter().enumerate() {
            let row_number = position + 1;
            let result = row
                .map_err(ImportRowError::from)
                .and_then(|row| self.import_test_row(&row, &mut students, today));
            match result {
                Ok(()) => summary.record_success(),
                Err(error) => {
                    warn!(row = row_number, %error, "skipping mock test row");
                    summary.record_failure(row_number, &error);
                }
            }
        }

        info!(
            imported = summary.imported,
            failed = summary.failed,
            "mock test import finished"
        );
        Ok(summary)
    }

    fn import_test_row(
        &self,
        row: &SpreadsheetRow,
        students: &mut [StudentRecord],
        today: NaiveDate,
    ) -> Result<(), ImportRowError> {
        let parsed = MockTestRow::from_row(row, today)?;
        let student = students
            .iter_mut()
            .find(|student| student.index_number == parsed.index_number)
            .ok_or_else(|| ImportRowError::UnknownStudent {
                index_number: parsed.index_number.clone(),
            })?;

        let outcome = self.engine.assess(&parsed.scores);
        let mut updated = student.clone();
        updated.mock_tests.push(MockTestResult::from_outcome(
            next_test_id(),
            parsed.test_name,
            parsed.date,
            parsed.scores,
            outcome,
        ));

        *student = self.store.upsert(updated)?;
        Ok(())
    }
}

/// `STD{n:03}`, skipping ids already present in the roster.
fn free_student_id(taken: &HashSet<String>, start: usize) -> String {
    first_free(taken, start, |sequence| format!("STD{sequence:03}"))
}

/// `2024{n:03}`, skipping index numbers already present in the roster.
fn free_index_number(taken: &HashSet<String>, start: usize) -> String {
    first_free(taken, start, |sequence| format!("2024{sequence:03}"))
}

fn first_free(taken: &HashSet<String>, start: usize, render: impl Fn(usize) -> String) -> String {
    let mut sequence = start;
    loop {
        let candidate = render(sequence);
        if !taken.contains(&candidate) {
            return candidate;
        }
        sequence += 1;
    }
}

/// Error raised by the roster service.
#[derive(Debug, thiserror::Error)]
pub enum RosterServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unreadable spreadsheet: {0}")]
    Spreadsheet(#[from] csv::Error),
    #[error("student record is missing an id")]
    MissingStudentId,
}

impl RosterServiceError {
    /// True when the caller sent something unusable rather than the store failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Spreadsheet(_) | Self::MissingStudentId)
    }
}
