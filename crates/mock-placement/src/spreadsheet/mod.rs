//! Bulk import of students and mock test results from spreadsheet (CSV) exports.
//!
//! This module only turns rows into typed values; the roster service owns the
//! per-row store writes and the success/failure accounting.

pub mod mapping;
mod normalizer;
mod parser;

pub use mapping::FieldAlias;
pub use parser::{parse_rows, RowResult, SpreadsheetRow};

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

use crate::placement::{subjects, ScoreMap};
use crate::roster::domain::{MockTestResult, StudentRecord};
use crate::roster::repository::StoreError;

pub const DEFAULT_CLASS: &str = "JHS 3 Prudence";
pub const DEFAULT_GENDER: &str = crate::roster::report::UNSPECIFIED_GENDER;
pub const DEFAULT_DATE_OF_BIRTH: &str = "2008-01-01";
pub const DEFAULT_STRENGTHS: &[&str] = &["General Arts"];
pub const DEFAULT_WEAKNESSES: &[&str] = &["Mathematics"];
pub const DEFAULT_TEST_NAME: &str = "Imported Test";

/// Why a single row was skipped.
#[derive(Debug, thiserror::Error)]
pub enum ImportRowError {
    #[error("missing required column '{field}'")]
    MissingField { field: &'static str },
    #[error("no student with index number '{index_number}'")]
    UnknownStudent { index_number: String },
    #[error("unreadable row: {0}")]
    Unreadable(#[from] csv::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    pub row: usize,
    pub reason: String,
}

/// Outcome of a batch import. Failed rows are counted, never retried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ImportFailure>,
}

impl ImportSummary {
    pub fn record_success(&mut self) {
        self.imported += 1;
    }

    pub fn record_failure(&mut self, row: usize, error: &ImportRowError) {
        self.failed += 1;
        self.failures.push(ImportFailure {
            row,
            reason: error.to_string(),
        });
    }

    pub fn total(&self) -> usize {
        self.imported + self.failed
    }
}

/// Student profile columns, with defaults filled in for anything left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfileRow {
    pub name: String,
    /// Only set when the sheet supplied one; blank cells never match a student.
    pub index_number: Option<String>,
    pub class_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl StudentProfileRow {
    /// `sequence` is the 1-based roster position used for generated defaults.
    pub fn from_row(row: &SpreadsheetRow, sequence: usize) -> Self {
        let name = mapping::NAME
            .resolve(row)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Student {sequence}"));

        Self {
            name,
            index_number: mapping::INDEX_NUMBER.resolve(row).map(str::to_string),
            class_name: text_or(row, mapping::CLASS, DEFAULT_CLASS),
            gender: text_or(row, mapping::GENDER, DEFAULT_GENDER),
            date_of_birth: text_or(row, mapping::DATE_OF_BIRTH, DEFAULT_DATE_OF_BIRTH),
            strengths: list_or(row, mapping::STRENGTHS, DEFAULT_STRENGTHS),
            weaknesses: list_or(row, mapping::WEAKNESSES, DEFAULT_WEAKNESSES),
        }
    }

    pub fn into_record(
        self,
        id: String,
        index_number: String,
        mock_tests: Vec<MockTestResult>,
    ) -> StudentRecord {
        StudentRecord {
            id,
            name: self.name,
            index_number,
            class_name: self.class_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            mock_tests,
        }
    }
}

/// Mock test columns for one student, matched by index number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockTestRow {
    pub index_number: String,
    pub test_name: String,
    pub date: NaiveDate,
    pub scores: ScoreMap,
}

impl MockTestRow {
    pub fn from_row(row: &SpreadsheetRow, today: NaiveDate) -> Result<Self, ImportRowError> {
        let index_number = mapping::INDEX_NUMBER
            .resolve(row)
            .ok_or(ImportRowError::MissingField {
                field: mapping::INDEX_NUMBER.primary,
            })?
            .to_string();

        let scores = subjects()
            .iter()
            .map(|subject| {
                let raw = mapping::subject_field(subject)
                    .resolve(row)
                    .map(parse_score)
                    .unwrap_or(0);
                (subject.code, raw)
            })
            .collect();

        Ok(Self {
            index_number,
            test_name: text_or(row, mapping::TEST_NAME, DEFAULT_TEST_NAME),
            date: mapping::TEST_DATE
                .resolve(row)
                .and_then(parse_test_date)
                .unwrap_or(today),
            scores,
        })
    }
}

fn text_or(row: &SpreadsheetRow, field: FieldAlias, default: &str) -> String {
    field.resolve(row).unwrap_or(default).to_string()
}

fn list_or(row: &SpreadsheetRow, field: FieldAlias, default: &[&str]) -> Vec<String> {
    let items = field.resolve(row).map(split_list).unwrap_or_default();
    if items.is_empty() {
        default.iter().map(|item| item.to_string()).collect()
    } else {
        items
    }
}

/// Comma separated cell → trimmed, de-duplicated items in first-seen order.
fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

/// Leading-integer parse: "78" → 78, "78.5" → 78, "-4" → -4, "n/a" → 0.
pub(crate) fn parse_score(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match &digits[..end] {
        "" => 0,
        leading => sign * leading.parse::<i64>().unwrap_or(i64::MAX),
    }
}

pub(crate) fn parse_test_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 5).expect("valid date")
    }

    #[test]
    fn parse_score_reads_leading_integer() {
        assert_eq!(parse_score("78"), 78);
        assert_eq!(parse_score(" 78.9 "), 78);
        assert_eq!(parse_score("-4"), -4);
        assert_eq!(parse_score("+12"), 12);
        assert_eq!(parse_score("absent"), 0);
        assert_eq!(parse_score(""), 0);
        assert_eq!(parse_score("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn parse_test_date_supports_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert_eq!(parse_test_date("2024-03-09"), Some(expected));
        assert_eq!(parse_test_date("2024-03-09T08:30:00Z"), Some(expected));
        assert_eq!(parse_test_date("09/03/2024"), Some(expected));
        assert_eq!(parse_test_date("next week"), None);
    }

    #[test]
    fn student_profile_defaults_fill_blank_columns() {
        let row = SpreadsheetRow::from_pairs([("Name", "Esi Owusu"), ("Strengths", "")]);
        let profile = StudentProfileRow::from_row(&row, 7);

        assert_eq!(profile.name, "Esi Owusu");
        assert_eq!(profile.index_number, None);
        assert_eq!(profile.class_name, DEFAULT_CLASS);
        assert_eq!(profile.gender, DEFAULT_GENDER);
        assert_eq!(profile.date_of_birth, DEFAULT_DATE_OF_BIRTH);
        assert_eq!(profile.strengths, vec!["General Arts".to_string()]);
        assert_eq!(profile.weaknesses, vec!["Mathematics".to_string()]);
    }

    #[test]
    fn student_profile_splits_and_dedupes_lists() {
        let row = SpreadsheetRow::from_pairs([
            ("name", "Kwame"),
            ("strengths", "Science, Mathematics ,Science,"),
        ]);
        let profile = StudentProfileRow::from_row(&row, 1);
        assert_eq!(
            profile.strengths,
            vec!["Science".to_string(), "Mathematics".to_string()]
        );
    }

    #[test]
    fn mock_test_row_requires_index_number() {
        let row = SpreadsheetRow::from_pairs([("Test Name", "Mock 2"), ("ENG", "70")]);
        match MockTestRow::from_row(&row, today()) {
            Err(ImportRowError::MissingField { field }) => assert_eq!(field, "Index Number"),
            other => panic!("expected missing field error, got {other:?}"),
        }
    }

    #[test]
    fn mock_test_row_resolves_labels_aliases_and_defaults() {
        let row = SpreadsheetRow::from_pairs([
            ("indexNumber", "2024003"),
            ("English Language", "81"),
            ("MATH", "120"),
            ("Integrated Science", "n/a"),
        ]);
        let parsed = MockTestRow::from_row(&row, today()).expect("row parses");

        assert_eq!(parsed.index_number, "2024003");
        assert_eq!(parsed.test_name, DEFAULT_TEST_NAME);
        assert_eq!(parsed.date, today());
        assert_eq!(parsed.scores.get("ENG"), Some(81));
        assert_eq!(parsed.scores.get("MATH"), Some(100));
        assert_eq!(parsed.scores.get("SCI"), Some(0));
        assert_eq!(parsed.scores.get("FRN"), Some(0));
        assert_eq!(parsed.scores.len(), 8);
    }
}
