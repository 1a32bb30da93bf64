use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::report::UNSPECIFIED_GENDER;
use crate::placement::{CategoryTier, PlacementOutcome, ScoreMap};

/// One scored mock exam. Never edited after it is appended to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockTestResult {
    pub test_id: String,
    pub test_name: String,
    pub date: NaiveDate,
    pub scores: ScoreMap,
    pub aggregate: u32,
    pub category: CategoryTier,
    pub predicted_school: String,
    pub predicted_program: String,
}

impl MockTestResult {
    pub fn from_outcome(
        test_id: String,
        test_name: String,
        date: NaiveDate,
        scores: ScoreMap,
        outcome: PlacementOutcome,
    ) -> Self {
        Self {
            test_id,
            test_name,
            date,
            scores,
            aggregate: outcome.aggregate,
            category: outcome.category,
            predicted_school: outcome.placement.school,
            predicted_program: outcome.placement.program,
        }
    }
}

/// Student profile plus the mock tests in the order they were appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub index_number: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub gender: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub mock_tests: Vec<MockTestResult>,
}

impl StudentRecord {
    /// Most recently appended test. This is insertion order, not test date.
    pub fn latest_test(&self) -> Option<&MockTestResult> {
        self.mock_tests.last()
    }

    /// Tests sorted by date ascending; tests sharing a date keep insertion order.
    pub fn tests_by_date(&self) -> Vec<&MockTestResult> {
        let mut tests: Vec<&MockTestResult> = self.mock_tests.iter().collect();
        tests.sort_by_key(|test| test.date);
        tests
    }

    pub fn latest_category(&self) -> Option<CategoryTier> {
        self.latest_test().map(|test| test.category)
    }

    /// Trimmed gender, with blanks reported as `Unspecified`.
    pub fn gender_label(&self) -> &str {
        match self.gender.trim() {
            "" => UNSPECIFIED_GENDER,
            gender => gender,
        }
    }
}

/// Payload for scoring a new test against an existing student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockTestSubmission {
    pub test_name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub scores: ScoreMap,
}
