use std::collections::HashMap;

use crate::placement::{subjects, CategoryTier, SubjectDefinition};
use crate::roster::domain::{MockTestResult, StudentRecord};

pub const DEFAULT_TOP_PERFORMERS: usize = 5;
pub const IMPROVEMENT_TREND_LIMIT: usize = 10;
pub const TOP_SCHOOLS_LIMIT: usize = 8;

/// Bucket used for students whose gender cell was left blank.
pub const UNSPECIFIED_GENDER: &str = "Unspecified";

/// Round for display only; keep the unrounded value for further computation.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}

fn students_with_tests(
    students: &[StudentRecord],
) -> impl Iterator<Item = (&StudentRecord, &MockTestResult)> {
    students
        .iter()
        .filter_map(|student| student.latest_test().map(|test| (student, test)))
}

/// First and last test by date, for students with at least two tests.
fn date_bounds(student: &StudentRecord) -> Option<(&MockTestResult, &MockTestResult)> {
    if student.mock_tests.len() < 2 {
        return None;
    }
    let tests = student.tests_by_date();
    Some((*tests.first()?, *tests.last()?))
}

/// Students ranked by latest aggregate ascending; ties keep roster order.
pub fn top_performers(students: &[StudentRecord], count: usize) -> Vec<&StudentRecord> {
    let mut ranked: Vec<(&StudentRecord, u32)> = students_with_tests(students)
        .map(|(student, test)| (student, test.aggregate))
        .collect();
    ranked.sort_by_key(|(_, aggregate)| *aggregate);
    ranked
        .into_iter()
        .take(count)
        .map(|(student, _)| student)
        .collect()
}

/// Count per gender value in first-seen order. Values are not restricted to a fixed set.
pub fn gender_distribution(students: &[StudentRecord]) -> Vec<(String, usize)> {
    let labels = students
        .iter()
        .map(|student| student.gender_label().to_string());
    count_in_first_seen_order(labels)
}

pub fn performance_distribution(students: &[StudentRecord]) -> Vec<(CategoryTier, usize)> {
    CategoryTier::ordered()
        .into_iter()
        .map(|tier| {
            let count = students_with_tests(students)
                .filter(|(_, test)| test.category == tier)
                .count();
            (tier, count)
        })
        .collect()
}

/// Mean latest aggregate over students that have at least one test.
pub fn average_aggregate(students: &[StudentRecord]) -> f64 {
    let (sum, count) = students_with_tests(students)
        .fold((0.0, 0usize), |(sum, count), (_, test)| {
            (sum + f64::from(test.aggregate), count + 1)
        });
    ratio(sum, count)
}

/// Percentage of students with 2+ tests whose last dated aggregate beats their first.
pub fn improvement_rate(students: &[StudentRecord]) -> f64 {
    let (improved, eligible) = students
        .iter()
        .filter_map(date_bounds)
        .fold((0usize, 0usize), |(improved, eligible), (first, last)| {
            let improved = improved + usize::from(last.aggregate < first.aggregate);
            (improved, eligible + 1)
        });
    ratio(improved as f64 * 100.0, eligible)
}

/// `first - last` aggregate per student (positive = better), largest first.
pub fn improvement_trend(students: &[StudentRecord], limit: usize) -> Vec<(&StudentRecord, i64)> {
    let mut trend: Vec<(&StudentRecord, i64)> = students
        .iter()
        .filter_map(|student| {
            date_bounds(student).map(|(first, last)| {
                (student, i64::from(first.aggregate) - i64::from(last.aggregate))
            })
        })
        .collect();
    trend.sort_by(|a, b| b.1.cmp(&a.1));
    trend.truncate(limit);
    trend
}

/// Mean latest raw score per subject; a subject missing from a test counts as 0.
pub fn subject_averages(students: &[StudentRecord]) -> Vec<(&'static SubjectDefinition, f64)> {
    let latest: Vec<&MockTestResult> = students_with_tests(students)
        .map(|(_, test)| test)
        .collect();

    subjects()
        .iter()
        .map(|subject| {
            let sum: f64 = latest
                .iter()
                .map(|test| f64::from(test.scores.score_or_zero(subject.code)))
                .sum();
            (subject, ratio(sum, latest.len()))
        })
        .collect()
}

/// How often each school is the latest prediction, most frequent first.
pub fn predicted_school_frequency(
    students: &[StudentRecord],
    limit: usize,
) -> Vec<(String, usize)> {
    let schools = students_with_tests(students)
        .map(|(_, test)| test.predicted_school.trim())
        .filter(|school| !school.is_empty())
        .map(str::to_string);
    let mut counts = count_in_first_seen_order(schools);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

fn count_in_first_seen_order<I>(values: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match positions.get(&value) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}
