use crate::placement::CategoryTier;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformerEntry {
    pub student_id: String,
    pub name: String,
    pub index_number: String,
    pub aggregate: u32,
    pub category: CategoryTier,
    pub predicted_school: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementEntry {
    pub student_id: String,
    pub student: String,
    pub improvement: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub total_students: usize,
    pub students_with_tests: usize,
    pub top_performers: Vec<TopPerformerEntry>,
    pub gender_distribution: Vec<CountEntry>,
    pub performance_distribution: Vec<CountEntry>,
    pub average_aggregate: f64,
    pub improvement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub performance_data: Vec<CountEntry>,
    pub gender_data: Vec<CountEntry>,
    pub subject_performance: Vec<ScoreEntry>,
    pub improvement_trend: Vec<ImprovementEntry>,
    pub top_schools: Vec<CountEntry>,
    pub stats: DashboardView,
}
