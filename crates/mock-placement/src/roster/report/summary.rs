use super::metrics::{self, round_one_decimal, IMPROVEMENT_TREND_LIMIT, TOP_SCHOOLS_LIMIT};
use super::views::{
    CountEntry, DashboardView, ImprovementEntry, ReportView, ScoreEntry, TopPerformerEntry,
};
use crate::placement::{CategoryTier, SubjectDefinition};
use crate::roster::domain::StudentRecord;

/// Roster-wide statistics. Averages and rates are kept unrounded here and
/// only rounded to one decimal when converted into views.
#[derive(Debug, Default, Clone)]
pub struct RosterAnalytics {
    pub total_students: usize,
    pub students_with_tests: usize,
    pub top_performers: Vec<TopPerformerEntry>,
    pub gender_distribution: Vec<(String, usize)>,
    pub performance_distribution: Vec<(CategoryTier, usize)>,
    pub average_aggregate: f64,
    pub improvement_rate: f64,
    pub improvement_trend: Vec<ImprovementEntry>,
    pub subject_averages: Vec<(&'static SubjectDefinition, f64)>,
    pub predicted_schools: Vec<(String, usize)>,
}

impl RosterAnalytics {
    pub fn compute(students: &[StudentRecord], top_performers: usize) -> Self {
        let top_performers = metrics::top_performers(students, top_performers)
            .into_iter()
            .filter_map(|student| {
                student.latest_test().map(|test| TopPerformerEntry {
                    student_id: student.id.clone(),
                    name: student.name.clone(),
                    index_number: student.index_number.clone(),
                    aggregate: test.aggregate,
                    category: test.category,
                    predicted_school: test.predicted_school.clone(),
                })
            })
            .collect();

        let improvement_trend = metrics::improvement_trend(students, IMPROVEMENT_TREND_LIMIT)
            .into_iter()
            .map(|(student, improvement)| ImprovementEntry {
                student_id: student.id.clone(),
                student: student.name.clone(),
                improvement,
            })
            .collect();

        Self {
            total_students: students.len(),
            students_with_tests: students
                .iter()
                .filter(|student| !student.mock_tests.is_empty())
                .count(),
            top_performers,
            gender_distribution: metrics::gender_distribution(students),
            performance_distribution: metrics::performance_distribution(students),
            average_aggregate: metrics::average_aggregate(students),
            improvement_rate: metrics::improvement_rate(students),
            improvement_trend,
            subject_averages: metrics::subject_averages(students),
            predicted_schools: metrics::predicted_school_frequency(students, TOP_SCHOOLS_LIMIT),
        }
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView {
            total_students: self.total_students,
            students_with_tests: self.students_with_tests,
            top_performers: self.top_performers.clone(),
            gender_distribution: self.gender_entries(),
            performance_distribution: self.performance_entries(),
            average_aggregate: round_one_decimal(self.average_aggregate),
            improvement_rate: round_one_decimal(self.improvement_rate),
        }
    }

    pub fn report(&self) -> ReportView {
        let subject_performance = self
            .subject_averages
            .iter()
            .map(|(subject, average)| ScoreEntry {
                label: subject.name.to_string(),
                value: round_one_decimal(*average),
            })
            .collect();

        let top_schools = self
            .predicted_schools
            .iter()
            .map(|(school, count)| CountEntry {
                label: school.clone(),
                value: *count,
            })
            .collect();

        ReportView {
            performance_data: self.performance_entries(),
            gender_data: self.gender_entries(),
            subject_performance,
            improvement_trend: self.improvement_trend.clone(),
            top_schools,
            stats: self.dashboard(),
        }
    }

    fn gender_entries(&self) -> Vec<CountEntry> {
        self.gender_distribution
            .iter()
            .map(|(gender, count)| CountEntry {
                label: gender.clone(),
                value: *count,
            })
            .collect()
    }

    fn performance_entries(&self) -> Vec<CountEntry> {
        self.performance_distribution
            .iter()
            .map(|(tier, count)| CountEntry {
                label: tier.short_label().to_string(),
                value: *count,
            })
            .collect()
    }
}
