//! Scoring pipeline: raw scores → aggregate → category tier → suggested placement.

mod aggregate;
mod category;
mod directory;
mod predictor;
mod subjects;

pub use aggregate::{compute_aggregate, grade_band, FAIL_BAND};
pub use category::{
    classify, CategoryTier, PerformanceLevel, GOOD_MAX_AGGREGATE, TOP_TIER_MAX_AGGREGATE,
};
pub use directory::{DirectoryError, SchoolDirectory, SchoolEntry};
pub use predictor::{predict, Placement, NO_PLACEMENT_PROGRAM, NO_PLACEMENT_SCHOOL};
pub use subjects::{
    core_subjects, subject, subjects, ScoreMap, SubjectDefinition, DEFAULT_MAX_SCORE,
};

use serde::Serialize;
use std::sync::Arc;

/// Stateless scorer bound to a school directory loaded at startup.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    directory: Arc<SchoolDirectory>,
}

impl PlacementEngine {
    pub fn new(directory: Arc<SchoolDirectory>) -> Self {
        Self { directory }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(SchoolDirectory::standard()))
    }

    pub fn directory(&self) -> &SchoolDirectory {
        &self.directory
    }

    pub fn assess(&self, scores: &ScoreMap) -> PlacementOutcome {
        let aggregate = compute_aggregate(scores);
        let category = classify(aggregate);
        let placement = predict(category, &self.directory);

        PlacementOutcome {
            aggregate,
            category,
            placement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementOutcome {
    pub aggregate: u32,
    pub category: CategoryTier,
    pub placement: Placement,
}

impl PlacementOutcome {
    pub fn performance_level(&self) -> PerformanceLevel {
        self.category.performance_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assess_runs_the_full_pipeline() {
        let engine = PlacementEngine::standard();
        let scores: ScoreMap = [("ENG", 92), ("MATH", 95), ("SCI", 88), ("SOC", 90)]
            .into_iter()
            .collect();

        let outcome = engine.assess(&scores);
        assert_eq!(outcome.aggregate, 5);
        assert_eq!(outcome.category, CategoryTier::TopTier);
        assert_eq!(outcome.placement.school, "Prempeh College");
        assert_eq!(outcome.placement.program, "Science");
        assert_eq!(outcome.performance_level(), PerformanceLevel::Excellent);
    }

    #[test]
    fn assess_with_empty_directory_still_produces_an_outcome() {
        let engine = PlacementEngine::new(Arc::new(SchoolDirectory::default()));
        let outcome = engine.assess(&ScoreMap::new());
        assert_eq!(outcome.aggregate, 36);
        assert_eq!(outcome.category, CategoryTier::Standard);
        assert_eq!(outcome.placement, Placement::unavailable());
    }
}
