use super::category::CategoryTier;
use super::directory::SchoolDirectory;
use serde::Serialize;

pub const NO_PLACEMENT_SCHOOL: &str = "No placement available";
pub const NO_PLACEMENT_PROGRAM: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub school: String,
    pub program: String,
}

impl Placement {
    pub fn unavailable() -> Self {
        Self {
            school: NO_PLACEMENT_SCHOOL.to_string(),
            program: NO_PLACEMENT_PROGRAM.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.school != NO_PLACEMENT_SCHOOL
    }
}

/// Suggest a school and program for a category.
///
/// Known simplification: this always takes the first school listed for the
/// category and that school's first program, with no ranking of candidates.
/// A category with no schools yields the sentinel placement.
pub fn predict(category: CategoryTier, directory: &SchoolDirectory) -> Placement {
    match directory.schools(category).first() {
        Some(school) => Placement {
            school: school.name.clone(),
            program: school
                .programs
                .first()
                .cloned()
                .unwrap_or_else(|| NO_PLACEMENT_PROGRAM.to_string()),
        },
        None => Placement::unavailable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::directory::SchoolEntry;

    #[test]
    fn empty_directory_yields_sentinel_for_every_tier() {
        let directory = SchoolDirectory::default();
        for tier in CategoryTier::ordered() {
            let placement = predict(tier, &directory);
            assert_eq!(placement, Placement::unavailable());
            assert!(!placement.is_available());
        }
    }

    #[test]
    fn picks_first_school_and_first_program() {
        let directory = SchoolDirectory::from(vec![
            SchoolEntry {
                name: "First Choice".to_string(),
                category: CategoryTier::Good,
                programs: vec!["Business".to_string(), "Science".to_string()],
            },
            SchoolEntry {
                name: "Second Choice".to_string(),
                category: CategoryTier::Good,
                programs: vec!["Technical".to_string()],
            },
        ]);

        let placement = predict(CategoryTier::Good, &directory);
        assert_eq!(placement.school, "First Choice");
        assert_eq!(placement.program, "Business");
        assert_eq!(
            predict(CategoryTier::TopTier, &directory),
            Placement::unavailable()
        );
    }

    #[test]
    fn school_without_programs_reports_program_sentinel() {
        let directory = SchoolDirectory::from(vec![SchoolEntry {
            name: "Open Campus".to_string(),
            category: CategoryTier::Standard,
            programs: Vec::new(),
        }]);

        let placement = predict(CategoryTier::Standard, &directory);
        assert_eq!(placement.school, "Open Campus");
        assert_eq!(placement.program, NO_PLACEMENT_PROGRAM);
    }
}
