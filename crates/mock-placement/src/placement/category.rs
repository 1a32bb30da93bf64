use serde::{Deserialize, Serialize};

/// Highest aggregate (inclusive) that still places a student in the top tier.
pub const TOP_TIER_MAX_AGGREGATE: u32 = 6;
/// Highest aggregate (inclusive) for the good-schools tier.
pub const GOOD_MAX_AGGREGATE: u32 = 15;

/// School-category bracket derived from an aggregate.
///
/// The wire form is the display label so stored records stay readable by the
/// dashboard; the short codes are accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryTier {
    #[serde(rename = "Category A (Top Tier)", alias = "TOP_TIER")]
    TopTier,
    #[serde(rename = "Category B (Good Schools)", alias = "GOOD")]
    Good,
    #[serde(rename = "Category C (Standard Schools)", alias = "STANDARD")]
    Standard,
}

impl CategoryTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::TopTier, Self::Good, Self::Standard]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::TopTier => "TOP_TIER",
            Self::Good => "GOOD",
            Self::Standard => "STANDARD",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TopTier => "Category A (Top Tier)",
            Self::Good => "Category B (Good Schools)",
            Self::Standard => "Category C (Standard Schools)",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Self::TopTier => "Category A",
            Self::Good => "Category B",
            Self::Standard => "Category C",
        }
    }

    /// Accepts the code, the display label, or the short label (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered().into_iter().find(|tier| {
            value.eq_ignore_ascii_case(tier.code())
                || value.eq_ignore_ascii_case(tier.label())
                || value.eq_ignore_ascii_case(tier.short_label())
        })
    }

    pub const fn performance_level(self) -> PerformanceLevel {
        match self {
            Self::TopTier => PerformanceLevel::Excellent,
            Self::Good => PerformanceLevel::Good,
            Self::Standard => PerformanceLevel::NeedsImprovement,
        }
    }
}

/// Map an aggregate onto its category. Boundaries belong to the better tier.
pub fn classify(aggregate: u32) -> CategoryTier {
    if aggregate <= TOP_TIER_MAX_AGGREGATE {
        CategoryTier::TopTier
    } else if aggregate <= GOOD_MAX_AGGREGATE {
        CategoryTier::Good
    } else {
        CategoryTier::Standard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Outstanding work. Keep up this standard through to the final exam."
            }
            Self::Good => {
                "Solid result. A little more effort in the core subjects can lift you a tier."
            }
            Self::NeedsImprovement => {
                "Focus on the core subjects; steady practice will move this aggregate down."
            }
        }
    }
}
