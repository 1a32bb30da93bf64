use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound applied to codes that are not part of the subject catalog.
pub const DEFAULT_MAX_SCORE: u32 = 100;

/// Static description of a mock exam subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub max_score: u32,
    pub weight: f32,
    pub core: bool,
}

const SUBJECTS: [SubjectDefinition; 8] = [
    SubjectDefinition {
        code: "ENG",
        name: "English Language",
        max_score: 100,
        weight: 1.0,
        core: true,
    },
    SubjectDefinition {
        code: "MATH",
        name: "Mathematics",
        max_score: 100,
        weight: 1.0,
        core: true,
    },
    SubjectDefinition {
        code: "SCI",
        name: "Integrated Science",
        max_score: 100,
        weight: 1.0,
        core: true,
    },
    SubjectDefinition {
        code: "SOC",
        name: "Social Studies",
        max_score: 100,
        weight: 1.0,
        core: true,
    },
    SubjectDefinition {
        code: "RME",
        name: "Religious & Moral Education",
        max_score: 100,
        weight: 0.5,
        core: false,
    },
    SubjectDefinition {
        code: "ICT",
        name: "Information & Communication Technology",
        max_score: 100,
        weight: 0.5,
        core: false,
    },
    SubjectDefinition {
        code: "GHL",
        name: "Ghanaian Language",
        max_score: 100,
        weight: 0.5,
        core: false,
    },
    SubjectDefinition {
        code: "FRN",
        name: "French",
        max_score: 100,
        weight: 0.5,
        core: false,
    },
];

/// Full subject catalog in display order.
pub fn subjects() -> &'static [SubjectDefinition] {
    &SUBJECTS
}

/// Subjects that must be present for a test to count towards placement.
pub fn core_subjects() -> impl Iterator<Item = &'static SubjectDefinition> {
    SUBJECTS.iter().filter(|subject| subject.core)
}

pub fn subject(code: &str) -> Option<&'static SubjectDefinition> {
    SUBJECTS
        .iter()
        .find(|subject| subject.code.eq_ignore_ascii_case(code.trim()))
}

/// Raw scores keyed by subject code.
///
/// Every write goes through [`ScoreMap::insert`], so stored values are always
/// clamped to `[0, max_score]` regardless of whether they came from the HTTP
/// boundary, a spreadsheet, or a persisted record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<String, u32>", from = "BTreeMap<String, f64>")]
pub struct ScoreMap(BTreeMap<String, u32>);

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw score, returning the clamped value that was kept.
    pub fn insert(&mut self, code: &str, raw: i64) -> u32 {
        let code = code.trim().to_ascii_uppercase();
        let max_score = subject(&code)
            .map(|subject| subject.max_score)
            .unwrap_or(DEFAULT_MAX_SCORE);
        let score = raw.clamp(0, i64::from(max_score)) as u32;
        self.0.insert(code, score);
        score
    }

    pub fn get(&self, code: &str) -> Option<u32> {
        self.0.get(code).copied()
    }

    pub fn score_or_zero(&self, code: &str) -> u32 {
        self.get(code).unwrap_or(0)
    }

    pub fn has_core_subjects(&self) -> bool {
        core_subjects().all(|subject| self.0.contains_key(subject.code))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(code, score)| (code.as_str(), *score))
    }
}

impl<S: AsRef<str>> FromIterator<(S, i64)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut scores = ScoreMap::new();
        for (code, raw) in iter {
            scores.insert(code.as_ref(), raw);
        }
        scores
    }
}

impl From<BTreeMap<String, f64>> for ScoreMap {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        raw.into_iter()
            .map(|(code, value)| {
                let value = if value.is_finite() { value.trunc() } else { 0.0 };
                (code, value as i64)
            })
            .collect()
    }
}

impl From<ScoreMap> for BTreeMap<String, u32> {
    fn from(scores: ScoreMap) -> Self {
        scores.0
    }
}
