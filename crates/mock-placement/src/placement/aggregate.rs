use super::subjects::{core_subjects, ScoreMap};

/// Worst grade band; also what a missing core subject counts as.
pub const FAIL_BAND: u8 = 9;

/// Lower bound (inclusive) of each grade band, best band first.
const BAND_FLOORS: [(i64, u8); 8] = [
    (90, 1),
    (80, 2),
    (70, 3),
    (60, 4),
    (55, 5),
    (50, 6),
    (40, 7),
    (35, 8),
];

/// Convert a raw 0-100 score into a grade band where 1 is excellent and 9 is a fail.
pub fn grade_band(raw: i64) -> u8 {
    let score = raw.clamp(0, 100);
    BAND_FLOORS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, band)| *band)
        .unwrap_or(FAIL_BAND)
}

/// Weighted sum of core-subject grade bands. Lower is better.
///
/// Missing core scores are treated as 0 so partially entered tests still
/// produce a (poor) aggregate instead of an error.
pub fn compute_aggregate(scores: &ScoreMap) -> u32 {
    let total: f32 = core_subjects()
        .map(|subject| {
            let band = grade_band(i64::from(scores.score_or_zero(subject.code)));
            f32::from(band) * subject.weight
        })
        .sum();

    total.round().max(0.0) as u32
}
