mod metrics;
mod summary;
pub mod views;

pub use metrics::{
    average_aggregate, gender_distribution, improvement_rate, improvement_trend,
    performance_distribution, predicted_school_frequency, round_one_decimal, subject_averages,
    top_performers, DEFAULT_TOP_PERFORMERS, IMPROVEMENT_TREND_LIMIT, TOP_SCHOOLS_LIMIT,
    UNSPECIFIED_GENDER,
};
pub use summary::RosterAnalytics;
