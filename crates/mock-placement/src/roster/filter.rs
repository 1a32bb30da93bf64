use serde::{Deserialize, Deserializer};

use super::domain::StudentRecord;
use crate::placement::CategoryTier;

/// Student list filters. `None` (or `"all"` on the wire) means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RosterFilter {
    #[serde(default, deserialize_with = "optional_filter")]
    pub class: Option<String>,
    #[serde(default, deserialize_with = "optional_filter")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "optional_category")]
    pub category: Option<CategoryTier>,
}

impl RosterFilter {
    /// A category filter only matches students whose latest test is in that tier.
    pub fn matches(&self, student: &StudentRecord) -> bool {
        if let Some(class) = &self.class {
            if &student.class_name != class {
                return false;
            }
        }

        if let Some(gender) = &self.gender {
            if student.gender_label() != gender.as_str() {
                return false;
            }
        }

        match self.category {
            Some(category) => student.latest_category() == Some(category),
            None => true,
        }
    }

    pub fn apply(&self, students: Vec<StudentRecord>) -> Vec<StudentRecord> {
        students
            .into_iter()
            .filter(|student| self.matches(student))
            .collect()
    }
}

fn optional_filter<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all")))
}

fn optional_category<'de, D>(deserializer: D) -> Result<Option<CategoryTier>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_filter(deserializer)?
        .map(|value| {
            CategoryTier::parse(&value).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown category '{value}'"))
            })
        })
        .transpose()
}
