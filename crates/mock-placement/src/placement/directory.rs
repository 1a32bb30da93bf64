use super::category::CategoryTier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// A school that can be suggested for a category, with its programs in preference order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolEntry {
    pub name: String,
    pub category: CategoryTier,
    pub programs: Vec<String>,
}

/// Immutable category → schools lookup used by the predictor.
///
/// On disk the directory is a flat JSON array of [`SchoolEntry`] values; each
/// entry is filed under its own `category`, keeping file order within a tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<SchoolEntry>", from = "Vec<SchoolEntry>")]
pub struct SchoolDirectory {
    schools: BTreeMap<CategoryTier, Vec<SchoolEntry>>,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read school directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid school directory JSON: {0}")]
    Json(#[from] serde_json::Error),
}

const STANDARD_DIRECTORY: &[(CategoryTier, &str, &[&str])] = &[
    (
        CategoryTier::TopTier,
        "Prempeh College",
        &["Science", "General Arts", "Business"],
    ),
    (
        CategoryTier::TopTier,
        "Wesley Girls' High School",
        &["Science", "General Arts", "Home Economics"],
    ),
    (
        CategoryTier::TopTier,
        "Achimota School",
        &["Science", "Business", "Visual Arts"],
    ),
    (
        CategoryTier::Good,
        "Accra Academy",
        &["General Arts", "Science", "Business"],
    ),
    (
        CategoryTier::Good,
        "Ghana National College",
        &["Business", "General Arts", "Agricultural Science"],
    ),
    (
        CategoryTier::Good,
        "Tema Senior High School",
        &["Science", "Technical", "Visual Arts"],
    ),
    (
        CategoryTier::Standard,
        "Labone Senior High School",
        &["General Arts", "Home Economics", "Business"],
    ),
    (
        CategoryTier::Standard,
        "Ejisu Senior High Technical School",
        &["Technical", "Agricultural Science", "General Arts"],
    ),
    (
        CategoryTier::Standard,
        "Kpando Senior High School",
        &["Agricultural Science", "Visual Arts", "Home Economics"],
    ),
];

impl SchoolDirectory {
    /// Built-in directory used when no directory file is configured.
    pub fn standard() -> Self {
        STANDARD_DIRECTORY
            .iter()
            .map(|(category, name, programs)| SchoolEntry {
                name: (*name).to_string(),
                category: *category,
                programs: programs.iter().map(|program| program.to_string()).collect(),
            })
            .collect::<Vec<_>>()
            .into()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn insert(&mut self, entry: SchoolEntry) {
        self.schools.entry(entry.category).or_default().push(entry);
    }

    /// Schools for a category in preference order; empty when the tier has none.
    pub fn schools(&self, category: CategoryTier) -> &[SchoolEntry] {
        self.schools
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn entries(&self) -> impl Iterator<Item = &SchoolEntry> {
        self.schools.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.values().all(Vec::is_empty)
    }
}

impl From<Vec<SchoolEntry>> for SchoolDirectory {
    fn from(entries: Vec<SchoolEntry>) -> Self {
        let mut directory = SchoolDirectory::default();
        for entry in entries {
            directory.insert(entry);
        }
        directory
    }
}

impl From<SchoolDirectory> for Vec<SchoolEntry> {
    fn from(directory: SchoolDirectory) -> Self {
        directory.schools.into_values().flatten().collect()
    }
}
