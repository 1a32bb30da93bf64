use super::parser::SpreadsheetRow;
use crate::placement::SubjectDefinition;

/// A field as it may appear in a spreadsheet: the human header first, then a
/// short alias. Resolution is an ordered fallback over the two labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    pub primary: &'static str,
    pub alias: &'static str,
}

impl FieldAlias {
    pub const fn new(primary: &'static str, alias: &'static str) -> Self {
        Self { primary, alias }
    }

    pub fn resolve<'r>(&self, row: &'r SpreadsheetRow) -> Option<&'r str> {
        row.get(self.primary).or_else(|| row.get(self.alias))
    }
}

pub const NAME: FieldAlias = FieldAlias::new("Name", "name");
pub const INDEX_NUMBER: FieldAlias = FieldAlias::new("Index Number", "indexNumber");
pub const CLASS: FieldAlias = FieldAlias::new("Class", "class");
pub const GENDER: FieldAlias = FieldAlias::new("Gender", "gender");
pub const DATE_OF_BIRTH: FieldAlias = FieldAlias::new("Date of Birth", "dateOfBirth");
pub const STRENGTHS: FieldAlias = FieldAlias::new("Strengths", "strengths");
pub const WEAKNESSES: FieldAlias = FieldAlias::new("Weaknesses", "weaknesses");
pub const TEST_NAME: FieldAlias = FieldAlias::new("Test Name", "testName");
pub const TEST_DATE: FieldAlias = FieldAlias::new("Date", "date");

/// Subject columns use the subject name, falling back to its code.
pub fn subject_field(subject: &SubjectDefinition) -> FieldAlias {
    FieldAlias::new(subject.name, subject.code)
}
