use super::normalizer::normalize_header;
use std::collections::HashMap;
use std::io::Read;

/// One spreadsheet row as header label → cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpreadsheetRow {
    cells: HashMap<String, String>,
}

impl SpreadsheetRow {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut cells = HashMap::new();
        for (label, value) in pairs {
            cells
                .entry(normalize_header(label.as_ref()))
                .or_insert_with(|| value.into().trim().to_string());
        }
        Self { cells }
    }

    /// Cell text for a header label; blank cells read as absent.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .get(&normalize_header(label))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.is_empty())
    }
}

/// A data row, or the decode error for a row the csv reader could not read.
pub type RowResult = Result<SpreadsheetRow, csv::Error>;

/// Read a CSV export (first row = headers) into row mappings.
///
/// Only an unreadable header line fails the whole sheet; a row that cannot be
/// decoded is returned as an error in its own slot. Rows where every cell is
/// blank are dropped, matching how spreadsheet exports pad the end of a sheet.
/// When a header repeats, the first column wins.
pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<RowResult>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                rows.push(Err(error));
                continue;
            }
        };
        let row = SpreadsheetRow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .filter(|(header, _)| !header.trim().is_empty()),
        );
        if !row.is_blank() {
            rows.push(Ok(row));
        }
    }

    Ok(rows)
}
