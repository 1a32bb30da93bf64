/// Canonical form for header labels: invisible marks stripped, whitespace
/// collapsed, ASCII lowercased. "Index  Number" and "index number" collide.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}
