/// Canvas term-name phrase to Leganto term code, checked in order.
///
/// Longer phrases that contain a shorter one ("Spring & Summer Teaching"
/// contains "Summer Teaching") must come before it.
pub const TERM_RULES: &[(&str, &str)] = &[
    ("Autumn Teaching", "AUTUMN"),
    ("All Year Teaching", "YEARLY"),
    ("Default term", "YEARLY"),
    ("Autumn & Spring Teaching", "SEMESTER1"),
    ("Flexible Learning Year", "TERM1"),
    ("P/G Academic Year", "TERM3"),
    ("PGCE Academic Year", "TERM4"),
    ("Spring & Summer Teaching", "SEMESTER2"),
    ("Spring Teaching", "SPRING"),
    ("Summer Teaching", "SUMMER"),
    ("Summer Vacation", "TERM5"),
    ("U/G Academic Year", "TERM2"),
];

/// Maps a Canvas term name to a Leganto term code.
///
/// Unknown names come back unchanged so they show up in Leganto as-is.
pub fn map_term(term_name: &str) -> String {
    TERM_RULES
        .iter()
        .find(|(phrase, _)| term_name.contains(phrase))
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| term_name.to_string())
}
