/// Status letters used in the PEP index, and the full status names each may stand for
///
/// The empty code is a row with no status letter.
#[derive(Debug)]
pub struct StatusCodeTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

/// Process-wide, read-only status code reference data
pub static STATUS_CODES: StatusCodeTable = StatusCodeTable {
    entries: &[
        ("A", &["Active", "Accepted"]),
        ("D", &["Deferred"]),
        ("F", &["Final"]),
        ("P", &["Provisional"]),
        ("R", &["Rejected"]),
        ("S", &["Superseded"]),
        ("W", &["Withdrawn"]),
        ("", &["Draft", "Active"]),
    ],
};

impl StatusCodeTable {
    /// Full status names permitted for `code`, if the code is known
    pub fn expected(&self, code: &str) -> Option<&'static [&'static str]> {
        self.entries
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, names)| *names)
    }

    /// Returns `Some(true)` if `status` is permitted for `code`, `None` for an unknown code
    pub fn permits(&self, code: &str, status: &str) -> Option<bool> {
        self.expected(code).map(|names| names.contains(&status))
    }
}

/// Extracts the status letter from an index abbreviation such as `SF` or `I`
///
/// The first letter is the PEP type; whatever follows is the status code.
pub fn status_code(abbreviation: &str) -> &str {
    let abbreviation = abbreviation.trim();
    match abbreviation.char_indices().nth(1) {
        Some((index, _)) => &abbreviation[index..],
        None => "",
    }
}
