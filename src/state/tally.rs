use crate::state::ResultSet;

/// The nine known PEP lifecycle statuses, in reporting order
pub const CANONICAL_STATUSES: [&str; 9] = [
    "Accepted",
    "Active",
    "Deferred",
    "Draft",
    "Final",
    "Provisional",
    "Rejected",
    "Superseded",
    "Withdrawn",
];

/// Per-status PEP counts
///
/// Seeded with every canonical status at zero; statuses discovered later are
/// appended in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTally {
    counts: Vec<(String, u64)>,
}

impl Default for StatusTally {
    fn default() -> Self {
        Self::seeded()
    }
}

impl StatusTally {
    /// A tally holding every canonical status at zero
    pub fn seeded() -> Self {
        Self {
            counts: CANONICAL_STATUSES
                .iter()
                .map(|status| (status.to_string(), 0))
                .collect(),
        }
    }

    /// Counts one PEP under `status`
    ///
    /// Unknown statuses are inserted with a count of 1. Returns true when
    /// `status` was not already a key.
    pub fn record(&mut self, status: &str) -> bool {
        match self.counts.iter_mut().find(|(key, _)| key == status) {
            Some((_, count)) => {
                *count += 1;
                false
            }
            None => {
                self.counts.push((status.to_string(), 1));
                true
            }
        }
    }

    pub fn get(&self, status: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(key, _)| key == status)
            .map(|(_, count)| *count)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Renders the tally as `Status, Count` rows followed by a `Total` row
    pub fn to_result_set(&self) -> ResultSet {
        let mut results = ResultSet::with_header(["Status", "Count"]);
        for (status, count) in self.iter() {
            results.push([status.to_string(), count.to_string()]);
        }
        results.push(["Total".to_string(), self.total().to_string()]);
        results
    }
}
