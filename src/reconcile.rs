//! PEP status reconciliation
//!
//! Each successfully fetched PEP page is compared against the status the
//! index table claims for it. The PEP's own page wins: it is what gets
//! counted, and a disagreement is only reported.
//!
//! Per index row the outcome is either *discarded* (detail page could not be
//! fetched, nothing counted) or *tallied* (observed status counted once).
//! Counts are never decremented.

use crate::state::{ResultSet, StatusTally, STATUS_CODES};

/// Label used when neither the page nor the index names a status
const UNKNOWN_STATUS: &str = "Unknown";

/// Statuses read for one PEP
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    /// Absolute URL of the PEP page
    pub link: &'a str,

    /// Status claimed by the index table
    pub claimed: &'a str,

    /// Status shown on the PEP page itself
    pub observed: &'a str,

    /// Status letter from the index abbreviation, when available
    pub code: Option<&'a str>,
}

/// What happened when an observation was tallied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// The status that was counted
    pub counted: String,

    /// Index and page disagreed
    pub mismatch: bool,

    /// The counted status was not yet in the tally
    pub new_status: bool,

    /// Whether the index status letter permits the counted status; `None` when not checked
    pub code_permits: Option<bool>,
}

/// Accumulates PEP statuses across one run
#[derive(Debug, Default)]
pub struct Reconciler {
    tally: StatusTally,
    tallied: u64,
    discarded: u64,
    mismatched: u64,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tallies one fetched PEP page, using the observed status as ground truth
    pub fn record(&mut self, observation: &Observation<'_>) -> Reconciled {
        let claimed = observation.claimed.trim();
        let observed = observation.observed.trim();

        let counted = if !observed.is_empty() {
            observed
        } else {
            tracing::warn!(
                link = observation.link,
                claimed,
                "PEP page shows no status, counting the index status"
            );
            if claimed.is_empty() {
                UNKNOWN_STATUS
            } else {
                claimed
            }
        };

        let mismatch = counted != claimed;
        if mismatch {
            self.mismatched += 1;
            tracing::warn!(
                link = observation.link,
                claimed,
                observed = counted,
                "Mismatched statuses"
            );
        }

        let code_permits = observation
            .code
            .and_then(|code| STATUS_CODES.permits(code, counted));
        if code_permits == Some(false) {
            tracing::warn!(
                link = observation.link,
                code = observation.code,
                observed = counted,
                "Status is not one the index status code allows"
            );
        }

        let new_status = self.tally.record(counted);
        if new_status {
            tracing::warn!(
                link = observation.link,
                status = counted,
                "Unknown status found on page"
            );
        }
        self.tallied += 1;

        Reconciled {
            counted: counted.to_string(),
            mismatch,
            new_status,
            code_permits,
        }
    }

    /// Notes an index row whose PEP page could not be fetched; nothing is counted
    pub fn discard(&mut self, link: &str) {
        self.discarded += 1;
        tracing::debug!(link, "PEP row skipped");
    }

    pub fn tally(&self) -> &StatusTally {
        &self.tally
    }

    /// Number of PEP pages counted
    pub fn tallied(&self) -> u64 {
        self.tallied
    }

    pub fn discarded(&self) -> u64 {
        self.discarded
    }

    pub fn mismatched(&self) -> u64 {
        self.mismatched
    }

    /// Renders the final tally with its `Total` row
    pub fn finish(self) -> ResultSet {
        tracing::info!(
            tallied = self.tallied,
            discarded = self.discarded,
            mismatched = self.mismatched,
            "PEP statuses reconciled"
        );
        debug_assert_eq!(self.tally.total(), self.tallied);
        self.tally.to_result_set()
    }
}
