//! Extraction strategies
//!
//! One strategy per page shape. Each takes the shared session and the
//! configuration and returns:
//! - `Ok(Some(results))` with a header-first `ResultSet`
//! - `Ok(None)` when the top-level page could not be fetched (or, for
//!   `download`, when the side effect is the only result)
//! - `Err(_)` when the page no longer has the expected structure

mod download;
mod pep;
mod versions;
mod whats_new;

pub use download::{archive_file_name, download};
pub use pep::pep;
pub use versions::{latest_versions, parse_version_text};
pub use whats_new::whats_new;

use crate::config::Config;
use crate::session::Session;
use crate::state::ResultSet;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;

/// Parser mode, selecting which strategy runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Mode {
    /// Articles listed in the "what's new" index
    WhatsNew,

    /// Versions and their status from the documentation sidebar
    LatestVersions,

    /// Download the PDF (A4) documentation archive
    Download,

    /// Count PEPs per status, cross-checked against each PEP page
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatsNew => "whats-new",
            Self::LatestVersions => "latest-versions",
            Self::Download => "download",
            Self::Pep => "pep",
        }
    }

    /// Runs the strategy this mode names
    pub async fn run<S: Session>(self, session: &S, config: &Config) -> crate::Result<Option<ResultSet>> {
        match self {
            Self::WhatsNew => whats_new(session, config).await,
            Self::LatestVersions => latest_versions(session, config).await,
            Self::Download => download(session, config).await,
            Self::Pep => pep(session, config).await,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress bar for a per-item loop; invisible when stderr is not a terminal
///
/// The bar is cleared when dropped, so an early `?` return leaves no
/// half-drawn bar behind.
struct Progress(ProgressBar);

impl Progress {
    fn new(len: usize) -> Self {
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({eta})")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        Self(pb)
    }

    fn inc(&self) {
        self.0.inc(1);
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}
