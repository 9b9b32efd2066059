//! Pipeline driver
//!
//! Runs the strategy a mode names against the shared session and hands any
//! result set to an output sink.

use crate::config::Config;
use crate::output::OutputSink;
use crate::session::Session;
use crate::state::ResultSet;
use crate::strategies::Mode;

/// Runs one strategy and returns its result set, if it produced one
pub async fn run_mode<S: Session>(
    mode: Mode,
    session: &S,
    config: &Config,
) -> crate::Result<Option<ResultSet>> {
    tracing::info!(mode = %mode, "Running strategy");
    let results = mode.run(session, config).await?;

    match &results {
        Some(results) => tracing::info!(mode = %mode, rows = results.len(), "Strategy finished"),
        None => tracing::info!(mode = %mode, "Strategy finished without a result set"),
    }
    Ok(results)
}

/// Runs one strategy and emits its result set through `sink`
///
/// # Returns
///
/// * `Ok(true)` - A result set was produced and emitted
/// * `Ok(false)` - Nothing to emit (top-level page unavailable, or a download run)
/// * `Err(HarvestError)` - The strategy or the sink failed
pub async fn run_pipeline<S, O>(
    mode: Mode,
    session: &S,
    config: &Config,
    sink: &O,
) -> crate::Result<bool>
where
    S: Session,
    O: OutputSink + ?Sized,
{
    match run_mode(mode, session, config).await? {
        Some(results) => {
            sink.emit(mode, &results)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
