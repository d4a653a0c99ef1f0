// src/progress.rs
use crate::scrape::EnrichStats;
use crate::specs::SalaryCandidate;

/// Lightweight progress reporting for the enrichment loop.
/// The CLI implements this to print per-player lines; tests record calls.
pub trait Progress {
    /// Called at the start with the number of roster rows.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A lookup is about to start for row `index` (0-based).
    fn lookup(&mut self, _index: usize, _total: usize, _player: &str, _team: &str) {}

    fn found(&mut self, _player: &str, _hit: &SalaryCandidate) {}

    /// No source produced a plausible figure; `millions` is the placeholder.
    fn defaulted(&mut self, _player: &str, _team: &str, _millions: f64) {}

    /// Called at the end with the run's counters.
    fn finish(&mut self, _stats: &EnrichStats) {}
}

/// Shorter-lived copy of an optional sink, for handing to a callee while the
/// caller keeps reporting afterwards.
pub fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    progress.as_mut().map(|p| &mut **p as &mut dyn Progress)
}
