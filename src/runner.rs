// src/runner.rs
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::{
    config::options::{AppOptions, EnrichOptions, FetcherKind},
    core::{BrowserFetcher, FetchError, HttpFetcher, PageFetcher},
    file::{list_roster_files, write_enriched, write_report},
    progress::{reborrow, Progress},
    roster::{read_roster, Roster},
    scrape::{EnrichStats, RosterEnricher},
    totals::{totals, Totals},
};

/// What to do with the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Job {
    /// Enrich one roster export.
    Single(PathBuf),
    /// Enrich every export in a directory, one shared session.
    Batch(PathBuf),
    /// Rebuild the totals report from an already enriched file. No scraping.
    Totals(PathBuf),
}

/// What one input file produced.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub enriched: Option<PathBuf>,
    pub report: PathBuf,
    pub report_rows: usize,
    pub stats: EnrichStats,
    pub totals: Totals,
}

/// Summary of what was produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
    pub failed: Vec<(PathBuf, String)>,
    pub stats: EnrichStats,
}

impl RunSummary {
    pub fn files_written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .flat_map(|o| o.enriched.iter().map(PathBuf::as_path).chain(std::iter::once(o.report.as_path())))
            .collect()
    }

    fn push(&mut self, outcome: FileOutcome) {
        self.stats.absorb(&outcome.stats);
        self.outcomes.push(outcome);
    }
}

/// Top-level runner over a real browser or HTTP session.
pub fn run(
    job: &Job,
    options: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    run_with(job, options, || open_session(&options.enrich), progress)
}

/// Run `job`, opening a session through `open` only when scraping is needed.
/// An opened session is closed exactly once on every path out.
pub fn run_with<F>(
    job: &Job,
    options: &AppOptions,
    open: F,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>>
where
    F: FnOnce() -> Result<Box<dyn PageFetcher>, FetchError>,
{
    match job {
        Job::Totals(path) => {
            let outcome = rebuild_totals(path, options, progress)?;
            let mut summary = RunSummary::default();
            summary.push(outcome);
            Ok(summary)
        }
        Job::Single(path) => {
            // Bad input should fail before a browser is ever launched.
            let roster = read_roster(path)?;

            let mut session = open()?;
            let result = enrich_roster(path, roster, options, &mut *session, reborrow(&mut progress));
            close_session(&mut *session);

            let mut summary = RunSummary::default();
            summary.push(result?);
            Ok(summary)
        }
        Job::Batch(dir) => {
            let files = list_roster_files(dir)?;
            if files.is_empty() {
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("No roster files in {}", dir.display()));
                }
                return Ok(RunSummary::default());
            }

            let mut session = open()?;
            let summary = run_batch_with(&files, options, &mut *session, progress);
            close_session(&mut *session);
            Ok(summary)
        }
    }
}

pub fn open_session(opts: &EnrichOptions) -> Result<Box<dyn PageFetcher>, FetchError> {
    let session: Box<dyn PageFetcher> = match opts.fetcher {
        FetcherKind::Browser => Box::new(BrowserFetcher::launch(opts.render_wait())?),
        FetcherKind::Http => Box::new(HttpFetcher::new()?),
    };
    Ok(session)
}

fn close_session(session: &mut dyn PageFetcher) {
    if let Err(e) = session.close() {
        loge!("Closing session failed: {e}");
    }
}

/// Every file through the same session. A file that fails (unreadable,
/// missing columns, unwritable output) is recorded and the batch goes on.
pub fn run_batch_with(
    files: &[PathBuf],
    options: &AppOptions,
    fetcher: &mut dyn PageFetcher,
    mut progress: Option<&mut dyn Progress>,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for (i, path) in files.iter().enumerate() {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("[file {}/{}] {}", i + 1, files.len(), path.display()));
        }

        let result = read_roster(path)
            .map_err(Box::<dyn Error>::from)
            .and_then(|roster| enrich_roster(path, roster, options, fetcher, reborrow(&mut progress)));

        match result {
            Ok(outcome) => summary.push(outcome),
            Err(e) => {
                loge!("{}: {e}", path.display());
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Skipping {}: {e}", path.display()));
                }
                summary.failed.push((path.clone(), e.to_string()));
            }
        }
    }
    summary
}

/// Enrich, then write both outputs for one input.
pub fn enrich_roster(
    input: &Path,
    mut roster: Roster,
    options: &AppOptions,
    fetcher: &mut dyn PageFetcher,
    mut progress: Option<&mut dyn Progress>,
) -> Result<FileOutcome, Box<dyn Error>> {
    let stats = RosterEnricher::new(fetcher, &options.enrich).enrich(&mut roster, reborrow(&mut progress));

    let export = &options.export;
    let enriched = export.enriched_path(input);
    write_enriched(&enriched, &roster, export.format.delim())?;

    let (report, report_rows, totals) = write_totals(input, &roster, options, progress)?;

    Ok(FileOutcome { input: input.to_path_buf(), enriched: Some(enriched), report, report_rows, stats, totals })
}

/// Totals report from an already enriched file.
pub fn rebuild_totals(
    enriched: &Path,
    options: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<FileOutcome, Box<dyn Error>> {
    let started = Instant::now();
    let roster = read_roster(enriched)?;
    let (report, report_rows, totals) = write_totals(enriched, &roster, options, progress)?;

    let stats = EnrichStats { rows: roster.len(), elapsed: started.elapsed(), ..Default::default() };
    Ok(FileOutcome { input: enriched.to_path_buf(), enriched: None, report, report_rows, stats, totals })
}

fn write_totals(
    input: &Path,
    roster: &Roster,
    options: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(PathBuf, usize, Totals), Box<dyn Error>> {
    let t = totals(&roster.rows);

    if let Some(p) = progress.as_deref_mut() {
        for (status, total) in t.ranked() {
            p.log(&format!("Total for {status}: ${total:.2}M"));
        }
        p.log(&format!("All statuses: ${:.2}M", t.grand_total()));
    }

    let export = &options.export;
    let report = export.totals_path(input);
    let report_rows = write_report(&report, roster, &t, export.format.delim())?;
    Ok((report, report_rows, t))
}
