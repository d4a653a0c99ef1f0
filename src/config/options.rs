// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppOptions {
    pub enrich: EnrichOptions,
    pub export: ExportOptions,
}

/// How to pick among same-named players sharing a slug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Disambiguation {
    /// Keep every plausible page and take the largest cap hit.
    #[default]
    MaxOfCandidates,
    /// Reject pages that never mention the roster team.
    StrictTeamMatch,
}

impl Disambiguation {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "max" | "max-of-candidates" => Some(Self::MaxOfCandidates),
            "strict" | "strict-team-match" => Some(Self::StrictTeamMatch),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FetcherKind {
    #[default]
    Browser,
    Http,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnrichOptions {
    pub policy: Disambiguation,
    pub fetcher: FetcherKind,
    pub use_secondary: bool,
    pub pace_ms: u64,
    pub render_wait_ms: u64,
    pub default_cap_hit: f64,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            policy: Disambiguation::default(),
            fetcher: FetcherKind::default(),
            use_secondary: true,
            pace_ms: REQUEST_PAUSE_MS,
            render_wait_ms: RENDER_WAIT_MS,
            default_cap_hit: DEFAULT_CAP_HIT_M,
        }
    }
}

impl EnrichOptions {
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
    pub fn render_wait(&self) -> Duration {
        Duration::from_millis(self.render_wait_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/<stem>-enriched.<ext>`
    pub fn enriched_path(&self, input: &Path) -> PathBuf {
        self.derived_path(input, ENRICHED_SUFFIX)
    }

    /// `<out_dir>/<stem>-with_totals.<ext>`. An input that is already an
    /// enriched file drops its suffix first so the names stay paired.
    pub fn totals_path(&self, input: &Path) -> PathBuf {
        self.derived_path(input, TOTALS_SUFFIX)
    }

    fn derived_path(&self, input: &Path, suffix: &str) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| s!("roster"));
        let stem = stem.strip_suffix(ENRICHED_SUFFIX).unwrap_or(&stem);
        self.out_dir.join(join!(stem, suffix, ".", self.format.ext()))
    }
}
