// src/scrape/enrich.rs
//
// Drives the lookup for every roster row: slug → primary source → secondary
// source → placeholder. One fetch at a time through the caller's session.

use std::time::{Duration, Instant};

use crate::config::options::{Disambiguation, EnrichOptions};
use crate::core::net::PageFetcher;
use crate::core::pace::Pacer;
use crate::core::slug::slugify;
use crate::progress::Progress;
use crate::roster::{CapHit, Roster};
use crate::specs::salary::resolve;
use crate::specs::sources::{self, Source};
use crate::specs::SalaryCandidate;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnrichStats {
    pub rows: usize,
    pub attempted: usize,
    pub found: usize,
    pub found_primary: usize,
    pub found_secondary: usize,
    pub defaulted: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

impl EnrichStats {
    /// Share of looked-up players that got a real figure.
    pub fn found_pct(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            self.found as f64 * 100.0 / self.attempted as f64
        }
    }

    /// Fold another file's counters in (batch mode).
    pub fn absorb(&mut self, other: &EnrichStats) {
        self.rows += other.rows;
        self.attempted += other.attempted;
        self.found += other.found;
        self.found_primary += other.found_primary;
        self.found_secondary += other.found_secondary;
        self.defaulted += other.defaulted;
        self.skipped += other.skipped;
        self.elapsed += other.elapsed;
    }
}

pub struct RosterEnricher<'a> {
    fetcher: &'a mut dyn PageFetcher,
    pacer: Pacer,
    sources: Vec<Source>,
    policy: Disambiguation,
    default_cap_hit: f64,
}

impl<'a> RosterEnricher<'a> {
    pub fn new(fetcher: &'a mut dyn PageFetcher, opts: &EnrichOptions) -> Self {
        Self {
            fetcher,
            pacer: Pacer::new(opts.pace()),
            sources: sources::chain(opts.use_secondary),
            policy: opts.policy,
            default_cap_hit: opts.default_cap_hit,
        }
    }

    /// Sources in order; the first one with an accepted figure ends the chain.
    pub fn lookup(&mut self, player: &str, team: &str) -> Option<SalaryCandidate> {
        let slug = slugify(player);
        if slug.is_empty() {
            return None;
        }

        for source in &self.sources {
            match resolve(self.fetcher, &mut self.pacer, source, &slug, team, self.policy) {
                Ok(hit) => return Some(hit),
                Err(e) => logd!("{player} ({team}) on {}: {e}", source.name),
            }
        }
        None
    }

    /// Assign a cap hit to every row with a player name. Never fails: a
    /// player nobody knows gets the placeholder, an empty row is skipped.
    pub fn enrich(&mut self, roster: &mut Roster, mut progress: Option<&mut dyn Progress>) -> EnrichStats {
        let started = Instant::now();
        let total = roster.len();
        let mut stats = EnrichStats { rows: total, ..Default::default() };

        if let Some(p) = progress.as_deref_mut() {
            p.begin(total);
        }

        let primary = self.sources.first().map(|s| s.name);

        for (i, row) in roster.rows.iter_mut().enumerate() {
            if !row.has_player() {
                stats.skipped += 1;
                continue;
            }
            stats.attempted += 1;

            if let Some(p) = progress.as_deref_mut() {
                p.lookup(i, total, &row.player, &row.team);
            }

            match self.lookup(&row.player, &row.team) {
                Some(hit) => {
                    stats.found += 1;
                    if Some(hit.source) == primary {
                        stats.found_primary += 1;
                    } else {
                        stats.found_secondary += 1;
                    }
                    logf!("{} ({}): {:.3}M$ from {} via {}", row.player, row.team, hit.millions, hit.url, hit.strategy);
                    if let Some(p) = progress.as_deref_mut() {
                        p.found(&row.player, &hit);
                    }
                    row.cap_hit = Some(CapHit::Found(hit));
                }
                None => {
                    stats.defaulted += 1;
                    logf!("{} ({}): not found, using {:.2}M$", row.player, row.team, self.default_cap_hit);
                    if let Some(p) = progress.as_deref_mut() {
                        p.defaulted(&row.player, &row.team, self.default_cap_hit);
                    }
                    row.cap_hit = Some(CapHit::Default(self.default_cap_hit));
                }
            }
        }

        stats.elapsed = started.elapsed();
        if let Some(p) = progress.as_deref_mut() {
            p.finish(&stats);
        }
        stats
    }
}
