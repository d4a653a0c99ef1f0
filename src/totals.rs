// src/totals.rs
//
// Per-status cap hit sums. Pure; recompute whenever the roster changes.

use std::collections::BTreeMap;

use crate::roster::RosterRow;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Totals {
    by_status: BTreeMap<String, f64>,
}

impl Totals {
    pub fn get(&self, status: &str) -> Option<f64> {
        self.by_status.get(status).copied()
    }

    pub fn len(&self) -> usize {
        self.by_status.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_status.is_empty()
    }

    /// Status ascending (report order).
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.by_status.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Largest payroll first (console order). Ties fall back to status name.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut v: Vec<(&str, f64)> = self.iter().collect();
        v.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        v
    }

    pub fn grand_total(&self) -> f64 {
        self.by_status.values().sum()
    }
}

/// Group by status, sum cap hits; unset cap hits count as zero so every
/// status present in the roster gets an entry.
pub fn totals(rows: &[RosterRow]) -> Totals {
    let mut by_status: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        *by_status.entry(row.status.clone()).or_insert(0.0) += row.cap_hit_m();
    }
    Totals { by_status }
}
