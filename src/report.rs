// src/report.rs
//
// Output tables:
//   - enriched: every input column plus `Cap Hit (M$)`;
//   - totals report: `Player, Team, Status, Cap Hit (M$)`, rows grouped by
//     status (ascending), each group closed by a `TOTAL POUR <status>` row.

use crate::config::consts::{CAP_HIT_COL, REPORT_HEADERS, TOTAL_LABEL};
use crate::roster::{Roster, RosterRow};
use crate::totals::Totals;

/// Shortest text that reads back as the same number ("8.5", "0.78").
pub fn fmt_millions(m: f64) -> String {
    format!("{m}")
}

/// Total rows always carry exactly two decimals ("7.50").
pub fn fmt_total(m: f64) -> String {
    format!("{m:.2}")
}

fn cap_cell(row: &RosterRow) -> String {
    row.cap_hit.as_ref().map(|c| fmt_millions(c.millions())).unwrap_or_default()
}

pub fn enriched_headers(roster: &Roster) -> Vec<String> {
    let mut h = roster.headers.clone();
    h.push(s!(CAP_HIT_COL));
    h
}

pub fn enriched_rows(roster: &Roster) -> Vec<Vec<String>> {
    roster
        .rows
        .iter()
        .map(|r| {
            let mut cells = r.cells.clone();
            cells.push(cap_cell(r));
            cells
        })
        .collect()
}

pub fn report_headers() -> Vec<String> {
    REPORT_HEADERS.iter().map(|h| s!(*h)).collect()
}

pub fn total_label(status: &str) -> String {
    join!(TOTAL_LABEL, status)
}

/// Group rows by status (stable, ascending) and close each group with its
/// total. Row count = roster rows + distinct statuses.
pub fn build_report(roster: &Roster, totals: &Totals) -> Vec<Vec<String>> {
    let mut sorted: Vec<&RosterRow> = roster.rows.iter().collect();
    sorted.sort_by(|a, b| a.status.cmp(&b.status));

    let mut out: Vec<Vec<String>> = Vec::with_capacity(sorted.len() + totals.len());
    let mut rows = sorted.into_iter().peekable();

    while let Some(first) = rows.next() {
        let status = first.status.clone();
        out.push(row![first.player.as_str(), first.team.as_str(), status.as_str(), cap_cell(first)]);

        while let Some(r) = rows.next_if(|r| r.status == status) {
            out.push(row![r.player.as_str(), r.team.as_str(), r.status.as_str(), cap_cell(r)]);
        }

        let total = totals.get(&status).unwrap_or(0.0);
        out.push(row!["", "", total_label(&status), fmt_total(total)]);
    }
    out
}
