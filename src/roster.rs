// src/roster.rs
//
// Roster export → rows we can enrich.
//
// Fantrax exports come in two shapes:
//   - one table with its own header row;
//   - a skater table and a goalie table, each with its own header, the goalie
//     table introduced by a `"","Goalies"` marker row (and sometimes the
//     skater table by `"","Skaters"`).
// Two-table files are projected onto the columns both tables share, in the
// order of `COMMON_COLUMNS`, then concatenated.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::consts::{
    CAP_HIT_COL, COMMON_COLUMNS, GOALIE_MARKER, PLAYER_COL, SKATER_MARKER, STATUS_COL, TEAM_COL,
};
use crate::csv::{delim_for_path, read_records};
use crate::specs::SalaryCandidate;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed roster table: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("roster file is empty")]
    Empty,
    #[error("{0} block has no header row")]
    EmptyBlock(&'static str),
    #[error("required column '{0}' not found")]
    MissingColumn(&'static str),
}

/// Where a row's cap hit came from.
#[derive(Clone, Debug, PartialEq)]
pub enum CapHit {
    /// Scraped and accepted.
    Found(SalaryCandidate),
    /// Nothing plausible anywhere; entry-level placeholder.
    Default(f64),
    /// Read back from an already enriched file.
    Recorded(f64),
}

impl CapHit {
    pub fn millions(&self) -> f64 {
        match self {
            CapHit::Found(c) => c.millions,
            CapHit::Default(m) | CapHit::Recorded(m) => *m,
        }
    }
}

/// One input row. `cells` holds every input column in header order and is
/// never edited; `cap_hit` is the only thing enrichment touches.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterRow {
    pub player: String,
    pub team: String,
    pub status: String,
    pub cells: Vec<String>,
    pub cap_hit: Option<CapHit>,
}

impl RosterRow {
    /// Bare row whose cells are exactly `[player, team, status]`
    /// (matches `Roster::from_rows` headers).
    pub fn new(player: &str, team: &str, status: &str) -> Self {
        Self {
            player: s!(player),
            team: s!(team),
            status: s!(status),
            cells: row![player, team, status],
            cap_hit: None,
        }
    }

    pub fn with_cap_hit(mut self, millions: f64) -> Self {
        self.cap_hit = Some(CapHit::Recorded(millions));
        self
    }

    /// Rows without a player name are never looked up.
    pub fn has_player(&self) -> bool {
        !self.player.trim().is_empty()
    }

    /// Cap hit for summation; unset counts as zero.
    pub fn cap_hit_m(&self) -> f64 {
        self.cap_hit.as_ref().map_or(0.0, CapHit::millions)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Roster {
    pub headers: Vec<String>,
    pub rows: Vec<RosterRow>,
}

impl Roster {
    /// Roster over `Player, Team, Status` only.
    pub fn from_rows(rows: Vec<RosterRow>) -> Self {
        Self { headers: row![PLAYER_COL, TEAM_COL, STATUS_COL], rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build from a header row and data rows. A `Cap Hit (M$)` column, if
    /// present, is lifted out of the cells into `cap_hit`.
    pub fn from_table(mut headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self, InputError> {
        let cap_ix = col_index(&headers, CAP_HIT_COL);
        if let Some(i) = cap_ix {
            headers.remove(i);
        }

        let player_ix = col_index(&headers, PLAYER_COL).ok_or(InputError::MissingColumn(PLAYER_COL))?;
        let team_ix = col_index(&headers, TEAM_COL).ok_or(InputError::MissingColumn(TEAM_COL))?;
        let status_ix = col_index(&headers, STATUS_COL).ok_or(InputError::MissingColumn(STATUS_COL))?;

        let width = headers.len();
        let mut rows = Vec::with_capacity(records.len());
        for mut cells in records {
            let cap_hit = match cap_ix {
                Some(i) if i < cells.len() => {
                    let raw = cells.remove(i);
                    raw.trim().parse::<f64>().ok().map(CapHit::Recorded)
                }
                _ => None,
            };
            cells.resize(width, s!());

            rows.push(RosterRow {
                player: s!(cells[player_ix].trim()),
                team: s!(cells[team_ix].trim()),
                status: s!(cells[status_ix].trim()),
                cells,
                cap_hit,
            });
        }

        Ok(Self { headers, rows })
    }
}

/* ---------------- Reading ---------------- */

pub fn read_roster(path: &Path) -> Result<Roster, InputError> {
    let text = fs::read_to_string(path)?;
    let roster = parse_roster(&text, delim_for_path(path))?;
    logf!("Read {} rows from {}", roster.len(), path.display());
    Ok(roster)
}

pub fn parse_roster(text: &str, delim: u8) -> Result<Roster, InputError> {
    // Excel likes to prepend a BOM
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut records = read_records(text, delim)?;
    if records.first().is_some_and(|r| is_marker(r, SKATER_MARKER)) {
        records.remove(0);
    }
    if records.is_empty() {
        return Err(InputError::Empty);
    }

    match records.iter().position(|r| is_marker(r, GOALIE_MARKER)) {
        None => {
            let body = records.split_off(1);
            let headers = records.remove(0);
            Roster::from_table(headers, body)
        }
        Some(at) => {
            let mut goalies = records.split_off(at);
            goalies.remove(0); // the marker
            let skaters = records;
            logd!("Two-block roster: {} skater rows, {} goalie rows", skaters.len().saturating_sub(1), goalies.len().saturating_sub(1));
            merge_blocks(skaters, goalies)
        }
    }
}

/// `"","Goalies"`: first cell blank, second cell the section name, rest blank.
fn is_marker(record: &[String], name: &str) -> bool {
    record.len() >= 2
        && record[0].trim().is_empty()
        && record[1].trim().eq_ignore_ascii_case(name)
        && record[2..].iter().all(|c| c.trim().is_empty())
}

fn col_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn merge_blocks(skaters: Vec<Vec<String>>, goalies: Vec<Vec<String>>) -> Result<Roster, InputError> {
    let (s_head, s_rows) = split_header(skaters).ok_or(InputError::EmptyBlock(SKATER_MARKER))?;
    let (g_head, g_rows) = split_header(goalies).ok_or(InputError::EmptyBlock(GOALIE_MARKER))?;

    // Columns both blocks carry, in canonical order; Cap Hit rides along if
    // this is an already enriched file.
    let keep: Vec<(&str, usize, usize)> = COMMON_COLUMNS
        .iter()
        .copied()
        .chain(std::iter::once(CAP_HIT_COL))
        .filter_map(|name| Some((name, col_index(&s_head, name)?, col_index(&g_head, name)?)))
        .collect();

    let s_ix: Vec<usize> = keep.iter().map(|k| k.1).collect();
    let g_ix: Vec<usize> = keep.iter().map(|k| k.2).collect();

    let headers: Vec<String> = keep.iter().map(|(name, _, _)| s!(*name)).collect();
    let mut body: Vec<Vec<String>> = Vec::with_capacity(s_rows.len() + g_rows.len());
    body.extend(s_rows.iter().map(|r| project(r, &s_ix)));
    body.extend(g_rows.iter().map(|r| project(r, &g_ix)));

    Roster::from_table(headers, body)
}

fn project(row: &[String], ix: &[usize]) -> Vec<String> {
    ix.iter().map(|&i| row.get(i).cloned().unwrap_or_default()).collect()
}

fn split_header(mut block: Vec<Vec<String>>) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    if block.is_empty() {
        return None;
    }
    let rows = block.split_off(1);
    let header = block.pop()?;
    Some((header, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = "\
ID,Player,Team,Status,Age,GP
*a1*,Connor McDavid,EDM,Active,27,82
*a2*,,EDM,Active,,
*a3*,Jane Prospect,BAK,Minors,19,40
";

    const TWO_BLOCKS: &str = "\
\"\",\"Skaters\"
\"ID\",\"Pos\",\"Player\",\"Team\",\"Eligible\",\"Status\",\"Age\",\"Opponent\",\"Fantasy Points\",\"+/-\",\"GP\"
\"*s1*\",\"C\",\"Connor McDavid\",\"EDM\",\"C\",\"Active\",\"27\",\"@CGY\",\"120.5\",\"12\",\"82\"
\"\",\"Goalies\"
\"ID\",\"Pos\",\"Player\",\"Team\",\"Eligible\",\"Status\",\"Age\",\"Opponent\",\"Fantasy Points\",\"SV%\",\"GP\"
\"*g1*\",\"G\",\"Stuart Skinner\",\"EDM\",\"G\",\"Minors\",\"25\",\"@CGY\",\"60\",\".905\",\"50\"
";

    #[test]
    fn single_block_keeps_all_columns() {
        let r = parse_roster(SINGLE, b',').unwrap();
        assert_eq!(r.headers, vec!["ID", "Player", "Team", "Status", "Age", "GP"]);
        assert_eq!(r.len(), 3);
        assert_eq!(r.rows[0].player, "Connor McDavid");
        assert_eq!(r.rows[0].cells[5], "82");
        assert!(!r.rows[1].has_player());
        assert_eq!(r.rows[2].status, "Minors");
        assert!(r.rows.iter().all(|row| row.cap_hit.is_none()));
    }

    #[test]
    fn two_blocks_projected_on_shared_columns() {
        let r = parse_roster(TWO_BLOCKS, b',').unwrap();
        assert_eq!(
            r.headers,
            vec!["ID", "Player", "Team", "Pos", "Eligible", "Status", "Age", "Opponent", "Fantasy Points", "GP"]
        );
        assert_eq!(r.len(), 2);
        assert_eq!(r.rows[0].cells, vec!["*s1*", "Connor McDavid", "EDM", "C", "C", "Active", "27", "@CGY", "120.5", "82"]);
        assert_eq!(r.rows[1].player, "Stuart Skinner");
        assert_eq!(r.rows[1].status, "Minors");
        assert_eq!(r.rows[1].cells[9], "50");
    }

    #[test]
    fn goalie_marker_without_header_is_an_error() {
        let text = "ID,Player,Team,Status\n1,A,EDM,Active\n\"\",\"Goalies\"\n";
        assert!(matches!(parse_roster(text, b','), Err(InputError::EmptyBlock("Goalies"))));
    }

    #[test]
    fn missing_status_column() {
        let text = "Player,Team\nA,EDM\n";
        assert!(matches!(parse_roster(text, b','), Err(InputError::MissingColumn("Status"))));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse_roster("", b','), Err(InputError::Empty)));
        assert!(matches!(parse_roster("\"\",\"Skaters\"\n", b','), Err(InputError::Empty)));
    }

    #[test]
    fn enriched_file_cap_hits_are_loaded() {
        let text = "Player,Team,Status,Cap Hit (M$)\nA,EDM,Active,8.5\nB,EDM,Active,\n";
        let r = parse_roster(text, b',').unwrap();
        assert_eq!(r.headers, vec!["Player", "Team", "Status"]);
        assert_eq!(r.rows[0].cap_hit, Some(CapHit::Recorded(8.5)));
        assert_eq!(r.rows[1].cap_hit, None);
        assert_eq!(r.rows[1].cap_hit_m(), 0.0);
    }

    #[test]
    fn blank_cell_rows_are_kept() {
        let r = parse_roster("Player,Team,Status\nA,EDM,Active\n,,\nB,TOR,Minors\n", b',').unwrap();
        assert_eq!(r.len(), 3);
        assert!(!r.rows[1].has_player());
        assert_eq!(r.rows[1].cells, vec!["", "", ""]);
        assert_eq!(r.rows[2].player, "B");
    }

    #[test]
    fn bom_and_short_rows() {
        let text = "\u{feff}Player,Team,Status,GP\nA,EDM\n";
        let r = parse_roster(text, b',').unwrap();
        assert_eq!(r.rows[0].cells, vec!["A", "EDM", "", ""]);
        assert_eq!(r.rows[0].status, "");
    }
}
