// src/specs/salary.rs
//
// Cap hit extraction from a player's contract page.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::sources::Source;
use crate::config::consts::{SALARY_MAX_M, SALARY_MIN_M};
use crate::config::options::Disambiguation;
use crate::core::html::visible_text;
use crate::core::net::PageFetcher;
use crate::core::pace::Pacer;
use crate::core::sanitize::parse_grouped_int;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// First `$` amount between "CURRENT CONTRACT" and "PROFILE".
    ContractSection,
    /// "Cap Hit" label followed by an amount, possibly on a later line.
    CapHitLabel,
    /// `<span class="val-lg">` headline figure.
    HeadlineSpan,
}

impl Strategy {
    pub const ORDER: [Strategy; 3] = [
        Strategy::ContractSection,
        Strategy::CapHitLabel,
        Strategy::HeadlineSpan,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::ContractSection => "contract-section",
            Strategy::CapHitLabel => "cap-hit-label",
            Strategy::HeadlineSpan => "headline-span",
        };
        f.write_str(name)
    }
}

/// One accepted figure with where it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct SalaryCandidate {
    pub millions: f64,
    pub strategy: Strategy,
    pub source: &'static str,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExtractionError {
    #[error("no salary figure on page")]
    NoMatch,
    #[error("{0:.2}M$ is outside the plausible cap hit band")]
    OutOfBand(f64),
    #[error("page does not mention team {team}")]
    TeamMismatch { team: String },
    #[error("no page could be fetched")]
    Unreachable,
}

impl ExtractionError {
    // Which miss to report when several variants missed differently.
    fn weight(&self) -> u8 {
        match self {
            ExtractionError::Unreachable => 0,
            ExtractionError::NoMatch => 1,
            ExtractionError::OutOfBand(_) => 2,
            ExtractionError::TeamMismatch { .. } => 3,
        }
    }
}

/* ---------------- Patterns ---------------- */

fn contract_section_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)CURRENT\s+CONTRACT(.*?)PROFILE").expect("valid regex"))
}

fn dollar_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$([0-9,]+)").expect("valid regex"))
}

fn cap_hit_label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)Cap\s+Hit[^$]*\$([0-9,]+)").expect("valid regex"))
}

fn headline_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<span class="val-lg">\$([0-9,]+)</span>"#).expect("valid regex"))
}

/// The raw digit group a strategy points at, before any interpretation.
fn raw_amount(strategy: Strategy, markup: &str) -> Option<&str> {
    let caps = match strategy {
        Strategy::ContractSection => {
            let section = contract_section_re().captures(markup)?.get(1)?.as_str();
            dollar_re().captures(section)?
        }
        Strategy::CapHitLabel => cap_hit_label_re().captures(markup)?,
        Strategy::HeadlineSpan => headline_span_re().captures(markup)?,
    };
    caps.get(1).map(|m| m.as_str())
}

/* ---------------- Single page ---------------- */

pub fn in_band(millions: f64) -> bool {
    millions > SALARY_MIN_M && millions < SALARY_MAX_M
}

/// Apply one strategy: locate, convert dollars → millions, check the band.
pub fn try_strategy(strategy: Strategy, markup: &str) -> Result<f64, ExtractionError> {
    let raw = raw_amount(strategy, markup).ok_or(ExtractionError::NoMatch)?;
    let dollars = parse_grouped_int(raw).ok_or(ExtractionError::NoMatch)?;
    let millions = dollars as f64 / 1_000_000.0;
    if in_band(millions) {
        Ok(millions)
    } else {
        Err(ExtractionError::OutOfBand(millions))
    }
}

/// First strategy whose figure is plausible wins. An out-of-band hit (usually
/// a total contract value) does not stop the search.
pub fn extract(markup: &str) -> Result<(f64, Strategy), ExtractionError> {
    let mut miss = ExtractionError::NoMatch;
    for strategy in Strategy::ORDER {
        match try_strategy(strategy, markup) {
            Ok(m) => return Ok((m, strategy)),
            Err(e) => {
                logd!("{strategy}: {e}");
                if e.weight() > miss.weight() {
                    miss = e;
                }
            }
        }
    }
    Err(miss)
}

/// Case-insensitive whole-word mention of `team` in the page's visible text.
/// Team codes are short ("CAR", "SEA", "MIN"), so a bare substring test
/// would match "Career" or "Season". An empty team always matches.
pub fn team_matches(markup: &str, team: &str) -> bool {
    let team = team.trim();
    if team.is_empty() {
        return true;
    }
    match Regex::new(&format!(r"(?i)\b{}\b", regex::escape(team))) {
        Ok(re) => re.is_match(&visible_text(markup)),
        Err(e) => {
            logw!("team pattern for {team}: {e}");
            false
        }
    }
}

/// Extraction for one page under the given disambiguation policy.
pub fn read_page(markup: &str, team: &str, policy: Disambiguation) -> Result<(f64, Strategy), ExtractionError> {
    if policy == Disambiguation::StrictTeamMatch && !team_matches(markup, team) {
        return Err(ExtractionError::TeamMismatch { team: s!(team.trim()) });
    }
    extract(markup)
}

/* ---------------- One source, all URL variants ---------------- */

/// Fetch every URL variant of `slug` on `source` and keep each accepted
/// figure. Same-named players share a slug family, so the largest figure
/// wins. Fetch failures only skip their variant.
pub fn resolve(
    fetcher: &mut dyn PageFetcher,
    pacer: &mut Pacer,
    source: &Source,
    slug: &str,
    team: &str,
    policy: Disambiguation,
) -> Result<SalaryCandidate, ExtractionError> {
    let mut found: Vec<SalaryCandidate> = Vec::new();
    let mut miss = ExtractionError::Unreachable;

    for url in source.urls(slug) {
        pacer.wait();
        let markup = match fetcher.fetch(&url) {
            Ok(m) => m,
            Err(e) => {
                logw!("{url}: {e}");
                continue;
            }
        };

        match read_page(&markup, team, policy) {
            Ok((millions, strategy)) => {
                logd!("{url}: {millions:.3}M$ via {strategy}");
                found.push(SalaryCandidate { millions, strategy, source: source.name, url });
            }
            Err(e) => {
                logd!("{url}: {e}");
                if e.weight() > miss.weight() {
                    miss = e;
                }
            }
        }
    }

    found
        .into_iter()
        .max_by(|a, b| a.millions.total_cmp(&b.millions))
        .ok_or(miss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::FetchError;
    use crate::specs::sources::{CAPWAGES, PUCKPEDIA};
    use std::collections::HashMap;

    const PAGE: &str = r#"
        <div class="hdr">CURRENT CONTRACT</div>
        <div class="row"><span>Cap Hit</span>
          <span class="val-lg">$8,500,000</span></div>
        <h2>Profile</h2>
    "#;

    struct MapFetcher {
        pages: HashMap<String, String>,
        calls: Vec<String>,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages.iter().map(|(u, p)| (s!(*u), s!(*p))).collect(),
                calls: Vec::new(),
            }
        }
    }

    impl PageFetcher for MapFetcher {
        fn fetch(&mut self, url: &str) -> Result<String, FetchError> {
            self.calls.push(s!(url));
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status { url: s!(url), code: 404 })
        }
    }

    #[test]
    fn contract_section_first() {
        assert_eq!(extract(PAGE), Ok((8.5, Strategy::ContractSection)));
    }

    #[test]
    fn contract_total_falls_through_to_label() {
        let page = r#"
            CURRENT CONTRACT <td>Total $45,000,000</td> PROFILE
            <p>Cap Hit:</p>
            <p>$9,000,000</p>
        "#;
        assert_eq!(try_strategy(Strategy::ContractSection, page), Err(ExtractionError::OutOfBand(45.0)));
        assert_eq!(extract(page), Ok((9.0, Strategy::CapHitLabel)));
    }

    #[test]
    fn headline_span_as_last_resort() {
        let page = r#"<section><span class="val-lg">$1,250,000</span></section>"#;
        assert_eq!(extract(page), Ok((1.25, Strategy::HeadlineSpan)));
    }

    #[test]
    fn out_of_band_everywhere_reports_band() {
        let page = r#"CURRENT CONTRACT $450,000 PROFILE"#;
        assert_eq!(extract(page), Err(ExtractionError::OutOfBand(0.45)));
    }

    #[test]
    fn nothing_to_find() {
        assert_eq!(extract("<html><body>Player not found</body></html>"), Err(ExtractionError::NoMatch));
    }

    #[test]
    fn band_is_exclusive() {
        assert!(!in_band(0.5));
        assert!(!in_band(20.0));
        assert!(in_band(0.775));
        assert!(in_band(19.99));
    }

    #[test]
    fn strict_policy_checks_team_text() {
        let page = format!("<p>Team: Edmonton Oilers</p>{PAGE}");
        assert!(read_page(&page, "TOR", Disambiguation::StrictTeamMatch).is_err());
        assert_eq!(read_page(&page, "edmonton", Disambiguation::StrictTeamMatch), Ok((8.5, Strategy::ContractSection)));
        assert_eq!(read_page(&page, "TOR", Disambiguation::MaxOfCandidates), Ok((8.5, Strategy::ContractSection)));
        assert_eq!(read_page(&page, "", Disambiguation::StrictTeamMatch), Ok((8.5, Strategy::ContractSection)));
    }

    #[test]
    fn team_code_needs_a_whole_word() {
        let page = "<p>Ottawa Senators</p><h2>Career Stats</h2> CURRENT CONTRACT $775,000 PROFILE";
        assert!(!team_matches(page, "CAR"));
        assert_eq!(
            read_page(page, "CAR", Disambiguation::StrictTeamMatch),
            Err(ExtractionError::TeamMismatch { team: s!("CAR") })
        );
        assert!(!team_matches("<td>Season</td><td>Minutes</td><p>history</p>", "SEA"));
        assert!(!team_matches("<td>Minutes</td>", "MIN"));
        assert!(!team_matches("<p>history</p>", "TOR"));

        assert!(team_matches("<td>TOR</td><td>2024-25</td>", "tor"));
        assert!(team_matches("<p>Signed with (SEA) in 2023</p>", "SEA"));
    }

    #[test]
    fn resolve_takes_max_across_variants() {
        let low = r#"CURRENT CONTRACT $1,000,000 PROFILE"#;
        let high = r#"CURRENT CONTRACT $6,250,000 PROFILE"#;
        let mut fetcher = MapFetcher::new(&[
            ("https://puckpedia.com/player/sebastian-aho", low),
            ("https://puckpedia.com/player/sebastian-aho-1", high),
        ]);
        let mut pacer = Pacer::disabled();
        let got = resolve(
            &mut fetcher, &mut pacer, &PUCKPEDIA,
            "sebastian-aho", "CAR", Disambiguation::MaxOfCandidates,
        ).unwrap();

        assert_eq!(got.millions, 6.25);
        assert_eq!(got.url, "https://puckpedia.com/player/sebastian-aho-1");
        assert_eq!(got.source, "PuckPedia");
        // "-2" is still tried even though it 404s
        assert_eq!(fetcher.calls.len(), 3);
    }

    #[test]
    fn resolve_all_unreachable() {
        let mut fetcher = MapFetcher::new(&[]);
        let mut pacer = Pacer::disabled();
        let got = resolve(
            &mut fetcher, &mut pacer, &CAPWAGES,
            "nobody", "", Disambiguation::MaxOfCandidates,
        );
        assert_eq!(got, Err(ExtractionError::Unreachable));
    }

    #[test]
    fn resolve_strict_skips_other_team_pages() {
        let theirs = r#"<p>Carolina Hurricanes</p> CURRENT CONTRACT $9,750,000 PROFILE"#;
        let ours = r#"<p>Ottawa Senators</p> CURRENT CONTRACT $775,000 PROFILE"#;
        let mut fetcher = MapFetcher::new(&[
            ("https://puckpedia.com/player/sebastian-aho", theirs),
            ("https://puckpedia.com/player/sebastian-aho-1", ours),
        ]);
        let mut pacer = Pacer::disabled();
        let got = resolve(
            &mut fetcher, &mut pacer, &PUCKPEDIA,
            "sebastian-aho", "Ottawa", Disambiguation::StrictTeamMatch,
        ).unwrap();
        assert_eq!(got.millions, 0.775);
    }
}
