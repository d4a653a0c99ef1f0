// src/config/consts.rs

// Sources
pub const PRIMARY_NAME: &str = "PuckPedia";
pub const PRIMARY_BASE: &str = "https://puckpedia.com/player/";
pub const SECONDARY_NAME: &str = "CapWages";
pub const SECONDARY_BASE: &str = "https://capwages.com/players/";
pub const SLUG_SUFFIXES: &[&str] = &["", "-1", "-2"];

// Extraction
pub const SALARY_MIN_M: f64 = 0.5; // exclusive
pub const SALARY_MAX_M: f64 = 20.0; // exclusive
pub const DEFAULT_CAP_HIT_M: f64 = 0.78; // entry-level placeholder

// Browser / network
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";
pub const RENDER_WAIT_MS: u64 = 3_000;
pub const NAV_TIMEOUT_MS: u64 = 30_000;
pub const HTTP_TIMEOUT_MS: u64 = 15_000;

// Pacing
pub const REQUEST_PAUSE_MS: u64 = 1_000; // be polite

// Input
pub const GOALIE_MARKER: &str = "Goalies";
pub const SKATER_MARKER: &str = "Skaters";
pub const PLAYER_COL: &str = "Player";
pub const TEAM_COL: &str = "Team";
pub const STATUS_COL: &str = "Status";
pub const COMMON_COLUMNS: &[&str] = &[
    "ID",
    "Player",
    "Team",
    "Pos",
    "Eligible",
    "Status",
    "Age",
    "Opponent",
    "Fantasy Points",
    "Average Fantasy Points per Game",
    "% of leagues in which player was drafted",
    "Average draft position among all leagues on Fantrax",
    "GP",
];

// Output
pub const CAP_HIT_COL: &str = "Cap Hit (M$)";
pub const REPORT_HEADERS: [&str; 4] = ["Player", "Team", "Status", CAP_HIT_COL];
pub const TOTAL_LABEL: &str = "TOTAL POUR ";
pub const DEFAULT_OUT_DIR: &str = "out";
pub const ENRICHED_SUFFIX: &str = "-enriched";
pub const TOTALS_SUFFIX: &str = "-with_totals";

// Local store
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
