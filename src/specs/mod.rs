// src/specs/mod.rs
//! # Page-reading "specs"
//!
//! Everything that knows **where a cap hit lives inside a contract page**.
//!
//! ## What lives here
//! - The contract-reference sources we scrape and how their player URLs are
//!   built (`sources`).
//! - The ordered extraction strategies, the plausibility band, and the
//!   same-name disambiguation across URL variants (`salary`).
//!
//! ## What does **not** live here
//! - Iterating the roster, source fallback, default substitution and counters
//!   (`scrape::enrich`).
//! - Browser/HTTP plumbing (`core::net`, `core::browser`).
//! - Totals and report shaping (`totals`, `report`).
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::enrich → specs::salary::resolve(source, slug)
//!                              ↘ PageFetcher::fetch(url) per variant
//!                              ↘ salary::extract(markup) per page
//! ```
//!
//! ## Conventions
//! - Contract pages are not a stable contract: every strategy is a regex over
//!   raw markup, tried in a fixed order, and its hit is only trusted if the
//!   amount is a plausible annual cap hit.
//! - Misses are values (`ExtractionError`), never panics.
//! - Specs are testable offline against inline markup fixtures.
pub mod salary;
pub mod sources;

pub use salary::{ExtractionError, SalaryCandidate, Strategy};
pub use sources::Source;
