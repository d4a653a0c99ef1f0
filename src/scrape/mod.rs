// src/scrape/mod.rs
mod enrich;

pub use enrich::{EnrichStats, RosterEnricher};
