// src/specs/sources.rs
use crate::config::consts::{PRIMARY_BASE, PRIMARY_NAME, SECONDARY_BASE, SECONDARY_NAME, SLUG_SUFFIXES};
use crate::core::slug::url_variants;

/// A contract-reference site addressed by `<base><slug><suffix>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Source {
    pub name: &'static str,
    pub base: &'static str,
}

pub const PUCKPEDIA: Source = Source { name: PRIMARY_NAME, base: PRIMARY_BASE };
pub const CAPWAGES: Source = Source { name: SECONDARY_NAME, base: SECONDARY_BASE };

impl Source {
    pub fn urls(&self, slug: &str) -> Vec<String> {
        url_variants(self.base, slug, SLUG_SUFFIXES)
    }
}

/// Sources in fallback order.
pub fn chain(use_secondary: bool) -> Vec<Source> {
    if use_secondary { vec![PUCKPEDIA, CAPWAGES] } else { vec![PUCKPEDIA] }
}
