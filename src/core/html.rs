// src/core/html.rs
use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Find the next `<open ...>...</close>` block at or after `from`.
/// Returns byte offsets of the whole block.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => { in_tag = true; out.push(' '); }
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Drop every `<tag ...>...</tag>` block (scripts, styles).
pub fn remove_blocks_ci(s: &str, tag: &str) -> String {
    let open = join!("<", tag);
    let close = join!("</", tag, ">");
    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_tag_block_ci(s, &open, &close, pos) {
        out.push_str(&s[pos..b_s]);
        pos = b_e;
    }
    out.push_str(&s[pos..]);
    out
}

/// Human-visible text of a page: no scripts, styles, tags or entities.
pub fn visible_text(doc: &str) -> String {
    let doc = remove_blocks_ci(doc, "script");
    let doc = remove_blocks_ci(&doc, "style");
    normalize_entities(&strip_tags(doc))
}
