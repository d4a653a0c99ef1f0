// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::csv::write_table;
use crate::report::{build_report, enriched_headers, enriched_rows, report_headers};
use crate::roster::Roster;
use crate::totals::Totals;

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Create parent dirs, truncate, write header + rows.
pub fn write_table_to_path(
    path: &Path,
    headers: &[String],
    rows: &[Vec<String>],
    delim: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?);
    write_table(&mut out, headers, rows, delim)?;
    out.flush()?;
    Ok(())
}

/// Input columns + `Cap Hit (M$)`.
pub fn write_enriched(path: &Path, roster: &Roster, delim: u8) -> Result<(), Box<dyn std::error::Error>> {
    write_table_to_path(path, &enriched_headers(roster), &enriched_rows(roster), delim)?;
    logf!("Wrote enriched roster {}", path.display());
    Ok(())
}

/// Grouped report with one total row per status. Returns the row count written.
pub fn write_report(
    path: &Path,
    roster: &Roster,
    totals: &Totals,
    delim: u8,
) -> Result<usize, Box<dyn std::error::Error>> {
    let rows = build_report(roster, totals);
    write_table_to_path(path, &report_headers(), &rows, delim)?;
    logf!("Wrote totals report {} ({} rows)", path.display(), rows.len());
    Ok(rows.len())
}

/// Roster exports in `dir` (`.csv` / `.tsv`), sorted by name. Not recursive.
pub fn list_roster_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()).into());
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() { continue; }
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        if ext.eq_ignore_ascii_case("csv") || ext.eq_ignore_ascii_case("tsv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("cap_scrape_file_{}", name));
        let _ = fs::remove_dir_all(&p);
        fs::create_dir_all(&p).unwrap();
        p
    }

    #[test]
    fn nested_parent_is_created() {
        let dir = tmp_dir("nested");
        let path = dir.join("a/b/out.csv");
        write_table_to_path(&path, &row!["X"], &[row!["1"]], b',').unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "X\n1\n");
    }

    #[test]
    fn lists_only_tables_sorted() {
        let dir = tmp_dir("list");
        for name in ["b.csv", "a.TSV", "notes.txt", "c.csv"] {
            fs::write(dir.join(name), "x").unwrap();
        }
        fs::create_dir_all(dir.join("sub.csv")).unwrap();
        let names: Vec<String> = list_roster_files(&dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.TSV", "b.csv", "c.csv"]);
    }

    #[test]
    fn file_in_place_of_dir_is_rejected() {
        let dir = tmp_dir("clash");
        let f = dir.join("taken");
        fs::write(&f, "x").unwrap();
        assert!(ensure_directory(&f).is_err());
    }
}
