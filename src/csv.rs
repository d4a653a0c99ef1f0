// src/csv.rs
//
// Delimited-table plumbing over the `csv` crate. Everything above this layer
// deals in `Vec<String>` rows.

use std::io::Write;
use std::path::Path;

/* ---------------- Parsing ---------------- */

/// Every record of `text`, ragged rows allowed. Only lines with no field at
/// all are dropped; a row of empty cells (`,,`) is still a row.
/// No header handling: the roster reader decides which row is a header.
pub fn read_records(text: &str, delim: u8) -> Result<Vec<Vec<String>>, ::csv::Error> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delim)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.is_empty() {
            continue;
        }
        rows.push(rec.iter().map(|f| s!(f)).collect());
    }
    Ok(rows)
}

/// Tab for `.tsv`, comma for everything else.
pub fn delim_for_path(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/* ---------------- Writing ---------------- */

/// Header then rows. Quoting is left to the `csv` writer (only when needed).
pub fn write_table<W: Write>(
    w: W,
    headers: &[String],
    rows: &[Vec<String>],
    delim: u8,
) -> Result<(), ::csv::Error> {
    let mut wtr = ::csv::WriterBuilder::new()
        .delimiter(delim)
        .flexible(true)
        .from_writer(w);

    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
