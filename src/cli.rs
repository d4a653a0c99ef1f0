// src/cli.rs
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::options::{AppOptions, Disambiguation, ExportFormat, FetcherKind};
use crate::progress::Progress;
use crate::runner::{self, Job, RunSummary};
use crate::scrape::EnrichStats;
use crate::specs::SalaryCandidate;

/// Parse the command line (or prompt when there is none), run the job and
/// print the summary.
pub fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut options = AppOptions::default();
    let job = if args.is_empty() {
        let stdin = io::stdin();
        prompt_job(&mut stdin.lock(), &mut io::stdout())?
    } else {
        parse_cli(args, &mut options)?
    };

    logf!("Job: {job:?}");
    let mut progress = CliProgress::default();
    let summary = runner::run(&job, &options, Some(&mut progress))?;
    print_summary(&summary);

    if !summary.failed.is_empty() && summary.outcomes.is_empty() {
        return Err(format!("All {} file(s) failed", summary.failed.len()).into());
    }
    Ok(())
}

pub fn parse_cli<I>(args: I, options: &mut AppOptions) -> Result<Job, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut job = None;

    while let Some(a) = args.next() {
        match a.as_str() {
            "-i" | "--input" => {
                let v = args.next().ok_or("Missing value for --input")?;
                job = Some(Job::Single(PathBuf::from(v)));
            }
            "-d" | "--dir" => {
                let v = args.next().ok_or("Missing value for --dir")?;
                job = Some(Job::Batch(PathBuf::from(v)));
            }
            "--totals" => {
                let v = args.next().ok_or("Missing value for --totals")?;
                job = Some(Job::Totals(PathBuf::from(v)));
            }
            "-o" | "--out-dir" => {
                options.export.out_dir = PathBuf::from(args.next().ok_or("Missing output directory")?);
            }
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                options.export.format =
                    ExportFormat::parse(&v).ok_or_else(|| format!("Unknown format: {v}"))?;
            }
            "--policy" => {
                let v = args.next().ok_or("Missing value for --policy")?;
                options.enrich.policy =
                    Disambiguation::parse(&v).ok_or_else(|| format!("Unknown policy: {v}"))?;
            }
            "--fetcher" => {
                let v = args.next().ok_or("Missing value for --fetcher")?;
                options.enrich.fetcher = match v.to_ascii_lowercase().as_str() {
                    "browser" => FetcherKind::Browser,
                    "http" => FetcherKind::Http,
                    other => return Err(format!("Unknown fetcher: {other}").into()),
                };
            }
            "--pace-ms" => options.enrich.pace_ms = args.next().ok_or("Missing value for --pace-ms")?.parse()?,
            "--render-ms" => {
                options.enrich.render_wait_ms = args.next().ok_or("Missing value for --render-ms")?.parse()?
            }
            "--no-secondary" => options.enrich.use_secondary = false,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {a}").into()),
        }
    }

    job.ok_or_else(|| "Nothing to do: pass --input, --dir or --totals".into())
}

/// Two-question menu used when the binary is started without arguments.
pub fn prompt_job<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Job, Box<dyn Error>> {
    writeln!(out, "1) Single roster file")?;
    writeln!(out, "2) Every roster file in a directory")?;
    let choice = ask(input, out, "Choice [1/2]: ")?;

    match choice.as_str() {
        "1" => Ok(Job::Single(PathBuf::from(ask(input, out, "Roster file: ")?))),
        "2" => Ok(Job::Batch(PathBuf::from(ask(input, out, "Directory: ")?))),
        other => Err(format!("Unknown choice: {other}").into()),
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String, Box<dyn Error>> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err("No answer on stdin".into());
    }
    let answer = line.trim().trim_matches('"').to_string();
    if answer.is_empty() {
        return Err(format!("Empty answer to \"{}\"", question.trim_end_matches([':', ' '])).into());
    }
    Ok(answer)
}

/// Console progress: one line per lookup, one per result.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("{total} roster rows");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn lookup(&mut self, index: usize, total: usize, player: &str, team: &str) {
        print!("[{}/{}] {player} ({team}) ... ", index + 1, total);
        let _ = io::stdout().flush();
    }

    fn found(&mut self, _player: &str, hit: &SalaryCandidate) {
        println!("✓ {}M$ ({})", hit.millions, hit.source);
    }

    fn defaulted(&mut self, _player: &str, _team: &str, millions: f64) {
        println!("✗ not found, {millions}M$");
    }

    fn finish(&mut self, stats: &EnrichStats) {
        println!("{}", stats_line(stats));
    }
}

fn stats_line(stats: &EnrichStats) -> String {
    format!(
        "{} players, {} found ({:.1}%), {} defaulted, {} skipped in {}",
        stats.attempted,
        stats.found,
        stats.found_pct(),
        stats.defaulted,
        stats.skipped,
        fmt_secs(stats.elapsed),
    )
}

fn fmt_secs(d: Duration) -> String {
    format!("{:.1}s", d.as_secs_f64())
}

fn print_summary(summary: &RunSummary) {
    println!();
    for path in summary.files_written() {
        println!("Wrote {}", path.display());
    }
    for (path, reason) in &summary.failed {
        println!("Failed {}: {reason}", path.display());
    }
    if summary.outcomes.len() > 1 {
        println!("Overall: {}", stats_line(&summary.stats));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s!(*s)).collect()
    }

    #[test]
    fn flags_fill_options() {
        let mut o = AppOptions::default();
        let job = parse_cli(
            args(&["-i", "Test_all.csv", "--format", "tsv", "--policy", "strict", "--fetcher", "http",
                   "--pace-ms", "0", "--no-secondary", "-o", "reports"]),
            &mut o,
        )
        .unwrap();
        assert_eq!(job, Job::Single(PathBuf::from("Test_all.csv")));
        assert_eq!(o.export.format, ExportFormat::Tsv);
        assert_eq!(o.export.out_dir, PathBuf::from("reports"));
        assert_eq!(o.enrich.policy, Disambiguation::StrictTeamMatch);
        assert_eq!(o.enrich.fetcher, FetcherKind::Http);
        assert_eq!(o.enrich.pace_ms, 0);
        assert!(!o.enrich.use_secondary);
    }

    #[test]
    fn last_job_flag_wins() {
        let mut o = AppOptions::default();
        let job = parse_cli(args(&["-i", "a.csv", "--totals", "out/a-enriched.csv"]), &mut o).unwrap();
        assert_eq!(job, Job::Totals(PathBuf::from("out/a-enriched.csv")));
    }

    #[test]
    fn bad_args_are_errors() {
        let mut o = AppOptions::default();
        assert!(parse_cli(args(&["--format", "xlsx", "-i", "a.csv"]), &mut o).is_err());
        assert!(parse_cli(args(&["--pace-ms", "soon"]), &mut o).is_err());
        assert!(parse_cli(args(&["--bogus"]), &mut o).is_err());
        assert!(parse_cli(args(&["--no-secondary"]), &mut o).is_err());
    }

    #[test]
    fn prompt_single_and_batch() {
        let mut out = Vec::new();
        let job = prompt_job(&mut Cursor::new("1\n\"C:/rosters/Test_all.csv\"\n"), &mut out).unwrap();
        assert_eq!(job, Job::Single(PathBuf::from("C:/rosters/Test_all.csv")));

        let job = prompt_job(&mut Cursor::new("2\nrosters\n"), &mut out).unwrap();
        assert_eq!(job, Job::Batch(PathBuf::from("rosters")));
    }

    #[test]
    fn prompt_rejects_unknown_choice_and_eof() {
        let mut out = Vec::new();
        assert!(prompt_job(&mut Cursor::new("3\n"), &mut out).is_err());
        assert!(prompt_job(&mut Cursor::new("1\n"), &mut out).is_err());
    }
}
