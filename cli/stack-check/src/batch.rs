//! Batch checking over a directory of OBJ files.
//!
//! Every `.obj` file is checked independently. A file that errors is
//! recorded as an error row — distinct from a negative verdict — and the
//! batch continues; one malformed object must not abort the rest of the
//! sweep.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Outcome for one file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The check completed with a verdict.
    Verdict(bool),
    /// The check failed; the message explains why.
    Error(String),
}

/// One row of the batch report.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    /// File name within the input directory.
    pub file: String,
    /// What happened.
    pub outcome: FileOutcome,
}

/// Run `check` over every OBJ file in `input_dir`, in name order.
///
/// Per-file errors become [`FileOutcome::Error`] rows; only the
/// directory listing itself can fail the batch.
pub fn run_batch(
    input_dir: &Path,
    what: &str,
    check: impl Fn(&Path) -> Result<bool>,
) -> Result<Vec<BatchRow>> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(input_dir)
        .with_context(|| format!("reading input directory {}", input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("obj"))
        })
        .collect();
    entries.sort();

    let mut rows = Vec::with_capacity(entries.len());
    for path in entries {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("   Checking {what} of {file}...");

        let outcome = match check(&path) {
            Ok(verdict) => FileOutcome::Verdict(verdict),
            Err(error) => {
                tracing::warn!(file = %file, %error, "batch entry failed");
                FileOutcome::Error(error.to_string())
            }
        };
        rows.push(BatchRow { file, outcome });
    }

    println!("DONE");
    Ok(rows)
}

/// Write the report as CSV: filename, verdict as 0/1, error message.
pub fn write_report(rows: &[BatchRow], verdict_column: &str, output_file: &Path) -> Result<()> {
    let file = File::create(output_file)
        .with_context(|| format!("creating report file {}", output_file.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "Object Filename,{verdict_column},Error")?;
    for row in rows {
        match &row.outcome {
            FileOutcome::Verdict(v) => {
                writeln!(writer, "{},{},", csv_field(&row.file), i32::from(*v))?;
            }
            FileOutcome::Error(message) => {
                writeln!(writer, "{},,{}", csv_field(&row.file), csv_field(message))?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Print mean and standard error of the verdict column.
pub fn print_summary(rows: &[BatchRow]) {
    let verdicts: Vec<f64> = rows
        .iter()
        .filter_map(|row| match row.outcome {
            FileOutcome::Verdict(v) => Some(f64::from(u8::from(v))),
            FileOutcome::Error(_) => None,
        })
        .collect();
    let errors = rows.len() - verdicts.len();

    match mean_and_sem(&verdicts) {
        Some((mean, sem)) => {
            println!("mean {mean:.6}  sem {sem:.6}  ({} checked, {errors} errors)", verdicts.len());
        }
        None => println!("no files checked ({errors} errors)"),
    }
}

/// Mean and standard error (ddof = 1) of a sample.
///
/// `None` for an empty sample; the standard error of a single
/// observation is NaN, mirroring the usual tabular tooling.
fn mean_and_sem(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    if values.len() < 2 {
        return Some((mean, f64::NAN));
    }

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some((mean, (variance / n).sqrt()))
}

/// Quote a CSV field when it needs it.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn batch_continues_past_errors() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.obj"), "v 0 0 0\n").unwrap();
        std::fs::write(dir.path().join("b.obj"), "v 0 0 0\n").unwrap();
        std::fs::write(dir.path().join("ignored.txt"), "").unwrap();

        let rows = run_batch(dir.path(), "test", |path| {
            if path.file_name().is_some_and(|n| n == "a.obj") {
                anyhow::bail!("boom");
            }
            Ok(true)
        })
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0].outcome, FileOutcome::Error(_)));
        assert_eq!(rows[1].outcome, FileOutcome::Verdict(true));
    }

    #[test]
    fn report_encodes_verdicts_as_integers() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("report.csv");
        let rows = vec![
            BatchRow {
                file: "a.obj".into(),
                outcome: FileOutcome::Verdict(true),
            },
            BatchRow {
                file: "b.obj".into(),
                outcome: FileOutcome::Verdict(false),
            },
            BatchRow {
                file: "c.obj".into(),
                outcome: FileOutcome::Error("bad, \"mesh\"".into()),
            },
        ];

        write_report(&rows, "Is Rooted", &out).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Object Filename,Is Rooted,Error");
        assert_eq!(lines[1], "a.obj,1,");
        assert_eq!(lines[2], "b.obj,0,");
        assert_eq!(lines[3], "c.obj,,\"bad, \"\"mesh\"\"\"");
    }

    #[test]
    fn sem_matches_hand_computation() {
        // Three booleans: two true, one false.
        let (mean, sem) = mean_and_sem(&[1.0, 1.0, 0.0]).unwrap();
        assert!((mean - 2.0 / 3.0).abs() < 1e-12);
        // Sample std = sqrt(1/3), sem = sqrt(1/3)/sqrt(3) = 1/3.
        assert!((sem - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn sem_of_single_observation_is_nan() {
        let (mean, sem) = mean_and_sem(&[1.0]).unwrap();
        assert!((mean - 1.0).abs() < 1e-12);
        assert!(sem.is_nan());
    }

    #[test]
    fn empty_sample_has_no_summary() {
        assert!(mean_and_sem(&[]).is_none());
    }
}
