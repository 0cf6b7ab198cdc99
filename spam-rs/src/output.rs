//! Report rendering for the command line

use std::io::Write;

use crate::detector::EvaluationReport;
use crate::error::Result;

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table followed by the metrics
    Human,
    /// The full report as JSON
    Json,
}

/// Write `report` in the requested format
pub fn write_report<W: Write>(out: &mut W, report: &EvaluationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => write_table(out, report),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_table<W: Write>(out: &mut W, report: &EvaluationReport) -> Result<()> {
    writeln!(
        out,
        "{:<30} {:<18} {:<14} {:<10}",
        "Filename", "Spam Probability", "Actual Class", "Prediction"
    )?;
    writeln!(out, "{:-<75}", "")?;

    for result in &report.results {
        writeln!(
            out,
            "{:<30} {:<18.5} {:<14} {:<10}",
            result.name,
            result.probability,
            result.actual,
            result.predicted_label()
        )?;
    }

    writeln!(out)?;
    if let Some(training) = &report.training {
        writeln!(
            out,
            "Trained on {} ham and {} spam documents ({} skipped)",
            training.ham_documents,
            training.spam_documents,
            training.skipped.len()
        )?;
    }
    writeln!(out, "Accuracy: {:.2}%", report.metrics.accuracy)?;
    writeln!(out, "Precision: {:.2}%", report.metrics.precision)?;

    if !report.skipped.is_empty() {
        writeln!(out, "\nSkipped {} source(s):", report.skipped.len())?;
        for skipped in &report.skipped {
            writeln!(out, "  {}: {}", skipped.path.display(), skipped.reason)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::SkippedSource;
    use crate::detector::TrainingSummary;
    use crate::spam::{ClassificationResult, Label};

    fn report() -> EvaluationReport {
        EvaluationReport::new(
            vec![
                ClassificationResult {
                    name: "00001.txt".to_string(),
                    probability: 0.123456,
                    actual: Label::Ham,
                },
                ClassificationResult {
                    name: "00002.txt".to_string(),
                    probability: 0.98,
                    actual: Label::Spam,
                },
            ],
            vec![SkippedSource::new("/data/test/spam/broken", "permission denied")],
        )
    }

    #[test]
    fn test_human_table() {
        let mut buf = Vec::new();
        write_report(&mut buf, &report(), OutputFormat::Human).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Filename"));
        assert!(text.contains("0.12346"));
        assert!(text.contains("Accuracy: 100.00%"));
        assert!(text.contains("Precision: 100.00%"));
        assert!(text.contains("/data/test/spam/broken: permission denied"));

        let row = text.lines().find(|l| l.starts_with("00002.txt")).unwrap();
        assert!(row.contains("spam"));
    }

    #[test]
    fn test_human_table_training_line() {
        let mut buf = Vec::new();
        write_report(&mut buf, &report(), OutputFormat::Human).unwrap();
        assert!(!String::from_utf8(buf).unwrap().contains("Trained on"));

        let training = TrainingSummary {
            ham_documents: 5,
            spam_documents: 4,
            skipped: vec![SkippedSource::new("/data/train/ham2", "No such file or directory")],
        };
        let mut buf = Vec::new();
        write_report(&mut buf, &report().with_training(training), OutputFormat::Human).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        let at = lines
            .iter()
            .position(|l| *l == "Trained on 5 ham and 4 spam documents (1 skipped)")
            .unwrap();
        assert_eq!(lines[at + 1], "Accuracy: 100.00%");
        // training skips are summarized, not listed with the test skips
        assert!(!text.contains("/data/train/ham2"));
    }

    #[test]
    fn test_json_report() {
        let mut buf = Vec::new();
        write_report(&mut buf, &report(), OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["results"][0]["actual"], "ham");
        assert_eq!(value["results"][1]["name"], "00002.txt");
        assert_eq!(value["metrics"]["accuracy"], 100.0);
        assert_eq!(value["skipped"][0]["reason"], "permission denied");
        assert!(value.get("training").is_none());

        let mut buf = Vec::new();
        let training = TrainingSummary {
            ham_documents: 2,
            spam_documents: 3,
            skipped: Vec::new(),
        };
        write_report(&mut buf, &report().with_training(training), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["training"]["ham_documents"], 2);
        assert_eq!(value["training"]["spam_documents"], 3);
    }
}
