//! CSV export of persisted evaluation results.

use std::path::Path;

use tracing::info;

use faqharvest_shared::{FaqHarvestError, Result};

use crate::eval;

/// Convert a persisted evaluation report to CSV with columns
/// `question,expected_answer,retrieved_answer,f1_score`.
pub fn export_eval_csv(json_path: &Path, csv_path: &Path) -> Result<()> {
    let report = eval::load_eval_report(json_path)?;

    let mut writer =
        csv::Writer::from_path(csv_path).map_err(|e| FaqHarvestError::Report(e.to_string()))?;

    writer
        .write_record(["question", "expected_answer", "retrieved_answer", "f1_score"])
        .map_err(|e| FaqHarvestError::Report(e.to_string()))?;

    for row in &report.results {
        writer
            .write_record([
                row.question.as_str(),
                row.expected_answer.as_str(),
                row.retrieved_answer.as_str(),
                &row.f1_score.to_string(),
            ])
            .map_err(|e| FaqHarvestError::Report(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| FaqHarvestError::Report(e.to_string()))?;

    info!(
        rows = report.results.len(),
        output = %csv_path.display(),
        "evaluation results exported"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{EvalReport, EvalRow, write_eval_report};

    #[test]
    fn exports_report_rows_to_csv() {
        let dir = std::env::temp_dir().join(format!("faqharvest-export-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let json_path = dir.join("eval_result.json");
        let csv_path = dir.join("eval_result.csv");

        let report = EvalReport {
            results: vec![
                EvalRow {
                    question: "Q1".into(),
                    expected_answer: "A1".into(),
                    retrieved_answer: "A1".into(),
                    f1_score: 1.0,
                },
                EvalRow {
                    question: "Q2, with a comma".into(),
                    expected_answer: "A2".into(),
                    retrieved_answer: "".into(),
                    f1_score: 0.25,
                },
            ],
            average_f1: 0.625,
        };
        write_eval_report(&json_path, &report).unwrap();

        export_eval_csv(&json_path, &csv_path).unwrap();

        let content = std::fs::read_to_string(&csv_path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("question,expected_answer,retrieved_answer,f1_score")
        );
        assert_eq!(lines.next(), Some("Q1,A1,A1,1"));
        // Commas in fields are quoted by the writer.
        assert_eq!(lines.next(), Some("\"Q2, with a comma\",A2,,0.25"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_report_is_an_error() {
        let err = export_eval_csv(Path::new("/nonexistent/eval.json"), Path::new("/tmp/out.csv"))
            .unwrap_err();
        assert!(matches!(err, FaqHarvestError::Io { .. }));
    }
}
