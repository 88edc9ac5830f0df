//! Run report assembly and CSV writing.
//!
//! One row per [`UrlRecord`], in arrival order — no sorting, no
//! deduplication. Columns: `Date,URL,Response-Code,FAQ`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use faqharvest_shared::{ArchiveLayout, FaqHarvestError, Result, UrlRecord};

/// Report date column format (no zero padding, as in `3/7/2026`).
const ROW_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Report filename date format (`report-03-07-2026.csv`).
const FILE_DATE_FORMAT: &str = "%m-%d-%Y";

/// One tabular report row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub date: String,
    pub url: String,
    pub status: String,
    pub faq: String,
}

impl ReportRow {
    fn from_record(record: &UrlRecord) -> Self {
        Self {
            date: record.fetch_date.format(ROW_DATE_FORMAT).to_string(),
            url: record.url.clone(),
            status: record.status.to_string(),
            faq: if record.detected { "Yes" } else { "No" }.to_string(),
        }
    }
}

/// Build report rows, one per record, in the order records arrive.
pub fn build_rows(records: &[UrlRecord]) -> Vec<ReportRow> {
    records.iter().map(ReportRow::from_record).collect()
}

/// Path of the dated report file under the archive root.
pub fn report_path(layout: &ArchiveLayout, date: DateTime<Utc>) -> PathBuf {
    layout
        .root()
        .join(format!("report-{}.csv", date.format(FILE_DATE_FORMAT)))
}

/// Write the run report as CSV with header `Date,URL,Response-Code,FAQ`.
pub fn write_report(path: &Path, records: &[UrlRecord]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).map_err(|e| FaqHarvestError::Report(e.to_string()))?;

    writer
        .write_record(["Date", "URL", "Response-Code", "FAQ"])
        .map_err(|e| FaqHarvestError::Report(e.to_string()))?;

    for row in build_rows(records) {
        writer
            .write_record([&row.date, &row.url, &row.status, &row.faq])
            .map_err(|e| FaqHarvestError::Report(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| FaqHarvestError::Report(e.to_string()))?;

    info!(path = %path.display(), rows = records.len(), "run report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use faqharvest_shared::FetchStatus;

    fn record(url: &str, status: FetchStatus, detected: bool) -> UrlRecord {
        UrlRecord {
            url: url.into(),
            fetch_date: Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap(),
            status,
            detected,
        }
    }

    #[test]
    fn one_row_per_record_in_arrival_order() {
        let records = vec![
            record("https://b.example.com/", FetchStatus::Http(200), true),
            record("https://a.example.com/", FetchStatus::Http(404), false),
            record("https://b.example.com/", FetchStatus::Error, false),
        ];

        let rows = build_rows(&records);
        assert_eq!(rows.len(), 3);
        // Arrival order preserved, duplicates kept.
        assert_eq!(rows[0].url, "https://b.example.com/");
        assert_eq!(rows[1].url, "https://a.example.com/");
        assert_eq!(rows[2].url, "https://b.example.com/");
    }

    #[test]
    fn row_formatting() {
        let rows = build_rows(&[record("https://x.example.com/faq", FetchStatus::Http(200), true)]);
        assert_eq!(rows[0].date, "3/7/2026");
        assert_eq!(rows[0].status, "200");
        assert_eq!(rows[0].faq, "Yes");

        let rows = build_rows(&[record("https://x.example.com/", FetchStatus::Error, false)]);
        assert_eq!(rows[0].status, "Error");
        assert_eq!(rows[0].faq, "No");
    }

    #[test]
    fn report_path_is_dated() {
        let layout = ArchiveLayout::new("/tmp/archive");
        let date = Utc.with_ymd_and_hms(2026, 3, 7, 0, 0, 0).unwrap();
        assert_eq!(
            report_path(&layout, date),
            PathBuf::from("/tmp/archive/report-03-07-2026.csv")
        );
    }

    #[test]
    fn writes_csv_with_header() {
        let dir = std::env::temp_dir().join(format!("faqharvest-report-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");

        let records = vec![
            record("https://a.example.com/", FetchStatus::Http(200), true),
            record("https://b.example.com/", FetchStatus::Error, false),
        ];
        write_report(&path, &records).expect("write report");

        let content = std::fs::read_to_string(&path).expect("read report");
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Date,URL,Response-Code,FAQ"));
        assert_eq!(lines.next(), Some("3/7/2026,https://a.example.com/,200,Yes"));
        assert_eq!(lines.next(), Some("3/7/2026,https://b.example.com/,Error,No"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
