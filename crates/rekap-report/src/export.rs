//! # PDF Export
//!
//! Renders a document and hands the bytes to the caller or writes them as
//! `report-<YYYY-MM-DD>.pdf`, dated by the print day.

use std::path::PathBuf;

use chrono::NaiveDate;
use tokio::fs;
use tracing::info;

use crate::document::ReportDocument;
use crate::error::{ExportError, ExportResult};
use crate::pdf::render_pdf;

/// Where an export ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Write into this directory, creating it if needed.
    Directory(PathBuf),
    /// Keep the bytes in memory.
    Bytes,
}

/// The result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    /// Set when the artifact was written to disk.
    pub path: Option<PathBuf>,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// File name for a report printed on `date`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rekap_report::file_name_for;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(file_name_for(date), "report-2024-03-15.pdf");
/// ```
pub fn file_name_for(date: NaiveDate) -> String {
    format!("report-{}.pdf", date.format("%Y-%m-%d"))
}

/// Renders `doc` as PDF and delivers it to `target`.
///
/// ## Errors
/// * `ExportError::Render` - PDF assembly failed
/// * `ExportError::Write` - Directory could not be created or file not written
pub async fn export_pdf(doc: &ReportDocument, target: &ExportTarget) -> ExportResult<ExportArtifact> {
    let rendered = render_pdf(doc)?;
    let file_name = file_name_for(doc.printed_at.date());

    let path = match target {
        ExportTarget::Bytes => None,
        ExportTarget::Directory(dir) => {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| ExportError::write(dir.display().to_string(), e))?;

            let path = dir.join(&file_name);
            fs::write(&path, &rendered.bytes)
                .await
                .map_err(|e| ExportError::write(path.display().to_string(), e))?;

            info!(
                path = %path.display(),
                pages = rendered.page_count,
                bytes = rendered.bytes.len(),
                "Report exported"
            );
            Some(path)
        }
    };

    Ok(ExportArtifact {
        file_name,
        path,
        bytes: rendered.bytes,
        pages: rendered.page_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ReportOptions;
    use crate::test_support::{march_snapshot, now};
    use rekap_core::aggregate::{filter_and_aggregate, SalesQuery};
    use rekap_core::window::{resolve_window, Preset};
    use tempfile::TempDir;

    fn doc() -> ReportDocument {
        let snapshot = march_snapshot();
        let window = resolve_window(Preset::Monthly, now(), None, None);
        let aggregation = filter_and_aggregate(&snapshot.sales, &SalesQuery::new(window));
        ReportDocument::build(&aggregation, &snapshot, &ReportOptions::default(), now())
    }

    #[tokio::test]
    async fn test_export_to_directory() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("reports");

        let artifact = export_pdf(&doc(), &ExportTarget::Directory(out.clone()))
            .await
            .unwrap();

        assert_eq!(artifact.file_name, "report-2024-03-15.pdf");
        let path = artifact.path.unwrap();
        assert_eq!(path, out.join("report-2024-03-15.pdf"));
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, artifact.bytes);
        assert_eq!(artifact.pages, 1);
    }

    #[tokio::test]
    async fn test_export_to_bytes() {
        let artifact = export_pdf(&doc(), &ExportTarget::Bytes).await.unwrap();
        assert!(artifact.path.is_none());
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_into_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        tokio::fs::write(&blocker, b"x").await.unwrap();

        let err = export_pdf(&doc(), &ExportTarget::Directory(blocker))
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
