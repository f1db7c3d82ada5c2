//! `rekap export`: the period report as a PDF file.

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use rekap_core::aggregate::filter_and_aggregate;
use rekap_core::types::Snapshot;
use rekap_report::{export_pdf, ExportArtifact, ExportTarget, ReportDocument, ReportOptions};

use super::{build_query, load_with_report, open_store};
use crate::config::RekapConfig;
use crate::ExportArgs;

pub async fn run(config: &RekapConfig, args: ExportArgs) -> anyhow::Result<()> {
    let store = open_store(config);
    let (snapshot, ingest) = load_with_report(&store).await?;

    let artifact = export(config, &args, &snapshot, ingest.skipped_sales, Local::now().naive_local()).await?;
    if let Some(path) = &artifact.path {
        println!("Wrote {} ({} pages)", path.display(), artifact.pages);
    }
    Ok(())
}

async fn export(
    config: &RekapConfig,
    args: &ExportArgs,
    snapshot: &Snapshot,
    skipped: usize,
    now: NaiveDateTime,
) -> anyhow::Result<ExportArtifact> {
    let query = build_query(&args.window, &[], config, now);
    let aggregation = filter_and_aggregate(&snapshot.sales, &query);

    let title = args.title.as_deref().unwrap_or(&config.report.title);
    let mut options = ReportOptions::new(title)
        .with_currency(config.currency.clone())
        .with_skipped_records(skipped);
    if !args.sections.is_empty() {
        options = options.with_sections(args.sections.clone());
    }

    let doc = ReportDocument::build(&aggregation, snapshot, &options, now);
    let out_dir = args.out.clone().unwrap_or_else(|| config.report.output_dir.clone());

    export_pdf(&doc, &ExportTarget::Directory(out_dir.clone()))
        .await
        .with_context(|| format!("exporting report to {}", out_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindowArgs;
    use chrono::NaiveDate;
    use rekap_core::types::Section;
    use rekap_store::demo::demo_snapshot;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_export_writes_dated_file() {
        let dir = TempDir::new().unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let args = ExportArgs {
            window: WindowArgs {
                from: Some("2024-03-01".into()),
                to: Some("2024-03-15".into()),
                ..WindowArgs::default()
            },
            sections: vec![Section::Sales, Section::Channels],
            out: Some(dir.path().to_path_buf()),
            title: Some("Rekap Maret".into()),
        };

        let snapshot = demo_snapshot(80, now.date());
        let artifact = export(&RekapConfig::default(), &args, &snapshot, 0, now)
            .await
            .unwrap();

        let path = artifact.path.unwrap();
        assert_eq!(path, dir.path().join("report-2024-03-15.pdf"));
        assert!(path.exists());
        assert!(artifact.pages >= 1);
        let needle = b"Page 1 of";
        assert!(artifact.bytes.windows(needle.len()).any(|w| w == needle));
    }
}
