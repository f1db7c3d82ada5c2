//! # Commands
//!
//! One module per subcommand, plus the plumbing they share: opening the
//! store and turning window flags into a [`SalesQuery`].

pub mod dashboard;
pub mod export;
pub mod report;
pub mod seed;

use anyhow::Context;
use chrono::NaiveDateTime;
use rekap_core::aggregate::{Dimension, SalesQuery};
use rekap_core::types::Snapshot;
use rekap_core::window::{resolve_window, DateWindow, Preset};
use rekap_store::{IngestReport, JsonFileStore, JsonStoreConfig, SnapshotSource};
use tracing::{debug, warn};

use crate::config::RekapConfig;
use crate::WindowArgs;

/// The configured snapshot store.
pub fn open_store(config: &RekapConfig) -> JsonFileStore {
    JsonFileStore::new(JsonStoreConfig::new(&config.data.path))
}

/// Loads a snapshot with a readable error.
pub async fn load_snapshot<S: SnapshotSource>(source: &S) -> anyhow::Result<Snapshot> {
    source
        .load()
        .await
        .with_context(|| format!("loading snapshot from {}", source.describe()))
}

/// Loads a snapshot from the file store along with what ingestion repaired.
pub async fn load_with_report(store: &JsonFileStore) -> anyhow::Result<(Snapshot, IngestReport)> {
    store
        .load_with_report()
        .await
        .with_context(|| format!("loading snapshot from {}", store.describe()))
}

/// The preset the flags ask for.
///
/// `--from`/`--to` without `--preset` mean a custom range.
pub fn effective_preset(args: &WindowArgs, config: &RekapConfig) -> Preset {
    match args.preset {
        Some(preset) => preset,
        None if args.from.is_some() || args.to.is_some() => Preset::Custom,
        None => config.report.default_preset,
    }
}

/// Resolves the window flags against `now`.
///
/// An inverted custom range is kept and reported; it selects no sales.
pub fn resolve(args: &WindowArgs, config: &RekapConfig, now: NaiveDateTime) -> DateWindow {
    let preset = effective_preset(args, config);
    let window = resolve_window(preset, now, args.from.as_deref(), args.to.as_deref());

    if let Err(e) = window.validate() {
        warn!(error = %e, "Custom range is inverted, the report will be empty");
    }
    debug!(preset = %preset, period = %window.period_label(), "Window resolved");

    window
}

/// Builds the sales query for the flags.
pub fn build_query(
    args: &WindowArgs,
    dimensions: &[Dimension],
    config: &RekapConfig,
    now: NaiveDateTime,
) -> SalesQuery {
    let dimensions = if dimensions.is_empty() {
        config.report.dimensions.clone()
    } else {
        dimensions.to_vec()
    };

    let mut query = SalesQuery::new(resolve(args, config, now))
        .with_dimensions(dimensions)
        .with_currency(config.currency.clone());
    if let Some(search) = &args.search {
        query = query.with_search(search.clone());
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_effective_preset() {
        let config = RekapConfig::default();
        assert_eq!(effective_preset(&WindowArgs::default(), &config), Preset::Monthly);

        let range = WindowArgs {
            from: Some("2024-03-01".into()),
            ..WindowArgs::default()
        };
        assert_eq!(effective_preset(&range, &config), Preset::Custom);

        let explicit = WindowArgs {
            preset: Some(Preset::AllTime),
            from: Some("2024-03-01".into()),
            ..WindowArgs::default()
        };
        assert_eq!(effective_preset(&explicit, &config), Preset::AllTime);
    }

    #[test]
    fn test_build_query_uses_config_defaults() {
        let mut config = RekapConfig::default();
        config.report.dimensions = vec![Dimension::Payment];

        let query = build_query(&WindowArgs::default(), &[], &config, now());
        assert_eq!(query.dimensions, vec![Dimension::Payment]);
        assert_eq!(query.window.period_label(), "2024-03-01 to 2024-03-31");
        assert!(query.search.is_none());

        let args = WindowArgs {
            search: Some("shopee".into()),
            ..WindowArgs::default()
        };
        let query = build_query(&args, &[Dimension::Admin], &config, now());
        assert_eq!(query.dimensions, vec![Dimension::Admin]);
        assert_eq!(query.search.as_deref(), Some("shopee"));
    }

    #[test]
    fn test_inverted_range_still_resolves() {
        let args = WindowArgs {
            from: Some("2024-03-10".into()),
            to: Some("2024-03-01".into()),
            ..WindowArgs::default()
        };
        let window = resolve(&args, &RekapConfig::default(), now());
        assert!(window.validate().is_err());
        assert!(!window.contains(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()));
    }
}
