use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analytics::report::{DashboardReport, ReportConfig};
use crate::data::cache::DatasetCache;
use crate::data::filter::{filtered_indices, FilterSpec};
use crate::data::model::{Listing, ListingDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Parsed datasets, reused while the file on disk is unchanged.
    pub cache: DatasetCache,

    /// Snapshot currently on screen (None until a file loads).
    pub dataset: Option<Arc<ListingDataset>>,

    /// Path of the last load attempt.
    pub source: Option<PathBuf>,

    /// Current filter selections.
    pub filters: FilterSpec,

    /// Indices of listings passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates of the visible listings (cached).
    pub report: DashboardReport,

    pub report_config: ReportConfig,

    /// Whether the detail table is expanded.
    pub show_table: bool,

    /// Rows shown in the detail table.
    pub table_rows: usize,

    /// Error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(report_config: ReportConfig, table_rows: usize) -> Self {
        Self {
            cache: DatasetCache::new(),
            dataset: None,
            source: None,
            filters: FilterSpec::default(),
            visible_indices: Vec::new(),
            report: DashboardReport::empty(&report_config),
            report_config,
            show_table: false,
            table_rows,
            status_message: None,
        }
    }

    /// Load `path` through the cache. On failure the dashboard drops into its
    /// error state: no dataset, no charts, one message.
    pub fn open(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        match self.cache.load(path) {
            Ok(dataset) => {
                let same_snapshot = self
                    .dataset
                    .as_ref()
                    .is_some_and(|current| Arc::ptr_eq(current, &dataset));
                if !same_snapshot {
                    self.set_dataset(dataset);
                }
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load data: {e:#}");
                self.status_message = Some(format!("Error loading data: {e}"));
                self.dataset = None;
                self.visible_indices.clear();
                self.report = DashboardReport::empty(&self.report_config);
            }
        }
    }

    /// Re-open the last source; a no-op parse when the file is unchanged.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.open(&path);
        }
    }

    /// Drop the cached parse of the current source and load it again.
    pub fn force_reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.cache.invalidate(&path);
            self.open(&path);
        }
    }

    /// Ingest a newly loaded dataset and reset the filters to "show all".
    pub fn set_dataset(&mut self, dataset: Arc<ListingDataset>) {
        log::info!(
            "Showing {} listings from {}",
            dataset.len(),
            dataset.source.display()
        );
        self.filters = FilterSpec::for_dataset(&dataset);
        self.dataset = Some(dataset);
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters = FilterSpec::for_dataset(ds);
        }
        self.refilter();
    }

    /// Recompute `visible_indices` and the report after a filter change.
    pub fn refilter(&mut self) {
        match &self.dataset {
            Some(ds) => {
                self.visible_indices = filtered_indices(ds, &self.filters);
                let view: Vec<&Listing> = self
                    .visible_indices
                    .iter()
                    .map(|&i| &ds.listings[i])
                    .collect();
                self.report = DashboardReport::build(&view, &self.report_config);
            }
            None => {
                self.visible_indices.clear();
                self.report = DashboardReport::empty(&self.report_config);
            }
        }
    }

    /// Replace the filters, recomputing only when they actually changed.
    pub fn set_filters(&mut self, filters: FilterSpec) {
        if filters != self.filters {
            self.filters = filters;
            self.refilter();
        }
    }

    /// Visible listings in dataset order.
    pub fn visible(&self) -> impl Iterator<Item = &Listing> {
        let listings = self.dataset.as_deref().map(|ds| ds.listings.as_slice());
        self.visible_indices
            .iter()
            .filter_map(move |&i| listings.and_then(|l| l.get(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Selection;
    use crate::data::fixtures::write_csv;

    const ROWS: [&str; 3] = [
        r#""$350,000",3 bd,2 ba,"1,750 sqft","4,000 sqft",1990,30,Sold,Condo,TX,Austin,1 A St,Jane Doe - ABC Realty"#,
        r#""$725,000",4 bd,3 ba,"2,900 sqft","6,500 sqft",2008,12,For Sale,Single Family,CA,Fresno,2 B St,John Roe"#,
        r#"N/A,2 bd,1 ba,"900 sqft",,1975,60,Sold,Condo,TX,Dallas,3 C St,Jane Doe - ABC Realty"#,
    ];

    fn state() -> AppState {
        AppState::new(ReportConfig::default(), 100)
    }

    #[test]
    fn open_populates_filters_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &ROWS);
        let mut st = state();
        st.open(&path);

        assert!(st.status_message.is_none());
        assert_eq!(st.dataset.as_ref().unwrap().len(), 3);
        // The unpriced row is outside every price range.
        assert_eq!(st.visible_indices, vec![0, 1]);
        assert_eq!(st.report.summary.total, 2);
        assert_eq!(st.filters.price_min, 350_000.0);
        assert_eq!(st.filters.price_max, 725_000.0);
    }

    #[test]
    fn filter_change_updates_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &ROWS);
        let mut st = state();
        st.open(&path);

        let mut f = st.filters.clone();
        f.state = Selection::Only("CA".into());
        st.set_filters(f);
        assert_eq!(st.visible_indices, vec![1]);
        assert_eq!(st.visible().next().unwrap().city(), "Fresno");

        let mut f = st.filters.clone();
        f.state = Selection::Only("ZZ".into());
        st.set_filters(f);
        assert!(st.visible_indices.is_empty());
        assert_eq!(st.report.summary.mean_price, None);

        st.reset_filters();
        assert_eq!(st.visible_indices.len(), 2);
    }

    #[test]
    fn missing_file_enters_error_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = state();
        st.open(&dir.path().join("absent.csv"));

        assert!(st.dataset.is_none());
        assert!(st
            .status_message
            .as_deref()
            .unwrap()
            .contains("not found"));
        assert_eq!(st.report.summary.total, 0);
    }

    #[test]
    fn reload_keeps_filters_when_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", &ROWS);
        let mut st = state();
        st.open(&path);

        let mut f = st.filters.clone();
        f.status = Selection::Only("Sold".into());
        st.set_filters(f.clone());
        st.reload();
        assert_eq!(st.filters, f);

        st.force_reload();
        assert_eq!(st.filters.status, Selection::All);
    }
}
