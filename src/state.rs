use std::path::Path;

use chrono::NaiveDate;

use crate::analysis::{self, CorrelationMatrix, Histogram, HISTOGRAM_BINS};
use crate::data::filter::{DateRange, bounds, clamp_range, filter_by_date, init_date_range};
use crate::data::model::{Metric, SalesDataset};

// ---------------------------------------------------------------------------
// Chart inputs derived from the filtered view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub price_histogram: Histogram,
    pub scatter: Vec<[f64; 2]>,
    pub correlation: CorrelationMatrix,
}

impl ChartData {
    pub fn from_dataset(view: &SalesDataset) -> Self {
        Self {
            price_histogram: analysis::histogram(&view.column(Metric::Price), HISTOGRAM_BINS),
            scatter: analysis::units_vs_avg_price(view),
            correlation: analysis::correlation_matrix(view),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Prepared dataset (None until a file is loaded).
    pub dataset: Option<SalesDataset>,

    /// Earliest and latest sale date of `dataset`.
    pub bounds: Option<(NaiveDate, NaiveDate)>,

    /// Active date range, always inside `bounds`.
    pub range: Option<DateRange>,

    /// Records passing the current range.
    pub view: SalesDataset,

    /// Chart inputs computed from `view`.
    pub charts: Option<ChartData>,

    /// Whether the hypothesis-test block is displayed.
    pub show_hypothesis: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly prepared dataset and reset the range to its bounds.
    ///
    /// An empty dataset is rejected before any filter control exists.
    pub fn set_dataset(&mut self, dataset: SalesDataset) -> anyhow::Result<()> {
        let range = init_date_range(&dataset)?;
        self.bounds = Some(bounds(&dataset)?);
        self.range = Some(range);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
        Ok(())
    }

    /// Load a file from disk, reporting failures in `status_message`.
    pub fn load_path(&mut self, path: &Path) {
        let result = crate::data::loader::load_file(path).and_then(|ds| self.set_dataset(ds));
        if let Err(e) = result {
            log::error!("Failed to load {}: {e:#}", path.display());
            self.status_message = Some(format!("Error: {e:#}"));
        }
    }

    /// Move the active range; inputs are clamped to the dataset bounds.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let Some(b) = self.bounds else {
            return;
        };
        let clamped = clamp_range(start, end, b);
        if self.range != Some(clamped) {
            log::debug!("Date range {} ..= {}", clamped.start, clamped.end);
            self.range = Some(clamped);
            self.refilter();
        }
    }

    /// Restore the full date range.
    pub fn reset_range(&mut self) {
        if let Some((lo, hi)) = self.bounds {
            self.set_range(lo, hi);
        }
    }

    /// Recompute the filtered view and chart inputs after a range change.
    pub fn refilter(&mut self) {
        let (Some(ds), Some(range)) = (&self.dataset, self.range) else {
            return;
        };
        match filter_by_date(ds, range.start, range.end) {
            Ok(view) => {
                self.charts = Some(ChartData::from_dataset(&view));
                self.view = view;
            }
            Err(e) => {
                log::error!("Filtering failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
