use crate::data::model::{Metric, SalesDataset};

// ---------------------------------------------------------------------------
// Histogram with density overlay
// ---------------------------------------------------------------------------

pub const HISTOGRAM_BINS: usize = 30;
const KDE_GRID_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Kernel density estimate scaled to counts, as `(x, y)` points.
    /// Empty when there are fewer than two distinct values.
    pub density: Vec<[f64; 2]>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Equal-width histogram over `[min, max]`; the last bin is closed.
///
/// Non-finite values are ignored. An empty input gives an empty histogram.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Histogram {
            edges: Vec::new(),
            counts: Vec::new(),
            density: Vec::new(),
        };
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let density = gaussian_kde(&finite, lo, hi)
        .into_iter()
        .map(|[x, d]| [x, d * finite.len() as f64 * width])
        .collect();

    Histogram {
        edges,
        counts,
        density,
    }
}

/// Gaussian KDE with Scott's bandwidth, evaluated on an even grid over
/// `[lo, hi]`. Returns probability density, not counts.
pub fn gaussian_kde(values: &[f64], lo: f64, hi: f64) -> Vec<[f64; 2]> {
    let n = values.len();
    let sd = match sample_std(values) {
        Some(sd) if sd > 0.0 => sd,
        _ => return Vec::new(),
    };
    let bandwidth = sd * (n as f64).powf(-0.2);
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let step = (hi - lo) / (KDE_GRID_POINTS - 1) as f64;

    (0..KDE_GRID_POINTS)
        .map(|i| {
            let x = lo + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            [x, sum * norm]
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

// ---------------------------------------------------------------------------
// Scatter: units ordered vs average price per unit
// ---------------------------------------------------------------------------

pub fn units_vs_avg_price(dataset: &SalesDataset) -> Vec<[f64; 2]> {
    dataset
        .records()
        .iter()
        .map(|r| [r.units_ordered, r.avg_price_per_unit])
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    /// Row-major, `metrics.len()²` cells. NaN where undefined.
    pub values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.metrics.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.size() + col]
    }
}

/// Pearson correlation of two equally long columns.
///
/// NaN when fewer than two pairs or either column has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = xs.iter().sum::<f64>() / n as f64;
    let my = ys.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Pairwise Pearson correlation over the four numeric columns.
pub fn correlation_matrix(dataset: &SalesDataset) -> CorrelationMatrix {
    let metrics = Metric::ALL.to_vec();
    let columns: Vec<Vec<f64>> = metrics.iter().map(|&m| dataset.column(m)).collect();

    let values = columns
        .iter()
        .flat_map(|a| columns.iter().map(move |b| pearson(a, b)))
        .collect();

    CorrelationMatrix { metrics, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawSalesRow;
    use crate::data::prepare::prepare;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 * 0.37).collect();
        let h = histogram(&values, HISTOGRAM_BINS);
        assert_eq!(h.counts.len(), HISTOGRAM_BINS);
        assert_eq!(h.edges.len(), HISTOGRAM_BINS + 1);
        assert_eq!(h.counts.iter().sum::<usize>(), 100);
        assert!(close(h.edges[0], 0.0));
        assert!(close(*h.edges.last().unwrap(), 99.0 * 0.37));
    }

    #[test]
    fn histogram_max_lands_in_last_bin() {
        let h = histogram(&[0.0, 10.0], 5);
        assert_eq!(h.counts, vec![1, 0, 0, 0, 1]);
        assert!(close(h.bin_width(), 2.0));
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        let h = histogram(&[], HISTOGRAM_BINS);
        assert!(h.is_empty());
        assert!(h.density.is_empty());
        assert_eq!(h.bin_width(), 0.0);
    }

    #[test]
    fn constant_values_get_unit_wide_range_and_no_density() {
        let h = histogram(&[4.0, 4.0, 4.0], 2);
        assert!(close(h.edges[0], 3.5));
        assert!(close(h.edges[2], 4.5));
        assert_eq!(h.counts, vec![0, 3]);
        assert!(h.density.is_empty());
    }

    #[test]
    fn kde_integrates_to_about_one() {
        let values: Vec<f64> = (0..50).map(|i| (i as f64 * 1.3).sin() * 5.0 + 10.0).collect();
        let grid = gaussian_kde(&values, -10.0, 30.0);
        let step = grid[1][0] - grid[0][0];
        let area: f64 = grid.iter().map(|p| p[1] * step).sum();
        assert!((area - 1.0).abs() < 0.02, "area {area}");
    }

    #[test]
    fn pearson_known_cases() {
        assert!(close(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0));
        assert!(close(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0));
        assert!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0], &[1.0]).is_nan());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let ds = prepare(&[
            RawSalesRow::new("2023-01-02", 20.0, 2.0, 50.0),
            RawSalesRow::new("2023-01-03", 5.0, 5.0, 20.0),
            RawSalesRow::new("2023-01-04", 8.0, 10.0, 70.0),
            RawSalesRow::new("2023-01-05", 12.0, 1.0, 12.0),
        ])
        .unwrap();
        let m = correlation_matrix(&ds);
        assert_eq!(m.size(), 4);
        for i in 0..4 {
            assert!(close(m.get(i, i), 1.0));
            for j in 0..4 {
                assert!(close(m.get(i, j), m.get(j, i)));
            }
        }
    }

    #[test]
    fn correlation_on_degenerate_data_is_nan() {
        let empty = correlation_matrix(&SalesDataset::default());
        assert!(empty.values.iter().all(|v| v.is_nan()));

        let flat_price = prepare(&[
            RawSalesRow::new("2023-01-02", 7.0, 2.0, 14.0),
            RawSalesRow::new("2023-01-03", 7.0, 4.0, 25.0),
        ])
        .unwrap();
        let m = correlation_matrix(&flat_price);
        assert!(m.get(0, 0).is_nan());
        assert!(m.get(0, 2).is_nan());
        assert!(close(m.get(1, 2), 1.0));
    }

    #[test]
    fn scatter_pairs_units_with_average() {
        let ds = prepare(&[RawSalesRow::new("2023-01-02", 20.0, 2.0, 50.0)]).unwrap();
        assert_eq!(units_vs_avg_price(&ds), vec![[2.0, 25.0]]);
    }
}
