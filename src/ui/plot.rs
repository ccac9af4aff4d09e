use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Ui, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::analysis::{CorrelationMatrix, Histogram};
use crate::color::CoolWarm;

const PLOT_HEIGHT: f32 = 280.0;
const BAR_COLOR: Color32 = Color32::from_rgb(76, 114, 176);

// ---------------------------------------------------------------------------
// Visual 1: price distribution
// ---------------------------------------------------------------------------

/// 30-bin price histogram with a density line scaled to counts.
pub fn price_histogram(ui: &mut Ui, hist: &Histogram) {
    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .edges
        .windows(2)
        .zip(&hist.counts)
        .map(|(edge, &count)| {
            Bar::new((edge[0] + edge[1]) / 2.0, count as f64)
                .width(width)
                .fill(BAR_COLOR.gamma_multiply(0.6))
        })
        .collect();

    Plot::new("price_histogram")
        .height(PLOT_HEIGHT)
        .x_axis_label("price")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            if !hist.is_empty() {
                plot_ui.bar_chart(BarChart::new(bars).name("price").color(BAR_COLOR));
            }
            if !hist.density.is_empty() {
                let points: PlotPoints = hist.density.iter().copied().collect();
                plot_ui.line(Line::new(points).name("density").color(BAR_COLOR).width(2.0));
            }
        });
}

// ---------------------------------------------------------------------------
// Visual 2: units ordered vs average price per unit
// ---------------------------------------------------------------------------

pub fn units_scatter(ui: &mut Ui, points: &[[f64; 2]]) {
    let series: PlotPoints = points.iter().copied().collect();

    Plot::new("units_vs_avg_price")
        .height(PLOT_HEIGHT)
        .x_axis_label("unitsordered")
        .y_axis_label("avg_price_per_unit")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(series).radius(2.5).color(BAR_COLOR));
        });
}

// ---------------------------------------------------------------------------
// Visual 3: correlation heatmap
// ---------------------------------------------------------------------------

const CELL: f32 = 72.0;
const LABEL_MARGIN: f32 = 130.0;

/// Annotated heatmap; undefined cells read "nan".
pub fn correlation_heatmap(ui: &mut Ui, corr: &CorrelationMatrix) {
    let n = corr.size();
    let cmap = CoolWarm::default();
    let text_color = ui.visuals().text_color();
    let grid = CELL * n as f32;

    let (response, painter) = ui.allocate_painter(
        Vec2::new(LABEL_MARGIN + grid, grid + LABEL_MARGIN * 0.3),
        Sense::hover(),
    );
    let origin = response.rect.min + Vec2::new(LABEL_MARGIN, 0.0);
    let font = FontId::proportional(13.0);

    for (row, metric) in corr.metrics.iter().enumerate() {
        let y = origin.y + CELL * (row as f32 + 0.5);
        painter.text(
            Pos2::new(origin.x - 8.0, y),
            Align2::RIGHT_CENTER,
            metric.label(),
            font.clone(),
            text_color,
        );

        for col in 0..n {
            let value = corr.get(row, col);
            let min = origin + Vec2::new(CELL * col as f32, CELL * row as f32);
            let cell = Rect::from_min_size(min, Vec2::splat(CELL));
            let fill = cmap.color_for(value);
            painter.rect_filled(cell.shrink(1.0), 0.0, fill);

            let label = if value.is_nan() {
                "nan".to_string()
            } else {
                format!("{value:.2}")
            };
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                label,
                font.clone(),
                CoolWarm::text_color_on(fill),
            );
        }
    }

    for (col, metric) in corr.metrics.iter().enumerate() {
        painter.text(
            Pos2::new(origin.x + CELL * (col as f32 + 0.5), origin.y + grid + 6.0),
            Align2::CENTER_TOP,
            short_label(metric.label()),
            FontId::proportional(11.0),
            text_color,
        );
    }
}

/// Column labels under the grid must fit one cell.
fn short_label(label: &str) -> String {
    match label {
        "avg_price_per_unit" => "avg_price".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Placeholder when no dataset is loaded
// ---------------------------------------------------------------------------

pub fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a sales file to start  (File → Open…)");
    });
}

/// Shown above the charts when the active range matches no records.
pub fn empty_range_notice(ui: &mut Ui) {
    ui.label(
        egui::RichText::new("No sales in the selected date range.").color(Color32::YELLOW),
    );
}
