use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Line, Plot, PlotPoint, PlotPoints,
    Points, Polygon, Text, uniform_grid_spacer,
};

use crate::charts::{BoxGroup, Chart, ChartBody, ChartKind, ChartPanel, Heatmap};
use crate::color::{ColorMap, diverging, text_on};
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 380.0;

// ---------------------------------------------------------------------------
// Chart section (central panel, below the table)
// ---------------------------------------------------------------------------

/// Render the selected chart's panels.
pub fn chart_section(ui: &mut Ui, state: &AppState) {
    ui.heading(state.chart.header());

    for (i, panel) in state.panels.iter().enumerate() {
        match panel {
            ChartPanel::Fallback(msg) => {
                ui.label(msg);
            }
            ChartPanel::Chart(chart) => {
                ui.label(RichText::new(&chart.title).strong());
                draw_chart(ui, plot_id(state.chart, i), chart, &state.team_colors);
            }
        }
        ui.add_space(8.0);
    }
}

/// Per kind and panel, so zoom and bounds never leak between chart kinds.
fn plot_id(kind: ChartKind, panel: usize) -> egui::Id {
    egui::Id::new(("chart", kind, panel))
}

fn draw_chart(ui: &mut Ui, id: egui::Id, chart: &Chart, colors: &ColorMap) {
    let plot = Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone());

    match &chart.body {
        ChartBody::Heatmap(h) => heatmap(ui, plot, h),
        ChartBody::BoxPlot(groups) => box_plot(ui, plot, groups, colors),
        ChartBody::HorizontalBars(bars) => horizontal_bars(ui, plot, bars),
        ChartBody::Scatter(points) => {
            plot.show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .radius(3.0)
                        .color(Color32::LIGHT_BLUE)
                        .name(&chart.title),
                );
            });
        }
        ChartBody::Line(points) => {
            plot.show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(Color32::LIGHT_BLUE)
                        .width(2.0)
                        .name(&chart.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .radius(3.0)
                        .color(Color32::LIGHT_BLUE),
                );
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Categorical axes
// ---------------------------------------------------------------------------

/// Axis labels for integer positions `0..labels.len()`; `reversed` counts from the top.
fn category_axis(
    labels: Vec<String>,
    reversed: bool,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let v = mark.value.round();
        if (mark.value - v).abs() > 1e-6 || v < 0.0 || v as usize >= labels.len() {
            return String::new();
        }
        let i = if reversed {
            labels.len() - 1 - v as usize
        } else {
            v as usize
        };
        labels[i].clone()
    }
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

fn heatmap(ui: &mut Ui, plot: Plot, h: &Heatmap) {
    let n = h.labels.len();
    let (lo, hi) = h.range;

    plot.data_aspect(1.0)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(category_axis(h.labels.clone(), false))
        .y_axis_formatter(category_axis(h.labels.clone(), true))
        .show(ui, |plot_ui| {
            for (i, row) in h.cells.iter().enumerate() {
                let y = (n - 1 - i) as f64;
                for (j, cell) in row.iter().enumerate() {
                    let Some(v) = cell else { continue };
                    let x = j as f64;
                    let fill = diverging(*v, lo, hi);
                    let square = PlotPoints::from(vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ]);
                    plot_ui.polygon(
                        Polygon::new(square)
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, Color32::DARK_GRAY))
                            .name(format!("{} / {}", h.labels[i], h.labels[j])),
                    );
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{v:.2}")).color(text_on(fill)).size(11.0),
                    ));
                }
            }
        });

    color_bar(ui, lo, hi);
}

/// Horizontal legend strip for the fixed correlation scale.
fn color_bar(ui: &mut Ui, lo: f64, hi: f64) {
    const STEPS: usize = 40;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{lo:.0}"));
        let (rect, _) = ui.allocate_exact_size(egui::vec2(240.0, 12.0), egui::Sense::hover());
        let w = rect.width() / STEPS as f32;
        for s in 0..STEPS {
            let v = lo + (hi - lo) * (s as f64 + 0.5) / STEPS as f64;
            let x0 = rect.left() + w * s as f32;
            let r = egui::Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + w + 0.5, rect.bottom()),
            );
            ui.painter().rect_filled(r, 0.0, diverging(v, lo, hi));
        }
        ui.label(format!("{hi:.0}"));
    });
}

// ---------------------------------------------------------------------------
// Box plots
// ---------------------------------------------------------------------------

fn box_plot(ui: &mut Ui, plot: Plot, groups: &[BoxGroup], colors: &ColorMap) {
    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();

    plot.x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(category_axis(labels, false))
        .show(ui, |plot_ui| {
            let mut boxes = Vec::with_capacity(groups.len());
            for (k, g) in groups.iter().enumerate() {
                let color = colors.color_for(&g.label);
                let s = &g.stats;
                boxes.push(
                    BoxElem::new(
                        k as f64,
                        BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
                    )
                    .name(&g.label)
                    .box_width(0.6)
                    .fill(color.linear_multiply(0.4))
                    .stroke(Stroke::new(1.5, color)),
                );
                if !s.outliers.is_empty() {
                    let pts: Vec<[f64; 2]> = s.outliers.iter().map(|&v| [k as f64, v]).collect();
                    plot_ui.points(Points::new(pts).radius(2.5).color(color));
                }
            }
            plot_ui.box_plot(BoxPlot::new(boxes));
        });
}

// ---------------------------------------------------------------------------
// Horizontal bars
// ---------------------------------------------------------------------------

fn horizontal_bars(ui: &mut Ui, plot: Plot, bars: &[(String, f64)]) {
    let labels: Vec<String> = bars.iter().map(|(l, _)| l.clone()).collect();

    plot.y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_formatter(category_axis(labels, true))
        .y_axis_min_width(120.0)
        .show(ui, |plot_ui| {
            let n = bars.len();
            let items: Vec<Bar> = bars
                .iter()
                .enumerate()
                .map(|(i, (player, pts))| {
                    Bar::new((n - 1 - i) as f64, *pts)
                        .name(player)
                        .width(0.7)
                })
                .collect();
            plot_ui.bar_chart(
                BarChart::new(items)
                    .horizontal()
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_ids_differ_per_kind_and_panel() {
        let ids: std::collections::HashSet<egui::Id> = ChartKind::ALL
            .into_iter()
            .flat_map(|k| (0..3).map(move |i| plot_id(k, i)))
            .collect();
        assert_eq!(ids.len(), ChartKind::ALL.len() * 3);
        assert_eq!(
            plot_id(ChartKind::BoxPlotByTeam, 1),
            plot_id(ChartKind::BoxPlotByTeam, 1)
        );
    }
}
