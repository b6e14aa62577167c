//! Chart selection.
//!
//! Each [`ChartKind`] turns the visible table into one or more
//! [`ChartPanel`]s: either a drawable chart description or a plain-text
//! fallback naming the missing column(s). Nothing here touches egui; the
//! drawing lives in `ui::plot`.

pub mod boxplot;
pub mod heatmap;
pub mod ranking;
pub mod stats;
pub mod trends;

use crate::data::model::PlayerStatsTable;
use stats::BoxStats;

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartKind {
    #[default]
    IntercorrelationHeatmap,
    BoxPlotByTeam,
    TopPlayersByPoints,
    PointsVsAssists,
    AveragePointsByAge,
    PointsByTeam,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::IntercorrelationHeatmap,
        ChartKind::BoxPlotByTeam,
        ChartKind::TopPlayersByPoints,
        ChartKind::PointsVsAssists,
        ChartKind::AveragePointsByAge,
        ChartKind::PointsByTeam,
    ];

    /// Label in the chart selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartKind::IntercorrelationHeatmap => "Intercorrelation Heatmap",
            ChartKind::BoxPlotByTeam => "Box Plot by Team",
            ChartKind::TopPlayersByPoints => "Top 10 Players by Points",
            ChartKind::PointsVsAssists => "Points vs. Assists",
            ChartKind::AveragePointsByAge => "Average Points by Age",
            ChartKind::PointsByTeam => "Points by Team",
        }
    }

    /// Section header shown above the chart.
    pub fn header(self) -> &'static str {
        match self {
            ChartKind::IntercorrelationHeatmap => "Intercorrelation Matrix Heatmap",
            ChartKind::BoxPlotByTeam => "Box Plot by Team",
            ChartKind::TopPlayersByPoints => "Top 10 Players by Points Scored",
            ChartKind::PointsVsAssists => "Points vs. Assists",
            ChartKind::AveragePointsByAge => "Average Points Scored by Age",
            ChartKind::PointsByTeam => "Points Scored by Team",
        }
    }

    /// Build the panels for this kind. Never fails: missing inputs become fallbacks.
    pub fn render(self, table: &PlayerStatsTable) -> Vec<ChartPanel> {
        match self {
            ChartKind::IntercorrelationHeatmap => vec![heatmap::render(table)],
            ChartKind::BoxPlotByTeam => boxplot::render_metrics(table),
            ChartKind::TopPlayersByPoints => vec![ranking::render_top_points(table)],
            ChartKind::PointsVsAssists => vec![trends::render_points_vs_assists(table)],
            ChartKind::AveragePointsByAge => vec![trends::render_points_by_age(table)],
            ChartKind::PointsByTeam => vec![boxplot::render_points_by_team(table)],
        }
    }
}

// ---------------------------------------------------------------------------
// Rendered output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ChartPanel {
    Chart(Chart),
    /// Shown in place of a chart whose inputs are missing.
    Fallback(String),
}

impl ChartPanel {
    pub fn fallback_text(&self) -> Option<&str> {
        match self {
            ChartPanel::Fallback(msg) => Some(msg),
            ChartPanel::Chart(_) => None,
        }
    }

    pub fn chart(&self) -> Option<&Chart> {
        match self {
            ChartPanel::Chart(c) => Some(c),
            ChartPanel::Fallback(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Heatmap(Heatmap),
    /// One box per category, in first-seen order.
    BoxPlot(Vec<BoxGroup>),
    /// `(label, value)` pairs, drawn top to bottom.
    HorizontalBars(Vec<(String, f64)>),
    Scatter(Vec<[f64; 2]>),
    Line(Vec<[f64; 2]>),
}

/// Lower-triangle correlation matrix; `None` cells are masked or undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
    /// Fixed color scale bounds.
    pub range: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: String,
    pub stats: BoxStats,
}

/// Shared fallback wording for a chart that needs two columns.
pub(crate) fn missing_pair(a: &str, b: &str, plural: bool) -> ChartPanel {
    let noun = if plural { "columns are" } else { "column is" };
    ChartPanel::Fallback(format!("The '{a}' or '{b}' {noun} missing in the dataset."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_falls_back_on_a_bare_table() {
        let t = PlayerStatsTable::from_text_rows(&["player"], &[vec!["A"]]);
        for kind in ChartKind::ALL {
            let panels = kind.render(&t);
            assert!(!panels.is_empty(), "{kind:?}");
            assert!(
                panels.iter().all(|p| p.fallback_text().is_some()),
                "{kind:?} should fall back"
            );
        }
    }

    #[test]
    fn fallback_texts_name_the_columns() {
        let t = PlayerStatsTable::from_text_rows(&["player"], &[vec!["A"]]);
        let text = |k: ChartKind| {
            k.render(&t)
                .into_iter()
                .filter_map(|p| p.fallback_text().map(String::from))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            text(ChartKind::IntercorrelationHeatmap),
            ["No numeric data available for correlation."]
        );
        assert_eq!(
            text(ChartKind::BoxPlotByTeam),
            [
                "Metric 'pts' is not available in the dataset.",
                "Metric 'reb' is not available in the dataset.",
                "Metric 'ast' is not available in the dataset.",
            ]
        );
        assert_eq!(
            text(ChartKind::TopPlayersByPoints),
            ["The 'pts' or 'player' column is missing in the dataset."]
        );
        assert_eq!(
            text(ChartKind::PointsVsAssists),
            ["The 'pts' or 'ast' columns are missing in the dataset."]
        );
        assert_eq!(
            text(ChartKind::AveragePointsByAge),
            ["The 'age' or 'pts' columns are missing in the dataset."]
        );
        assert_eq!(
            text(ChartKind::PointsByTeam),
            ["The 'pts' or 'team' columns are missing in the dataset."]
        );
    }

    #[test]
    fn empty_table_never_panics() {
        let t = PlayerStatsTable::from_text_rows(
            &["player", "team", "pos", "age", "pts", "reb", "ast"],
            &[],
        );
        for kind in ChartKind::ALL {
            let _ = kind.render(&t);
        }
    }
}
