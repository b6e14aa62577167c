use log::debug;

use super::stats::BoxStats;
use super::{BoxGroup, Chart, ChartBody, ChartPanel, missing_pair};
use crate::config::BOX_PLOT_METRICS;
use crate::data::filter::TEAM_COLUMN;
use crate::data::model::PlayerStatsTable;

/// One box plot per metric in [`BOX_PLOT_METRICS`]; absent metrics get their own fallback.
pub fn render_metrics(table: &PlayerStatsTable) -> Vec<ChartPanel> {
    let mut working = table.clone();
    BOX_PLOT_METRICS
        .iter()
        .map(|&metric| {
            if !working.coerce_numeric(metric) {
                return ChartPanel::Fallback(format!(
                    "Metric '{metric}' is not available in the dataset."
                ));
            }
            if !working.has_column(TEAM_COLUMN) {
                return ChartPanel::Fallback(format!(
                    "Column '{TEAM_COLUMN}' is not available in the dataset."
                ));
            }
            box_chart(&working, metric, format!("Box Plot of {metric} by Team"), metric)
        })
        .collect()
}

/// Points distribution per team.
pub fn render_points_by_team(table: &PlayerStatsTable) -> ChartPanel {
    if !table.has_column("pts") || !table.has_column(TEAM_COLUMN) {
        return missing_pair("pts", TEAM_COLUMN, true);
    }
    let mut working = table.clone();
    working.coerce_numeric("pts");
    box_chart(&working, "pts", "Points Scored by Team".to_string(), "Points")
}

fn box_chart(table: &PlayerStatsTable, metric: &str, title: String, y_label: &str) -> ChartPanel {
    ChartPanel::Chart(Chart {
        title,
        x_label: "Team".to_string(),
        y_label: y_label.to_string(),
        body: ChartBody::BoxPlot(group_by_team(table, metric)),
    })
}

/// Values of `metric` grouped by team in first-seen order; missing values are skipped.
pub fn group_by_team(table: &PlayerStatsTable, metric: &str) -> Vec<BoxGroup> {
    let (Some(teams), Some(values)) = (
        table.column_values(TEAM_COLUMN),
        table.numeric_values(metric),
    ) else {
        return Vec::new();
    };

    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();
    for (team, value) in teams.zip(values) {
        let team = team.to_string();
        let slot = match groups.iter().position(|(t, _)| *t == team) {
            Some(i) => i,
            None => {
                groups.push((team, Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(v) = value {
            groups[slot].1.push(v);
        }
    }

    let out: Vec<BoxGroup> = groups
        .into_iter()
        .filter_map(|(label, vals)| {
            BoxStats::from_values(&vals).map(|stats| BoxGroup { label, stats })
        })
        .collect();
    debug!("{metric}: {} team boxes", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerStatsTable {
        PlayerStatsTable::from_text_rows(
            &["player", "team", "pts", "ast"],
            &[
                vec!["A", "LAL", "30", "5"],
                vec!["B", "BOS", "10", "2"],
                vec!["C", "LAL", "20", "x"],
                vec!["D", "BOS", "14", "7"],
            ],
        )
    }

    #[test]
    fn groups_follow_first_seen_team_order() {
        let groups = group_by_team(&sample(), "pts");
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["LAL", "BOS"]);
        assert_eq!(groups[0].stats.median, 25.0);
        assert_eq!(groups[1].stats.median, 12.0);
    }

    #[test]
    fn metrics_coerce_and_fall_back_individually() {
        let t = sample();
        let panels = render_metrics(&t);
        assert_eq!(panels.len(), 3);
        assert!(panels[0].chart().is_some());
        assert_eq!(
            panels[1].fallback_text(),
            Some("Metric 'reb' is not available in the dataset.")
        );
        // "x" is coerced to missing, leaving one LAL value.
        let Some(Chart {
            body: ChartBody::BoxPlot(groups),
            title,
            ..
        }) = panels[2].chart()
        else {
            panic!("expected ast box plot");
        };
        assert_eq!(title, "Box Plot of ast by Team");
        assert_eq!(groups[0].stats.median, 5.0);
        // cached input untouched
        assert_eq!(t.columns[3].kind, crate::data::model::ColumnKind::Text);
    }

    #[test]
    fn points_by_team_needs_both_columns() {
        let t = PlayerStatsTable::from_text_rows(&["team"], &[vec!["BOS"]]);
        assert_eq!(
            render_points_by_team(&t).fallback_text(),
            Some("The 'pts' or 'team' columns are missing in the dataset.")
        );
        assert!(render_points_by_team(&sample()).chart().is_some());
    }
}
