use std::collections::BTreeMap;

use super::stats::mean;
use super::{Chart, ChartBody, ChartPanel, missing_pair};
use crate::data::model::{CellValue, PlayerStatsTable};

/// `[x, y]` pairs for rows where both columns are numeric.
fn paired(table: &PlayerStatsTable, x: &str, y: &str) -> Option<Vec<[f64; 2]>> {
    let xs = table.column_values(x)?;
    let ys = table.column_values(y)?;
    Some(
        xs.zip(ys)
            .filter_map(|(a, b)| Some([a.to_numeric().as_f64()?, b.to_numeric().as_f64()?]))
            .collect(),
    )
}

pub fn render_points_vs_assists(table: &PlayerStatsTable) -> ChartPanel {
    let Some(points) = paired(table, "pts", "ast") else {
        return missing_pair("pts", "ast", true);
    };
    ChartPanel::Chart(Chart {
        title: "Points vs. Assists".to_string(),
        x_label: "Points".to_string(),
        y_label: "Assists".to_string(),
        body: ChartBody::Scatter(points),
    })
}

/// Mean points per age, ages ascending.
pub fn average_points_by_age(table: &PlayerStatsTable) -> Option<Vec<[f64; 2]>> {
    let ages = table.column_values("age")?;
    let points = table.column_values("pts")?;

    let mut by_age: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    for (age, pts) in ages.zip(points) {
        let age = age.to_numeric();
        let Some(p) = pts.to_numeric().as_f64() else {
            continue;
        };
        if !age.is_missing() {
            by_age.entry(age).or_default().push(p);
        }
    }

    let mut out: Vec<[f64; 2]> = by_age
        .iter()
        .filter_map(|(age, pts)| Some([age.as_f64()?, mean(pts)?]))
        .collect();
    // Integer and float ages sort as separate groups in the map.
    out.sort_by(|a, b| a[0].total_cmp(&b[0]));
    Some(out)
}

pub fn render_points_by_age(table: &PlayerStatsTable) -> ChartPanel {
    let Some(points) = average_points_by_age(table) else {
        return missing_pair("age", "pts", true);
    };
    ChartPanel::Chart(Chart {
        title: "Average Points Scored by Age".to_string(),
        x_label: "Age".to_string(),
        y_label: "Average Points".to_string(),
        body: ChartBody::Line(points),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PlayerStatsTable {
        PlayerStatsTable::from_text_rows(
            &["player", "age", "pts", "ast"],
            &[
                vec!["A", "30", "20", "4"],
                vec!["B", "22", "10", "1"],
                vec!["C", "30", "30", "8"],
                vec!["D", "25", "15", "3"],
            ],
        )
    }

    #[test]
    fn averages_are_grouped_and_ordered_by_age() {
        let line = average_points_by_age(&sample()).unwrap();
        assert_eq!(line, vec![[22.0, 10.0], [25.0, 15.0], [30.0, 25.0]]);
    }

    #[test]
    fn scatter_pairs_every_row() {
        let panel = render_points_vs_assists(&sample());
        let Some(Chart {
            body: ChartBody::Scatter(points),
            ..
        }) = panel.chart()
        else {
            panic!("expected scatter");
        };
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], [20.0, 4.0]);
    }

    #[test]
    fn missing_columns_fall_back() {
        let t = PlayerStatsTable::from_text_rows(&["player", "pts"], &[vec!["A", "1"]]);
        assert_eq!(
            render_points_vs_assists(&t).fallback_text(),
            Some("The 'pts' or 'ast' columns are missing in the dataset.")
        );
        assert_eq!(
            render_points_by_age(&t).fallback_text(),
            Some("The 'age' or 'pts' columns are missing in the dataset.")
        );
    }
}
