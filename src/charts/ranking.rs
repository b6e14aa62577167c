use super::{Chart, ChartBody, ChartPanel, missing_pair};
use crate::data::model::PlayerStatsTable;

pub const TOP_N: usize = 10;

/// The `TOP_N` highest scorers, best first.
///
/// Ties keep table order: the sort is stable, so among equal point values the
/// player seen first ranks higher.
pub fn top_by_points(table: &PlayerStatsTable, n: usize) -> Option<Vec<(String, f64)>> {
    let players = table.column_values("player")?;
    let points = table.column_values("pts")?;

    let mut ranked: Vec<(String, f64)> = players
        .zip(points)
        .filter_map(|(player, pts)| pts.to_numeric().as_f64().map(|p| (player.to_string(), p)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    Some(ranked)
}

pub fn render_top_points(table: &PlayerStatsTable) -> ChartPanel {
    let Some(bars) = top_by_points(table, TOP_N) else {
        return missing_pair("pts", "player", false);
    };
    ChartPanel::Chart(Chart {
        title: "Top 10 Players by Points Scored".to_string(),
        x_label: "Points".to_string(),
        y_label: "Player".to_string(),
        body: ChartBody::HorizontalBars(bars),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_rows_come_back_sorted() {
        let t = PlayerStatsTable::from_text_rows(
            &["player", "pts"],
            &[
                vec!["A", "12.5"],
                vec!["B", "30.1"],
                vec!["C", "8"],
                vec!["D", "22"],
                vec!["E", "19.9"],
            ],
        );
        let top = top_by_points(&t, TOP_N).unwrap();
        let names: Vec<&str> = top.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(names, ["B", "D", "E", "A", "C"]);
    }

    #[test]
    fn ties_keep_first_seen_order_and_cut_at_ten() {
        let rows: Vec<Vec<String>> = (0..12)
            .map(|i| vec![format!("P{i}"), if i % 2 == 0 { "20" } else { "10" }.to_string()])
            .collect();
        let rows: Vec<Vec<&str>> = rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect();
        let t = PlayerStatsTable::from_text_rows(&["player", "pts"], &rows);
        let top = top_by_points(&t, TOP_N).unwrap();
        assert_eq!(top.len(), 10);
        let names: Vec<&str> = top.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            names,
            ["P0", "P2", "P4", "P6", "P8", "P10", "P1", "P3", "P5", "P7"]
        );
    }

    #[test]
    fn needs_player_and_points() {
        let t = PlayerStatsTable::from_text_rows(&["pts"], &[vec!["1"]]);
        assert_eq!(
            render_top_points(&t).fallback_text(),
            Some("The 'pts' or 'player' column is missing in the dataset.")
        );
    }
}
