use super::stats::correlation_matrix;
use super::{Chart, ChartBody, ChartPanel, Heatmap};
use crate::data::model::PlayerStatsTable;

pub const NO_NUMERIC_DATA: &str = "No numeric data available for correlation.";

/// Correlation of every numeric column against every other, upper triangle
/// and diagonal masked.
pub fn render(table: &PlayerStatsTable) -> ChartPanel {
    let labels: Vec<String> = table.numeric_columns().into_iter().map(String::from).collect();
    if labels.is_empty() || table.is_empty() {
        return ChartPanel::Fallback(NO_NUMERIC_DATA.to_string());
    }

    let series: Vec<Vec<f64>> = labels
        .iter()
        .map(|name| {
            table
                .numeric_values(name)
                .unwrap_or_default()
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect()
        })
        .collect();

    let mut cells = correlation_matrix(&series);
    for (i, row) in cells.iter_mut().enumerate() {
        for cell in row.iter_mut().skip(i) {
            *cell = None;
        }
    }

    ChartPanel::Chart(Chart {
        title: "Correlation Heatmap of Numeric Metrics".to_string(),
        x_label: String::new(),
        y_label: String::new(),
        body: ChartBody::Heatmap(Heatmap {
            labels,
            cells,
            range: (-1.0, 1.0),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_upper_triangle_and_diagonal() {
        let t = PlayerStatsTable::from_text_rows(
            &["player", "pts", "ast", "age"],
            &[
                vec!["A", "10", "2", "30"],
                vec!["B", "20", "4", "25"],
                vec!["C", "30", "6", "20"],
            ],
        );
        let panel = render(&t);
        let Some(Chart {
            body: ChartBody::Heatmap(h),
            ..
        }) = panel.chart()
        else {
            panic!("expected a heatmap, got {panel:?}");
        };
        assert_eq!(h.labels, ["pts", "ast", "age"]);
        assert_eq!(h.range, (-1.0, 1.0));
        for i in 0..3 {
            for j in i..3 {
                assert_eq!(h.cells[i][j], None);
            }
        }
        assert!((h.cells[1][0].unwrap() - 1.0).abs() < 1e-12);
        assert!((h.cells[2][0].unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn text_only_table_falls_back() {
        let t = PlayerStatsTable::from_text_rows(&["player", "team"], &[vec!["A", "BOS"]]);
        assert_eq!(render(&t).fallback_text(), Some(NO_NUMERIC_DATA));
    }
}
