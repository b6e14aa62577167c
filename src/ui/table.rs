use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::ExportFormat;
use crate::data::model::{CellValue, PlayerStatsTable};
use crate::state::AppState;
use crate::ui::panels::save_file_dialog;

const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Header, dimension line, the visible rows and the CSV download button.
pub fn stats_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Display Player Stats of Selected Team(s)");

    let (rows, cols) = state.summary();
    ui.label(format!("Data Dimension: {rows} rows and {cols} columns."));

    egui::ScrollArea::horizontal()
        .id_salt("stats_table_hscroll")
        .show(ui, |ui: &mut Ui| {
            stats_table(ui, &state.visible);
        });

    if ui.button("Download CSV File").clicked() {
        save_file_dialog(state, ExportFormat::Csv);
    }
}

fn stats_table(ui: &mut Ui, table: &PlayerStatsTable) {
    if table.columns.is_empty() {
        return;
    }
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(MAX_TABLE_HEIGHT)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(36.0).clip(true), table.columns.len())
        .header(22.0, |mut header| {
            for col in &table.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(&col.name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, table.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(format_cell(cell));
                    });
                }
            });
        });
}

/// Table display text; floats are cut to three decimals.
fn format_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Float(v) => {
            let s = format!("{v:.3}");
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_are_trimmed_for_display() {
        assert_eq!(format_cell(&CellValue::Float(0.51234)), "0.512");
        assert_eq!(format_cell(&CellValue::Float(27.0)), "27");
        assert_eq!(format_cell(&CellValue::Integer(7)), "7");
    }
}
