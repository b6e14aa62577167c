use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::charts::ChartKind;
use crate::data::export::ExportFormat;
use crate::state::{AppState, DataSource};

// ---------------------------------------------------------------------------
// Left side panel – user input widgets
// ---------------------------------------------------------------------------

/// What a multi-select wants changed.
enum SelectionEdit {
    All,
    None,
    Toggle(String),
}

/// Render the left input panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    let logo = egui::include_image!("../../assets/logo.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(logo)
                .max_width(ui.available_width() * 0.5)
                .max_height(96.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("User Input Features");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Season ----
            let mut picked = state.year;
            egui::ComboBox::from_label("Year")
                .selected_text(picked.to_string())
                .height(320.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for year in state.config.seasons_desc() {
                        ui.selectable_value(&mut picked, year, year.to_string());
                    }
                });
            if picked != state.year {
                state.select_year(picked);
            }
            ui.separator();

            if state.table.is_none() {
                ui.label("No season loaded.");
                return;
            }

            // ---- Team / position multi-selects ----
            if let Some(edit) = multi_select(ui, "Team", &state.team_options, &state.filters.teams) {
                match edit {
                    SelectionEdit::All => state.select_all_teams(),
                    SelectionEdit::None => state.select_no_teams(),
                    SelectionEdit::Toggle(t) => state.toggle_team(&t),
                }
            }
            if let Some(edit) = multi_select(
                ui,
                "Position",
                &state.position_options,
                &state.filters.positions,
            ) {
                match edit {
                    SelectionEdit::All => state.select_all_positions(),
                    SelectionEdit::None => state.select_no_positions(),
                    SelectionEdit::Toggle(p) => state.toggle_position(&p),
                }
            }

            ui.add_space(8.0);
            ui.heading("Visualizations");
            ui.separator();
            ui.label("Select a visualization:");
            let mut kind = state.chart;
            for k in ChartKind::ALL {
                ui.radio_value(&mut kind, k, k.label());
            }
            state.set_chart(kind);
        });
}

/// Collapsible checkbox list with All / None buttons.
fn multi_select(
    ui: &mut Ui,
    title: &str,
    options: &[String],
    selected: &BTreeSet<String>,
) -> Option<SelectionEdit> {
    let mut edit = None;

    // Show count of selected / total in the header
    let n_selected = options.iter().filter(|o| selected.contains(*o)).count();
    let header_text = format!("{title}  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    edit = Some(SelectionEdit::All);
                }
                if ui.small_button("None").clicked() {
                    edit = Some(SelectionEdit::None);
                }
            });
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for opt in options {
                    let mut checked = selected.contains(opt);
                    if ui.checkbox(&mut checked, opt.as_str()).changed() {
                        edit = Some(SelectionEdit::Toggle(opt.clone()));
                    }
                }
            });
        });

    edit
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.menu_button("Export visible rows", |ui: &mut Ui| {
                for format in ExportFormat::ALL {
                    if ui.button(format.label()).clicked() {
                        save_file_dialog(state, format);
                        ui.close_menu();
                    }
                }
            });
        });

        ui.separator();

        match &state.source {
            Some(DataSource::Season(year)) => {
                ui.label(format!("Season {year}"));
            }
            Some(DataSource::File(name)) => {
                ui.label(format!("File: {name}"));
            }
            None => {}
        }
        if let Some(table) = &state.table {
            ui.label(format!(
                "{} players loaded, {} visible",
                table.len(),
                state.visible.len()
            ));
        }
        ui.label(format!("{} season(s) cached", state.seasons_cached()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open exported player stats")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.import_file(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState, format: ExportFormat) {
    let file_name = match format {
        ExportFormat::Csv => state.config.download_name.clone(),
        other => other.file_name(),
    };
    let file = rfd::FileDialog::new()
        .set_title("Save visible rows")
        .set_file_name(file_name)
        .add_filter(format.label(), &[format.extension()])
        .save_file();

    if let Some(path) = file {
        state.export_visible(format, &path);
    }
}
