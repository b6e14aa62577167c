use std::path::Path;
use std::sync::Arc;

use crate::charts::{ChartKind, ChartPanel};
use crate::color::ColorMap;
use crate::config::ExplorerConfig;
use crate::data::export::{self, ExportFormat};
use crate::data::fetch::{HttpFetcher, PageFetcher};
use crate::data::filter::{FilterSelection, filter, position_options, team_options};
use crate::data::loader;
use crate::data::model::PlayerStatsTable;
use crate::data::season::SeasonLoader;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the current table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Season(u16),
    File(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    loader: SeasonLoader,

    /// Season picked in the year selector.
    pub year: u16,

    /// Origin of `table` (None until something loaded).
    pub source: Option<DataSource>,

    /// Cleaned table as loaded; shared with the season cache.
    pub table: Option<Arc<PlayerStatsTable>>,

    /// Values offered by the team and position selectors.
    pub team_options: Vec<String>,
    pub position_options: Vec<String>,

    pub filters: FilterSelection,

    /// Rows passing the current filters (cached).
    pub visible: PlayerStatsTable,

    pub chart: ChartKind,

    /// Panels for `chart` over `visible` (cached).
    pub panels: Vec<ChartPanel>,

    /// Per-team colours for the box plots.
    pub team_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig, fetcher: Box<dyn PageFetcher>) -> Self {
        let loader = SeasonLoader::new(&config, fetcher);
        let year = config.latest_season();
        let mut state = Self {
            config,
            loader,
            year,
            source: None,
            table: None,
            team_options: Vec::new(),
            position_options: Vec::new(),
            filters: FilterSelection::default(),
            visible: PlayerStatsTable::default(),
            chart: ChartKind::default(),
            panels: Vec::new(),
            team_colors: ColorMap::default(),
            status_message: None,
        };
        state.rebuild_panels();
        state
    }

    /// State backed by the real season site.
    pub fn with_http(config: ExplorerConfig) -> Result<Self, LoadError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(config, Box::new(fetcher)))
    }

    /// Load (or recall) a season and make it the current table.
    /// On failure the previous table and year stay in place and the error is shown.
    pub fn select_year(&mut self, year: u16) {
        match self.loader.load(year) {
            Ok(table) => {
                self.year = year;
                self.source = Some(DataSource::Season(year));
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load season {year}: {e}");
                self.status_message = Some(format!("Could not load the {year} season: {e}"));
            }
        }
    }

    /// Load a previously exported table from disk.
    pub fn import_file(&mut self, path: &Path) {
        match loader::load_file(path).map_err(LoadError::from) {
            Ok(table) => {
                log::info!(
                    "Imported {} rows with columns {:?}",
                    table.len(),
                    table.column_names().collect::<Vec<_>>()
                );
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.source = Some(DataSource::File(name));
                self.set_table(Arc::new(table));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded table, select everything and rebuild views.
    pub fn set_table(&mut self, table: Arc<PlayerStatsTable>) {
        self.team_options = team_options(&table);
        self.position_options = position_options(&table);
        self.filters = FilterSelection::all_for(&table);
        self.team_colors = ColorMap::new(self.team_options.iter().map(String::as_str));
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible` after a filter change.
    pub fn refilter(&mut self) {
        self.visible = match &self.table {
            Some(t) => filter(t, &self.filters),
            None => PlayerStatsTable::default(),
        };
        self.rebuild_panels();
    }

    pub fn set_chart(&mut self, kind: ChartKind) {
        if self.chart != kind {
            self.chart = kind;
            self.rebuild_panels();
        }
    }

    fn rebuild_panels(&mut self) {
        self.panels = self.chart.render(&self.visible);
    }

    /// `(rows, columns)` of the visible table.
    pub fn summary(&self) -> (usize, usize) {
        self.visible.shape()
    }

    // -- filter edits --

    pub fn toggle_team(&mut self, team: &str) {
        toggle(&mut self.filters.teams, team);
        self.refilter();
    }

    pub fn toggle_position(&mut self, pos: &str) {
        toggle(&mut self.filters.positions, pos);
        self.refilter();
    }

    pub fn select_all_teams(&mut self) {
        self.filters.teams = self.team_options.iter().cloned().collect();
        self.refilter();
    }

    pub fn select_no_teams(&mut self) {
        self.filters.teams.clear();
        self.refilter();
    }

    pub fn select_all_positions(&mut self) {
        self.filters.positions = self.position_options.iter().cloned().collect();
        self.refilter();
    }

    pub fn select_no_positions(&mut self) {
        self.filters.positions.clear();
        self.refilter();
    }

    // -- export --

    /// Write the visible table; the outcome lands in the status line.
    pub fn export_visible(&mut self, format: ExportFormat, path: &Path) {
        match export::save(&self.visible, format, path) {
            Ok(()) => {
                self.status_message = Some(format!(
                    "Saved {} rows to {}",
                    self.visible.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Export failed: {e}"));
            }
        }
    }

    pub fn seasons_cached(&self) -> usize {
        self.loader.cache().len()
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::data::season::tests::{FakeFetcher, PAGE};

    fn state() -> (AppState, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let fetcher = FakeFetcher {
            body: PAGE.to_string(),
            calls: Rc::clone(&calls),
        };
        (AppState::new(ExplorerConfig::default(), Box::new(fetcher)), calls)
    }

    #[test]
    fn starts_empty_with_fallback_panel() {
        let (s, _) = state();
        assert!(s.table.is_none());
        assert_eq!(s.summary(), (0, 0));
        assert_eq!(s.panels.len(), 1);
        assert!(s.panels[0].fallback_text().is_some());
    }

    #[test]
    fn selecting_a_year_loads_once() {
        let (mut s, calls) = state();
        s.select_year(2023);
        assert_eq!(s.source, Some(DataSource::Season(2023)));
        assert_eq!(s.summary(), (2, 5));
        s.select_year(2022);
        s.select_year(2023);
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(s.seasons_cached(), 2);
    }

    #[test]
    fn failed_year_keeps_previous_table() {
        let (mut s, calls) = state();
        s.select_year(2023);
        s.select_year(1900);
        assert!(s.status_message.as_deref().unwrap().contains("1900"));
        assert_eq!(s.summary(), (2, 5));
        assert_eq!(s.year, 2023);
        assert_eq!(s.source, Some(DataSource::Season(2023)));

        // the failed year can be picked again and is retried
        s.select_year(1900);
        assert_eq!(calls.borrow().len(), 3);
        assert_eq!(s.year, 2023);
    }

    #[test]
    fn filters_drive_visible_rows_and_panels() {
        let (mut s, _) = state();
        s.select_year(2023);
        s.set_chart(ChartKind::TopPlayersByPoints);
        s.toggle_team("LAL");
        assert_eq!(s.summary(), (1, 5));
        assert_eq!(
            String::from_utf8(export::to_csv(&s.visible).unwrap()).unwrap(),
            "player,age,team,pos,pts\nA,25,BOS,PG,30.1\n"
        );
        s.select_no_positions();
        assert_eq!(s.summary(), (0, 5));
        s.select_all_positions();
        s.select_all_teams();
        assert_eq!(s.summary(), (2, 5));
        assert!(s.panels[0].chart().is_some());
        // the cached season is never narrowed by filtering
        assert_eq!(s.table.as_ref().unwrap().len(), 2);
    }
}
