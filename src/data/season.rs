use std::sync::Arc;

use log::info;

use super::cache::SeasonCache;
use super::clean::clean;
use super::fetch::PageFetcher;
use super::html::first_table;
use super::model::{PlayerStatsTable, RawTable};
use crate::config::ExplorerConfig;
use crate::error::LoadError;

/// Fetches, extracts, cleans and memoizes season tables.
pub struct SeasonLoader {
    fetcher: Box<dyn PageFetcher>,
    cache: SeasonCache,
    config: ExplorerConfig,
}

impl SeasonLoader {
    pub fn new(config: &ExplorerConfig, fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            cache: SeasonCache::new(config.cache),
            config: config.clone(),
        }
    }

    /// Scrape the season page without cleaning or caching it.
    pub fn fetch_raw(&self, year: u16) -> Result<RawTable, LoadError> {
        let url = self.config.season_url(year);
        info!("fetching season {year} from {url}");
        let body = self.fetcher.fetch(&url)?;
        first_table(&body)
    }

    /// Cleaned table for `year`; the page is fetched at most once per cached year.
    pub fn load(&mut self, year: u16) -> Result<Arc<PlayerStatsTable>, LoadError> {
        if let Some(table) = self.cache.get(year) {
            return Ok(table);
        }
        let table = Arc::new(clean(self.fetch_raw(year)?));
        info!(
            "season {year}: {} rows, {} columns",
            table.len(),
            table.columns.len()
        );
        self.cache.insert(year, Arc::clone(&table));
        Ok(table)
    }

    pub fn cache(&self) -> &SeasonCache {
        &self.cache
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Serves a canned page and records every requested URL.
    pub(crate) struct FakeFetcher {
        pub body: String,
        pub calls: Rc<RefCell<Vec<String>>>,
    }

    impl PageFetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<String, LoadError> {
            self.calls.borrow_mut().push(url.to_string());
            if url.contains("1900") {
                return Err(LoadError::Status {
                    url: url.to_string(),
                    status: 404,
                });
            }
            Ok(self.body.clone())
        }
    }

    pub(crate) const PAGE: &str = "<table>\
        <tr><th>Rk</th><th>Player</th><th>Age</th><th>Team</th><th>Pos</th><th>PTS</th></tr>\
        <tr><td>1</td><td>A</td><td>25</td><td>BOS</td><td>PG</td><td>30.1</td></tr>\
        <tr><td>Rk</td><td>Player</td><td>Age</td><td>Team</td><td>Pos</td><td>PTS</td></tr>\
        <tr><td>2</td><td>B</td><td>31</td><td>LAL</td><td>SF</td><td>10.4</td></tr>\
        </table>";

    pub(crate) fn loader() -> (SeasonLoader, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let fetcher = FakeFetcher {
            body: PAGE.to_string(),
            calls: Rc::clone(&calls),
        };
        (
            SeasonLoader::new(&ExplorerConfig::default(), Box::new(fetcher)),
            calls,
        )
    }

    #[test]
    fn load_cleans_and_memoizes() {
        let (mut loader, calls) = loader();
        let first = loader.load(2023).unwrap();
        let second = loader.load(2023).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.borrow().len(), 1);
        assert!(calls.borrow()[0].ends_with("NBA_2023_per_game.html"));
        assert_eq!(first.shape(), (2, 5));
        assert!(!first.has_column("rk"));

        loader.load(2022).unwrap();
        assert_eq!(calls.borrow().len(), 2);
        assert_eq!(loader.cache().len(), 2);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let (mut loader, calls) = loader();
        assert!(matches!(
            loader.load(1900),
            Err(LoadError::Status { status: 404, .. })
        ));
        assert!(loader.load(1900).is_err());
        assert_eq!(calls.borrow().len(), 2);
        assert!(loader.cache().is_empty());
    }
}
