use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Fixed vocabulary
// ---------------------------------------------------------------------------

/// Positions always offered by the position filter.
pub const POSITIONS: [&str; 5] = ["C", "PF", "SF", "PG", "SG"];

/// Metrics drawn by the "Box Plot by Team" chart.
pub const BOX_PLOT_METRICS: [&str; 3] = ["pts", "reb", "ast"];

pub const SEASON_URL_TEMPLATE: &str =
    "https://www.basketball-reference.com/leagues/NBA_{year}_per_game.html";

pub const FIRST_SEASON: u16 = 1950;
pub const LAST_SEASON: u16 = 2023;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("hoops-explorer/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Cache policy
// ---------------------------------------------------------------------------

/// How many loaded seasons the session keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep every season for the life of the session.
    #[default]
    Unbounded,
    /// Keep at most N seasons, evicting the least recently used.
    Lru(NonZeroUsize),
}

// ---------------------------------------------------------------------------
// Explorer configuration
// ---------------------------------------------------------------------------

/// Compile-time defaults for one explorer session.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Season page URL; `{year}` is replaced with the season-end year.
    pub url_template: String,
    pub seasons: RangeInclusive<u16>,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub cache: CachePolicy,
    /// File name offered by the CSV download button.
    pub download_name: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            url_template: SEASON_URL_TEMPLATE.to_string(),
            seasons: FIRST_SEASON..=LAST_SEASON,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            cache: CachePolicy::Unbounded,
            download_name: "playerstats.csv".to_string(),
        }
    }
}

impl ExplorerConfig {
    pub fn season_url(&self, year: u16) -> String {
        self.url_template.replace("{year}", &year.to_string())
    }

    /// Selectable seasons, newest first.
    pub fn seasons_desc(&self) -> impl Iterator<Item = u16> {
        self.seasons.clone().rev()
    }

    pub fn latest_season(&self) -> u16 {
        *self.seasons.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_url_fills_year() {
        let cfg = ExplorerConfig::default();
        assert_eq!(
            cfg.season_url(2023),
            "https://www.basketball-reference.com/leagues/NBA_2023_per_game.html"
        );
    }

    #[test]
    fn seasons_run_newest_first() {
        let cfg = ExplorerConfig::default();
        let years: Vec<u16> = cfg.seasons_desc().collect();
        assert_eq!(years.first(), Some(&2023));
        assert_eq!(years.last(), Some(&1950));
        assert_eq!(years.len(), 74);
    }
}
