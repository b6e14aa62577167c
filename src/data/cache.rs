use std::sync::Arc;

use log::debug;
use lru::LruCache;

use super::model::PlayerStatsTable;
use crate::config::CachePolicy;

/// Cleaned season tables keyed by season-end year.
///
/// Owned by the session; entries are shared out as `Arc`s so callers can
/// take working copies without touching the cached original.
pub struct SeasonCache {
    entries: LruCache<u16, Arc<PlayerStatsTable>>,
}

impl SeasonCache {
    pub fn new(policy: CachePolicy) -> Self {
        let entries = match policy {
            CachePolicy::Unbounded => LruCache::unbounded(),
            CachePolicy::Lru(cap) => LruCache::new(cap),
        };
        Self { entries }
    }

    /// Look up a year, marking it most recently used.
    pub fn get(&mut self, year: u16) -> Option<Arc<PlayerStatsTable>> {
        let hit = self.entries.get(&year).cloned();
        if hit.is_some() {
            debug!("season cache hit for {year}");
        }
        hit
    }

    pub fn insert(&mut self, year: u16, table: Arc<PlayerStatsTable>) {
        if let Some((evicted, _)) = self.entries.push(year, table) {
            if evicted != year {
                debug!("season cache evicted {evicted}");
            }
        }
    }

    pub fn contains(&self, year: u16) -> bool {
        self.entries.contains(&year)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn table() -> Arc<PlayerStatsTable> {
        Arc::new(PlayerStatsTable::default())
    }

    #[test]
    fn unbounded_keeps_everything() {
        let mut cache = SeasonCache::new(CachePolicy::Unbounded);
        for year in 1990..2020 {
            cache.insert(year, table());
        }
        assert_eq!(cache.len(), 30);
        assert!(cache.get(1990).is_some());
    }

    #[test]
    fn lru_evicts_least_recently_used() {
        let mut cache = SeasonCache::new(CachePolicy::Lru(NonZeroUsize::new(2).unwrap()));
        cache.insert(2021, table());
        cache.insert(2022, table());
        assert!(cache.get(2021).is_some());
        cache.insert(2023, table());
        assert!(cache.contains(2021));
        assert!(!cache.contains(2022));
        assert!(cache.contains(2023));
    }
}
