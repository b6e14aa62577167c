/// Data layer: core types, loading, cleaning, filtering and export.
///
/// Architecture:
/// ```text
///   season page (HTTP)          .csv / .json / .parquet
///        │                              │
///        ▼                              ▼
///   ┌─────────┐  ┌──────┐          ┌──────────┐
///   │  fetch   │→│ html │          │  loader   │
///   └─────────┘  └──────┘          └──────────┘
///        │  RawTable                    │  RawTable
///        ▼                              ▼
///   ┌────────────────────────────────────────┐
///   │ clean   drop header rows / Rk, types    │
///   └────────────────────────────────────────┘
///        │  PlayerStatsTable (cached per year by `season`)
///        ▼
///   ┌──────────┐
///   │  filter   │  team / position selection → visible table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  CSV / JSON / Parquet bytes
///   └──────────┘
/// ```

pub mod cache;
pub mod clean;
pub mod export;
pub mod fetch;
pub mod filter;
pub mod html;
pub mod loader;
pub mod model;
pub mod season;
