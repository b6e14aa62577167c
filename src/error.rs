use thiserror::Error;

/// Why a season (or an imported file) could not be turned into a table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not set up the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("no <table> element found in the page")]
    NoTable,

    #[error("the first table has no rows")]
    EmptyTable,

    #[error("import failed: {0:#}")]
    Import(#[from] anyhow::Error),
}

/// Why the visible table could not be written out.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
