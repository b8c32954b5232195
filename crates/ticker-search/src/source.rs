use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::dataset::TickerRecord;
use crate::error::SearchError;

const BUNDLED_TICKERS: &str = include_str!("../data/tickers.json");

/// Where the ticker universe comes from.
#[async_trait]
pub trait TickerSource: Send + Sync {
    async fn load(&self) -> Result<Vec<TickerRecord>, SearchError>;

    /// Short human-readable origin, used in logs
    fn describe(&self) -> String;
}

/// A JSON array of ticker records read from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TickerSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<TickerRecord>, SearchError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SearchError::Io {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// The dataset compiled into this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

#[async_trait]
impl TickerSource for BundledSource {
    async fn load(&self) -> Result<Vec<TickerRecord>, SearchError> {
        Ok(serde_json::from_str(BUNDLED_TICKERS)?)
    }

    fn describe(&self) -> String {
        "bundled".to_string()
    }
}
