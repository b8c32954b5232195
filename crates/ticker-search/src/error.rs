use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Failed to read ticker dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ticker dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Ticker dataset is empty")]
    EmptyDataset,
}
