use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvoBenchError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Dataset Error: {0}")]
    Dataset(String),

    #[error("Search Error: {0}")]
    Search(String),
}

pub type EbResult<T> = Result<T, EvoBenchError>;
