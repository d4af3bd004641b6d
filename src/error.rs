use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("dataset is empty; scale domain is undefined")]
    EmptyDataset,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("draw already in progress; re-entrant draw requests are rejected")]
    Busy,
}
