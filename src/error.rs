use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(
        "no vertical step in {first_step}..={last_step} fits {cells_y} cells within the height bounds"
    )]
    StepSearchExhausted {
        cells_y: i64,
        first_step: i64,
        last_step: i64,
    },

    #[error("unsupported line mode `{0}`")]
    UnsupportedLineMode(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("backend error: {0}")]
    Backend(String),
}
