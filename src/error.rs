use thiserror::Error;

pub type SpiralResult<T> = Result<T, SpiralError>;

#[derive(Debug, Error)]
pub enum SpiralError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unparsable date column `{raw}`")]
    InvalidDate { raw: String },

    #[error("no usable days remain after filtering")]
    EmptyDataset,

    #[error("failed to load {source_name}: {message}")]
    SourceLoad {
        source_name: String,
        message: String,
    },
}
