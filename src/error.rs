use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the ball detector for frames that violate its input contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectorError {
    #[error("frame has zero size ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("frame buffer holds {got} bytes, expected {expected} for a 3-channel image")]
    BufferSizeMismatch { expected: usize, got: usize },
    #[error("frame is {got:?} but the background model was built for {expected:?}")]
    FrameSizeChanged {
        expected: (u32, u32),
        got: (u32, u32),
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
