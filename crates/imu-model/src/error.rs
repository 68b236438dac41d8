use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid canonical column id: {0}")]
    InvalidCanonicalId(String),
    #[error("invalid axis token: {0}")]
    InvalidAxis(String),
    #[error("invalid sensor token: {0}")]
    InvalidSensor(String),
    #[error("invalid segment token: {0}")]
    InvalidSegment(String),
    #[error("segment {segment} is midline and cannot carry side {side}")]
    MidlineWithSide { segment: String, side: String },
    #[error("segment {0} is bilateral and requires a side")]
    BilateralWithoutSide(String),
    #[error("duplicate raw column in mapping: {0}")]
    DuplicateRawColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
