use rail_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("table I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Io(err.to_string())
    }
}
