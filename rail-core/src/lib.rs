pub mod models;
pub mod query;
pub mod page;
pub mod repository;

pub use models::{Reservation, RouteQuery, Scheduled, TrainListing, TrainSelection};
pub use page::Page;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Index {index} is out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Storage I/O failed: {0}")]
    Io(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
