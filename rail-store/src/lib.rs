pub mod app_config;
pub mod error;
pub mod record_store;
pub mod train_repo;
pub mod reservation_repo;

pub use error::{StoreError, StoreResult};
pub use record_store::{Record, RecordStore};
pub use train_repo::CsvTrainRepository;
pub use reservation_repo::CsvReservationRepository;
