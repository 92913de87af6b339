use async_trait::async_trait;

use crate::models::{Reservation, RouteQuery, TrainListing};
use crate::CoreResult;

/// Read access to the trains table.
#[async_trait]
pub trait TrainRepository: Send + Sync {
    /// Every train, ordered by schedule key.
    async fn list_sorted(&self) -> CoreResult<Vec<TrainListing>>;

    /// Trains matching the route exactly, ordered by schedule key.
    async fn search(&self, query: &RouteQuery) -> CoreResult<Vec<TrainListing>>;

    async fn locations(&self) -> CoreResult<Vec<String>>;
}

/// Reservation table access. Indexes always refer to the sorted list
/// returned by [`ReservationRepository::list`].
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Create the table with a header row if it does not exist yet.
    async fn ensure_table(&self) -> CoreResult<()>;

    async fn list(&self) -> CoreResult<Vec<Reservation>>;

    async fn get(&self, index: usize) -> CoreResult<Reservation>;

    async fn create(&self, reservation: Reservation) -> CoreResult<()>;

    /// Returns `false` when `index` is out of range; nothing is written then.
    async fn delete(&self, index: usize) -> CoreResult<bool>;

    /// Fails with `IndexOutOfRange` when `index` is out of range.
    async fn update(&self, index: usize, reservation: Reservation) -> CoreResult<()>;
}
