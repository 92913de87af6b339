use async_trait::async_trait;
use rail_core::query;
use rail_core::repository::ReservationRepository;
use rail_core::{CoreError, CoreResult, Reservation};
use tracing::info;

use crate::RecordStore;

/// Reservations kept in a CSV table. Edits and deletes re-read the table,
/// sort it, change one position and rewrite the whole file.
pub struct CsvReservationRepository {
    store: RecordStore<Reservation>,
}

impl CsvReservationRepository {
    pub fn new(store: RecordStore<Reservation>) -> Self {
        Self { store }
    }

    fn load_sorted(&self) -> CoreResult<Vec<Reservation>> {
        let mut reservations = self.store.load_all()?;
        query::sort_by_key(&mut reservations);
        Ok(reservations)
    }
}

#[async_trait]
impl ReservationRepository for CsvReservationRepository {
    async fn ensure_table(&self) -> CoreResult<()> {
        if self.store.ensure_exists()? {
            info!("Created reservations table at {}", self.store.path().display());
        }
        Ok(())
    }

    async fn list(&self) -> CoreResult<Vec<Reservation>> {
        self.load_sorted()
    }

    async fn get(&self, index: usize) -> CoreResult<Reservation> {
        let mut reservations = self.load_sorted()?;
        let len = reservations.len();
        if index >= len {
            return Err(CoreError::IndexOutOfRange { index, len });
        }
        Ok(reservations.swap_remove(index))
    }

    async fn create(&self, reservation: Reservation) -> CoreResult<()> {
        self.store.append(&reservation)?;
        info!("Reservation created for train {} on {}", reservation.train_no, reservation.date);
        Ok(())
    }

    async fn delete(&self, index: usize) -> CoreResult<bool> {
        let mut reservations = self.load_sorted()?;
        if index >= reservations.len() {
            info!("Ignoring delete of reservation {} (only {} exist)", index, reservations.len());
            return Ok(false);
        }

        let removed = reservations.remove(index);
        self.store.overwrite_all(&reservations)?;
        info!("Reservation {} deleted (train {})", index, removed.train_no);
        Ok(true)
    }

    async fn update(&self, index: usize, reservation: Reservation) -> CoreResult<()> {
        let mut reservations = self.load_sorted()?;
        let len = reservations.len();
        let slot = reservations
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;

        *slot = reservation;
        self.store.overwrite_all(&reservations)?;
        info!("Reservation {} changed", index);
        Ok(())
    }
}
