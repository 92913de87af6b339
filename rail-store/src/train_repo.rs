use async_trait::async_trait;
use rail_core::query;
use rail_core::repository::TrainRepository;
use rail_core::{CoreResult, RouteQuery, TrainListing};

use crate::RecordStore;

pub struct CsvTrainRepository {
    store: RecordStore<TrainListing>,
}

impl CsvTrainRepository {
    pub fn new(store: RecordStore<TrainListing>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TrainRepository for CsvTrainRepository {
    async fn list_sorted(&self) -> CoreResult<Vec<TrainListing>> {
        let mut trains = self.store.load_all()?;
        query::sort_by_key(&mut trains);
        Ok(trains)
    }

    async fn search(&self, route: &RouteQuery) -> CoreResult<Vec<TrainListing>> {
        let mut trains = query::filter(self.store.load_all()?, route);
        query::sort_by_key(&mut trains);
        Ok(trains)
    }

    async fn locations(&self) -> CoreResult<Vec<String>> {
        let trains = self.store.load_all()?;
        Ok(query::unique_locations(&trains))
    }
}
