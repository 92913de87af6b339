use std::sync::Arc;
use rail_core::repository::{ReservationRepository, TrainRepository};

#[derive(Clone)]
pub struct AppState {
    pub train_repo: Arc<dyn TrainRepository>,
    pub reservation_repo: Arc<dyn ReservationRepository>,
}
