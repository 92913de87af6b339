use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rail_core::{Reservation, TrainListing, TrainSelection};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Serialize)]
pub struct ChangeFormResponse {
    pub reservation: Reservation,
    pub trains: Vec<TrainListing>,
}

/// Every field must be present; empty strings are accepted.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub train_no: String,
    pub date: String,
    pub departure: String,
    pub arrival: String,
    pub time: String,
}

impl From<CreateReservationRequest> for Reservation {
    fn from(req: CreateReservationRequest) -> Self {
        Reservation {
            train_no: req.train_no,
            date: req.date,
            departure: req.departure,
            arrival: req.arrival,
            time: req.time,
        }
    }
}

/// `train` is `train_no,date,time,departure,arrival`.
#[derive(Debug, Deserialize)]
pub struct ChangeReservationRequest {
    pub train: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reserve", post(create_reservation))
        .route("/reservations", get(list_reservations))
        .route("/delete/{index}", post(delete_reservation))
        .route("/change/{index}", get(change_form).post(change_reservation))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /reserve
async fn create_reservation(
    State(state): State<AppState>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let reservation = Reservation::from(req);
    state.reservation_repo.create(reservation.clone()).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// GET /reservations
async fn list_reservations(State(state): State<AppState>) -> Result<Json<ReservationsResponse>, AppError> {
    let reservations = state.reservation_repo.list().await?;
    Ok(Json(ReservationsResponse { reservations }))
}

/// POST /delete/{index}
/// Out-of-range indexes are a no-op.
async fn delete_reservation(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    state.reservation_repo.delete(index).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /change/{index}
/// The reservation being changed plus every train it can move to
async fn change_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<ChangeFormResponse>, AppError> {
    let reservation = state.reservation_repo.get(index).await?;
    let trains = state.train_repo.list_sorted().await?;
    Ok(Json(ChangeFormResponse { reservation, trains }))
}

/// POST /change/{index}
async fn change_reservation(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(req): Json<ChangeReservationRequest>,
) -> Result<Json<Reservation>, AppError> {
    let TrainSelection(reservation) = req.train.parse::<TrainSelection>()?;
    state.reservation_repo.update(index, reservation.clone()).await?;

    info!("Reservation {} moved to train {}", index, reservation.train_no);
    Ok(Json(reservation))
}
