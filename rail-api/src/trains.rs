use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use rail_core::{Page, RouteQuery, TrainListing};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Fixed page size of the listing endpoint.
pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub locations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub departure: String,
    pub arrival: String,
    pub date: String,
    pub trains: Vec<TrainListing>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 { 1 }

#[derive(Debug, Serialize)]
pub struct TrainPageResponse {
    pub trains: Vec<TrainListing>,
    pub has_more: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/select", get(list_locations).post(search_trains))
        .route("/api/trains", get(list_trains))
}

/// GET /select
/// Stations for the search form
async fn list_locations(State(state): State<AppState>) -> Result<Json<LocationsResponse>, AppError> {
    let locations = state.train_repo.locations().await?;
    Ok(Json(LocationsResponse { locations }))
}

/// POST /select
/// Trains running on one route and date
async fn search_trains(
    State(state): State<AppState>,
    Json(route): Json<RouteQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let trains = state.train_repo.search(&route).await?;
    info!(
        "Search {} -> {} on {}: {} trains",
        route.departure, route.arrival, route.date, trains.len()
    );

    Ok(Json(SearchResponse {
        departure: route.departure,
        arrival: route.arrival,
        date: route.date,
        trains,
    }))
}

/// GET /api/trains?page=N
async fn list_trains(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<TrainPageResponse>, AppError> {
    let trains = state.train_repo.list_sorted().await?;
    let page = Page::slice(trains, params.page, PAGE_SIZE)?;

    Ok(Json(TrainPageResponse {
        trains: page.items,
        has_more: page.has_more,
    }))
}
