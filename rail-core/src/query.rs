//! In-memory filtering and ordering over loaded records.

use std::collections::BTreeSet;

use crate::models::{RouteQuery, Scheduled, TrainListing};

/// Keep only the records whose departure, arrival and date all equal the
/// query exactly. No trimming or case folding.
pub fn filter<T: Scheduled>(records: Vec<T>, query: &RouteQuery) -> Vec<T> {
    records
        .into_iter()
        .filter(|r| {
            r.departure() == query.departure
                && r.arrival() == query.arrival
                && r.date() == query.date
        })
        .collect()
}

/// Stable sort by `(date, departure, arrival, time)`.
pub fn sort_by_key<T: Scheduled>(records: &mut [T]) {
    records.sort_by(|a, b| a.schedule_key().cmp(&b.schedule_key()));
}

/// Every station that appears as a departure or arrival, sorted and unique.
pub fn unique_locations(trains: &[TrainListing]) -> Vec<String> {
    let mut locations = BTreeSet::new();
    for train in trains {
        locations.insert(train.departure.clone());
        locations.insert(train.arrival.clone());
    }
    locations.into_iter().collect()
}
