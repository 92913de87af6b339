use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Ordering key shared by every schedule-shaped record.
///
/// Records are totally ordered by `(date, departure, arrival, time)`, compared
/// lexicographically as plain strings.
pub trait Scheduled {
    fn date(&self) -> &str;
    fn departure(&self) -> &str;
    fn arrival(&self) -> &str;
    fn time(&self) -> &str;

    fn schedule_key(&self) -> (&str, &str, &str, &str) {
        (self.date(), self.departure(), self.arrival(), self.time())
    }
}

/// One row of the externally provisioned trains table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainListing {
    pub train_no: String,
    pub date: String,
    pub departure: String,
    pub arrival: String,
    pub time: String,
}

/// A booked seat. Has no identifier of its own; it is addressed by its
/// position in the sorted reservation list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reservation {
    pub train_no: String,
    pub date: String,
    pub departure: String,
    pub arrival: String,
    pub time: String,
}

macro_rules! impl_scheduled {
    ($ty:ty) => {
        impl Scheduled for $ty {
            fn date(&self) -> &str {
                &self.date
            }
            fn departure(&self) -> &str {
                &self.departure
            }
            fn arrival(&self) -> &str {
                &self.arrival
            }
            fn time(&self) -> &str {
                &self.time
            }
        }
    };
}

impl_scheduled!(TrainListing);
impl_scheduled!(Reservation);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuery {
    pub departure: String,
    pub arrival: String,
    pub date: String,
}

/// Train picked from the change-reservation form, submitted as
/// `train_no,date,time,departure,arrival`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainSelection(pub Reservation);

impl FromStr for TrainSelection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        let [train_no, date, time, departure, arrival] = parts.as_slice() else {
            return Err(CoreError::InvalidArgument(format!(
                "train selection must have 5 comma-separated fields, got {}",
                parts.len()
            )));
        };

        Ok(TrainSelection(Reservation {
            train_no: train_no.to_string(),
            date: date.to_string(),
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            time: time.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_selection_field_order() {
        let selection: TrainSelection = "KTX-101,2024-01-01,09:00,Seoul,Busan".parse().unwrap();
        assert_eq!(selection.0.train_no, "KTX-101");
        assert_eq!(selection.0.date, "2024-01-01");
        assert_eq!(selection.0.time, "09:00");
        assert_eq!(selection.0.departure, "Seoul");
        assert_eq!(selection.0.arrival, "Busan");
    }

    #[test]
    fn test_train_selection_rejects_wrong_arity() {
        let err = "KTX-101,2024-01-01,09:00".parse::<TrainSelection>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let json = r#"{ "train_no": "KTX-7", "date": "2024-03-01" }"#;
        let train: TrainListing = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(train.train_no, "KTX-7");
        assert_eq!(train.departure, "");
        assert_eq!(train.schedule_key(), ("2024-03-01", "", "", ""));
    }
}
