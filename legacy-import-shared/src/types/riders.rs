//! Delivery rider activity records. Riders are `users` with the rider role.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::envelope::CollectionRecord;
use crate::SurrogateId;

/// One delivery assignment handled by a rider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiderHistory {
    pub rider: Option<SurrogateId>,
    pub old_rider_id: Option<String>,
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub status: i64,
    pub pickup_time: Option<DateTime>,
    pub delivery_time: Option<DateTime>,
    pub distance_km: Option<f64>,
    pub earning: f64,
    pub created_at: DateTime,
}

impl CollectionRecord for RiderHistory {
    const COLLECTION: &'static str = "riderHistory";
}

/// A rider's on-duty session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiderSession {
    pub rider: Option<SurrogateId>,
    pub old_rider_id: Option<String>,
    pub login_time: DateTime,
    pub logout_time: Option<DateTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for RiderSession {
    const COLLECTION: &'static str = "riderSessions";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiderFeedback {
    pub rider: Option<SurrogateId>,
    pub old_rider_id: Option<String>,
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime,
}

impl CollectionRecord for RiderFeedback {
    const COLLECTION: &'static str = "riderFeedback";
}
