//! Rider activity. Riders are users with the rider role, so every rider
//! reference resolves against the legacy `user` table.

use legacy_import_shared::types::{RiderFeedback, RiderHistory, RiderSession};

use super::{ORDERS, USER};
use crate::consumer::LegacyRow;
use crate::processor::coerce::{coerce_float, coerce_optional_float, coerce_text};
use crate::processor::{LegacyTable, TransformContext};

pub struct RiderHistories;

impl LegacyTable for RiderHistories {
    type Record = RiderHistory;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<RiderHistory> {
        let rider = context.link(USER, row.get("riderid"));
        let order = context.link(ORDERS, row.get("orderid"));

        Some(RiderHistory {
            rider: rider.id,
            old_rider_id: rider.legacy,
            order: order.id,
            old_order_id: order.legacy,
            status: row.int("status", 0),
            pickup_time: context.optional_date(row.get("pickuptime")),
            delivery_time: context.optional_date(row.get("deliverytime")),
            distance_km: coerce_optional_float(row.pick(&["distance", "distancekm"])),
            earning: coerce_float(row.pick(&["earning", "amount"]), 0.0),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct RiderSessions;

impl LegacyTable for RiderSessions {
    type Record = RiderSession;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<RiderSession> {
        let rider = context.link(USER, row.get("riderid"));

        Some(RiderSession {
            rider: rider.id,
            old_rider_id: rider.legacy,
            login_time: context.date(row.pick(&["logintime", "createdat"])),
            logout_time: context.optional_date(row.get("logouttime")),
            latitude: coerce_optional_float(row.pick(&["latitude", "lat"])),
            longitude: coerce_optional_float(row.pick(&["longitude", "lng"])),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct RiderFeedbacks;

impl LegacyTable for RiderFeedbacks {
    type Record = RiderFeedback;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<RiderFeedback> {
        let rider = context.link(USER, row.get("riderid"));
        let order = context.link(ORDERS, row.get("orderid"));
        let user = context.link(USER, row.get("userid"));

        Some(RiderFeedback {
            rider: rider.id,
            old_rider_id: rider.legacy,
            order: order.id,
            old_order_id: order.legacy,
            user: user.id,
            old_user_id: user.legacy,
            rating: row.int("rating", 0),
            comment: coerce_text(row.pick(&["comment", "feedback", "message"])),
            created_at: context.date(row.get("createdat")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::tables::test_support::{now, row};
    use crate::processor::IdentifierRegistry;
    use serde_json::json;

    #[test]
    fn test_rider_session_open_logout() {
        let mut registry = IdentifierRegistry::new();
        let rider = registry.assign(USER, Some(&json!("12"))).unwrap();
        let context = TransformContext::new(&registry, now());

        let session = RiderSessions::transform(
            &row(json!({
                "id": "1",
                "riderid": "12",
                "logintime": "2023-08-01 09:00:00",
                "logouttime": "0000-00-00 00:00:00"
            })),
            &context,
        )
        .unwrap();

        assert_eq!(session.rider, Some(rider));
        assert_eq!(session.logout_time, None);
        assert_eq!(
            session.login_time,
            bson::DateTime::from_millis(1_690_880_400_000)
        );
    }

    #[test]
    fn test_rider_history_optional_times() {
        let registry = IdentifierRegistry::new();
        let context = TransformContext::new(&registry, now());

        let history = RiderHistories::transform(
            &row(json!({ "id": "1", "pickuptime": "2023-08-01 09:15:00", "distance": "4.2km" })),
            &context,
        )
        .unwrap();

        assert!(history.pickup_time.is_some());
        assert_eq!(history.delivery_time, None);
        assert_eq!(history.distance_km, Some(4.2));
        assert_eq!(history.rider, None);
        assert_eq!(history.old_rider_id, None);
    }

    #[test]
    fn test_rider_feedback_links_rider_and_customer() {
        let mut registry = IdentifierRegistry::new();
        let rider = registry.assign(USER, Some(&json!("12"))).unwrap();
        let customer = registry.assign(USER, Some(&json!("11"))).unwrap();
        let context = TransformContext::new(&registry, now());

        let feedback = RiderFeedbacks::transform(
            &row(json!({ "id": "1", "riderid": "12", "userid": "11", "rating": "5" })),
            &context,
        )
        .unwrap();

        assert_eq!(feedback.rider, Some(rider));
        assert_eq!(feedback.user, Some(customer));
        assert_eq!(feedback.rating, 5);
    }
}
