//! Notifications, feedback, offers, banners and store settings.

use legacy_import_shared::types::{
    Banner, DeliveryChargeSetting, Feedback, Notification, Offer, PincodeDelivery, Setting,
};

use super::{ORDERS, PINCODE, PRODUCT, USER};
use crate::consumer::LegacyRow;
use crate::processor::coerce::{
    coerce_bool, coerce_float, coerce_int, coerce_optional_float, coerce_optional_int, coerce_text,
};
use crate::processor::{LegacyTable, TransformContext};

pub struct Notifications;

impl LegacyTable for Notifications {
    type Record = Notification;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Notification> {
        let user = context.link(USER, row.get("userid"));
        let order = context.link(ORDERS, row.get("orderid"));

        Some(Notification {
            user: user.id,
            old_user_id: user.legacy,
            order: order.id,
            old_order_id: order.legacy,
            title: row.text("title"),
            message: coerce_text(row.pick(&["message", "description"])),
            is_read: coerce_bool(row.pick(&["isread", "readstatus"]), false),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct Feedbacks;

impl LegacyTable for Feedbacks {
    type Record = Feedback;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Feedback> {
        let user = context.link(USER, row.get("userid"));
        let order = context.link(ORDERS, row.get("orderid"));

        Some(Feedback {
            user: user.id,
            old_user_id: user.legacy,
            order: order.id,
            old_order_id: order.legacy,
            rating: row.int("rating", 0),
            message: coerce_text(row.pick(&["message", "feedback", "comment"])),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct Offers;

impl LegacyTable for Offers {
    type Record = Offer;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Offer> {
        Some(Offer {
            title: coerce_text(row.pick(&["title", "name"])).unwrap_or_default(),
            description: row.text("description"),
            code: coerce_text(row.pick(&["code", "couponcode"])),
            discount_type: coerce_text(row.pick(&["discounttype", "type"])),
            discount_value: coerce_float(row.pick(&["discountvalue", "discount"]), 0.0),
            min_order_amount: coerce_float(row.pick(&["minorderamount", "minamount"]), 0.0),
            max_discount: coerce_optional_float(row.pick(&["maxdiscount", "maxamount"])),
            usage_limit: coerce_optional_int(row.pick(&["usagelimit", "maxuse"])),
            start_date: context.date(row.pick(&["startdate", "createdat"])),
            end_date: context.optional_date(row.get("enddate")),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct Banners;

impl LegacyTable for Banners {
    type Record = Banner;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Banner> {
        let product = context.link(PRODUCT, row.get("productid"));

        Some(Banner {
            title: row.text("title"),
            image: row.text("image"),
            link: coerce_text(row.pick(&["link", "url"])),
            product: product.id,
            old_product_id: product.legacy,
            position: coerce_int(row.pick(&["position", "sortorder"]), 0),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct DeliveryCharges;

impl LegacyTable for DeliveryCharges {
    type Record = DeliveryChargeSetting;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<DeliveryChargeSetting> {
        Some(DeliveryChargeSetting {
            min_amount: coerce_float(row.pick(&["minamount", "fromamount"]), 0.0),
            max_amount: coerce_optional_float(row.pick(&["maxamount", "toamount"])),
            charge: coerce_float(row.pick(&["charge", "amount", "deliverycharge"]), 0.0),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct PincodeDeliveries;

impl LegacyTable for PincodeDeliveries {
    type Record = PincodeDelivery;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<PincodeDelivery> {
        let pincode = context.link(PINCODE, row.get("pincodeid"));

        Some(PincodeDelivery {
            pincode: pincode.id,
            old_pincode_id: pincode.legacy,
            delivery_charge: coerce_float(row.pick(&["deliverycharge", "charge"]), 0.0),
            min_days: row.int("mindays", 0),
            max_days: row.int("maxdays", 0),
            is_available: coerce_bool(row.pick(&["isavailable", "status"]), true),
            created_at: context.date(row.get("createdat")),
        })
    }
}

/// Rows with an empty key are skipped.
pub struct Settings;

impl LegacyTable for Settings {
    type Record = Setting;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Setting> {
        let key = coerce_text(row.pick(&["key", "settingkey", "name"]))?;

        Some(Setting {
            key,
            value: coerce_text(row.pick(&["value", "settingvalue"])),
            description: row.text("description"),
            updated_at: context.date(row.pick(&["updatedat", "createdat"])),
        })
    }
}
