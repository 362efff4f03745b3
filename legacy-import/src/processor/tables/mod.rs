//! Row transforms for every recognized legacy table.
//!
//! Each handler is a unit type implementing
//! [`LegacyTable`](super::LegacyTable) for one legacy table. Foreign keys
//! name the legacy table they point into with the constants below.

pub mod accounts;
pub mod catalog;
pub mod geography;
pub mod marketing;
pub mod orders;
pub mod riders;

pub const COUNTRY: &str = "country";
pub const PROVINCE: &str = "province";
pub const CITY: &str = "city";
pub const PINCODE: &str = "pincode";

pub const USER: &str = "user";
pub const ADMIN: &str = "admin";
pub const CUSTOMER_ADDRESS: &str = "customeraddress";

pub const MAIN_CATEGORY: &str = "maincategory";
pub const MENU_CATEGORY: &str = "menucategory";
pub const VARIANT: &str = "variant";
pub const VARIANT_VALUE: &str = "variantvalue";
pub const PRODUCT: &str = "product";
pub const PRODUCT_VARIANT: &str = "productvariant";
pub const PRODUCT_IMAGE: &str = "productimage";
pub const PRODUCT_REVIEW: &str = "productreview";
pub const WISHLIST: &str = "wishlist";

pub const CART: &str = "cart";
pub const ORDERS: &str = "orders";
pub const ORDER_ITEM: &str = "orderitem";
pub const ORDER_STATUS_HISTORY: &str = "orderstatushistory";
pub const TRANSACTION: &str = "transaction";
pub const WALLET_HISTORY: &str = "wallethistory";

pub const NOTIFICATION: &str = "notification";
pub const FEEDBACK: &str = "feedback";
pub const OFFER: &str = "offer";
pub const BANNER: &str = "banner";
pub const DELIVERY_CHARGE: &str = "deliverycharge";
pub const PINCODE_DELIVERY: &str = "pincodedelivery";
pub const SETTING: &str = "setting";

pub const MENU_ITEM: &str = "menuitem";
pub const STORE_MENU: &str = "storemenu";
pub const RIDER_HISTORY: &str = "riderhistory";
pub const RIDER_SESSION: &str = "ridersession";
pub const RIDER_FEEDBACK: &str = "riderfeedback";

pub const TEMP_CART: &str = "tempcart";
pub const TEMP_ORDERS: &str = "temporders";
pub const OTP_VERIFICATION: &str = "otpverification";
pub const LOGIN_LOG: &str = "loginlog";

/// Shared helpers for handler tests.
#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::Value;

    use crate::consumer::LegacyRow;

    pub fn row(value: Value) -> LegacyRow {
        LegacyRow::from_value(value).expect("test rows are JSON objects")
    }

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    pub fn now_bson() -> bson::DateTime {
        bson::DateTime::from_millis(now().timestamp_millis())
    }
}
