//! Marketing, notification and store-settings records.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::envelope::CollectionRecord;
use crate::SurrogateId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime,
}

impl CollectionRecord for Notification {
    const COLLECTION: &'static str = "notifications";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub rating: i64,
    pub message: Option<String>,
    pub created_at: DateTime,
}

impl CollectionRecord for Feedback {
    const COLLECTION: &'static str = "feedback";
}

/// A coupon or promotional offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub title: String,
    pub description: Option<String>,
    pub code: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: f64,
    pub min_order_amount: f64,
    pub max_discount: Option<f64>,
    pub usage_limit: Option<i64>,
    pub start_date: DateTime,
    pub end_date: Option<DateTime>,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for Offer {
    const COLLECTION: &'static str = "offers";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub title: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub position: i64,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for Banner {
    const COLLECTION: &'static str = "banners";
}

/// Delivery charge applied to orders whose amount falls in a band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryChargeSetting {
    pub min_amount: f64,
    pub max_amount: Option<f64>,
    pub charge: f64,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for DeliveryChargeSetting {
    const COLLECTION: &'static str = "deliveryChargeSettings";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PincodeDelivery {
    pub pincode: Option<SurrogateId>,
    pub old_pincode_id: Option<String>,
    pub delivery_charge: f64,
    pub min_days: i64,
    pub max_days: i64,
    pub is_available: bool,
    pub created_at: DateTime,
}

impl CollectionRecord for PincodeDelivery {
    const COLLECTION: &'static str = "pincodeDelivery";
}

/// A key/value store setting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub updated_at: DateTime,
}

impl CollectionRecord for Setting {
    const COLLECTION: &'static str = "settings";
}
