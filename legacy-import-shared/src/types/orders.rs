//! Cart, order and money-movement records.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::envelope::CollectionRecord;
use crate::SurrogateId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub product_variant: Option<SurrogateId>,
    pub old_product_variant_id: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CollectionRecord for Cart {
    const COLLECTION: &'static str = "carts";
}

/// A placed order.
///
/// `net_amount` is the amount actually charged; legacy rows without it fall
/// back to `order_amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_number: Option<String>,
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub address: Option<SurrogateId>,
    pub old_address_id: Option<String>,
    pub rider: Option<SurrogateId>,
    pub old_rider_id: Option<String>,
    pub order_amount: f64,
    pub net_amount: f64,
    pub discount_amount: f64,
    pub delivery_charge: f64,
    pub wallet_amount: f64,
    pub coupon_code: Option<String>,
    pub payment_mode: Option<String>,
    pub payment_status: i64,
    pub order_status: i64,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub order_date: DateTime,
    pub delivery_date: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CollectionRecord for Order {
    const COLLECTION: &'static str = "orders";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub product_variant: Option<SurrogateId>,
    pub old_product_variant_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub created_at: DateTime,
}

impl CollectionRecord for OrderItem {
    const COLLECTION: &'static str = "orderItems";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusHistory {
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub status: i64,
    pub remarks: Option<String>,
    pub created_at: DateTime,
}

impl CollectionRecord for OrderStatusHistory {
    const COLLECTION: &'static str = "orderStatusHistory";
}

/// A payment gateway or cash transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub amount: f64,
    pub transaction_type: Option<String>,
    pub payment_mode: Option<String>,
    pub gateway_reference: Option<String>,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for Transaction {
    const COLLECTION: &'static str = "transactions";
}

/// A wallet credit or debit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletHistory {
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub order: Option<SurrogateId>,
    pub old_order_id: Option<String>,
    pub amount: f64,
    pub entry_type: Option<String>,
    pub balance_after: Option<f64>,
    pub description: Option<String>,
    pub created_at: DateTime,
}

impl CollectionRecord for WalletHistory {
    const COLLECTION: &'static str = "walletHistory";
}
