//! Account records: storefront users, back-office admins and saved addresses.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::envelope::CollectionRecord;
use crate::SurrogateId;

/// Role of a storefront account.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Seller,
    Rider,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Seller => "seller",
            Self::Rider => "rider",
        }
    }
}

/// A storefront account. Riders and sellers live in the same collection as
/// customers and are told apart by `role`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password_hash: Option<String>,
    pub role: UserRole,
    /// Raw legacy `usertype` code, kept next to the derived role.
    pub legacy_user_type: Option<String>,
    pub status: i64,
    pub wallet_balance: f64,
    pub referral_code: Option<String>,
    pub profile_image: Option<String>,
    pub device_token: Option<String>,
    pub city: Option<SurrogateId>,
    pub old_city_id: Option<String>,
    pub province: Option<SurrogateId>,
    pub old_province_id: Option<String>,
    pub last_login_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CollectionRecord for User {
    const COLLECTION: &'static str = "users";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub name: String,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: String,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for Admin {
    const COLLECTION: &'static str = "admins";
}

/// A delivery address saved by a customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub landmark: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<SurrogateId>,
    pub old_city_id: Option<String>,
    pub province: Option<SurrogateId>,
    pub old_province_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address_type: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime,
}

impl CollectionRecord for CustomerAddress {
    const COLLECTION: &'static str = "customerAddresses";
}
