//! Geography records: countries, provinces, cities and serviceable pincodes.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::envelope::CollectionRecord;
use crate::SurrogateId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: String,
    pub code: Option<String>,
    pub phone_code: Option<String>,
    pub status: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CollectionRecord for Country {
    const COLLECTION: &'static str = "countries";
}

/// A state or province, linked to its country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Province {
    pub name: String,
    pub country: Option<SurrogateId>,
    pub old_country_id: Option<String>,
    pub status: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CollectionRecord for Province {
    const COLLECTION: &'static str = "provinces";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    pub province: Option<SurrogateId>,
    pub old_province_id: Option<String>,
    pub status: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CollectionRecord for City {
    const COLLECTION: &'static str = "cities";
}

/// A postal code the store delivers to.
///
/// Carries both its city and its province so delivery lookups do not have to
/// walk the geography chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pincode {
    pub code: String,
    pub area_name: Option<String>,
    pub city: Option<SurrogateId>,
    pub old_city_id: Option<String>,
    pub province: Option<SurrogateId>,
    pub old_province_id: Option<String>,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for Pincode {
    const COLLECTION: &'static str = "pincodes";
}
