//! Catalog records: categories, variants, products and storefront menus.

use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::types::envelope::CollectionRecord;
use crate::SurrogateId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MainCategory {
    pub name: String,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub position: i64,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for MainCategory {
    const COLLECTION: &'static str = "mainCategories";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub name: String,
    pub image: Option<String>,
    pub position: i64,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for MenuCategory {
    const COLLECTION: &'static str = "menuCategories";
}

/// A variant axis such as "Weight" or "Pack size".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub name: String,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for Variant {
    const COLLECTION: &'static str = "variants";
}

/// One value of a variant axis, e.g. "500g".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariantValue {
    pub variant: Option<SurrogateId>,
    pub old_variant_id: Option<String>,
    pub value: String,
    pub position: i64,
    pub status: i64,
}

impl CollectionRecord for VariantValue {
    const COLLECTION: &'static str = "variantValues";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub sku: Option<String>,
    pub main_category: Option<SurrogateId>,
    pub old_main_category_id: Option<String>,
    pub menu_category: Option<SurrogateId>,
    pub old_menu_category_id: Option<String>,
    pub price: f64,
    pub mrp: Option<f64>,
    pub discount: f64,
    pub stock: i64,
    pub unit: Option<String>,
    pub weight: Option<f64>,
    pub image: Option<String>,
    pub is_featured: bool,
    pub status: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CollectionRecord for Product {
    const COLLECTION: &'static str = "products";
}

/// A purchasable combination of a product and one variant value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub variant: Option<SurrogateId>,
    pub old_variant_id: Option<String>,
    pub variant_value: Option<SurrogateId>,
    pub old_variant_value_id: Option<String>,
    pub sku: Option<String>,
    pub price: f64,
    pub mrp: Option<f64>,
    pub stock: i64,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for ProductVariant {
    const COLLECTION: &'static str = "productVariants";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub image: String,
    pub position: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for ProductImage {
    const COLLECTION: &'static str = "productImages";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductReview {
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub rating: i64,
    pub review: Option<String>,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for ProductReview {
    const COLLECTION: &'static str = "productReviews";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub user: Option<SurrogateId>,
    pub old_user_id: Option<String>,
    pub created_at: DateTime,
}

impl CollectionRecord for Wishlist {
    const COLLECTION: &'static str = "wishlists";
}

/// A product placed under a menu category on the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub menu_category: Option<SurrogateId>,
    pub old_menu_category_id: Option<String>,
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub position: i64,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for MenuItem {
    const COLLECTION: &'static str = "menuItems";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreMenu {
    pub name: Option<String>,
    pub menu_category: Option<SurrogateId>,
    pub old_menu_category_id: Option<String>,
    pub product: Option<SurrogateId>,
    pub old_product_id: Option<String>,
    pub position: i64,
    pub status: i64,
    pub created_at: DateTime,
}

impl CollectionRecord for StoreMenu {
    const COLLECTION: &'static str = "storeMenus";
}
