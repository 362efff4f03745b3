//! The recognized legacy tables, their collections and import phases.

use std::fmt;

use chrono::{DateTime, Utc};
use legacy_import_shared::CollectionRecord;

use super::registry::IdentifierRegistry;
use super::table_processor::{pass_through, transform_table, LegacyTable, TransformedTable};
use super::tables::{self, accounts, catalog, geography, marketing, orders, riders};
use crate::consumer::LegacyRow;

/// Import phases, in the order they run.
///
/// Every table only references tables of the same or an earlier phase, and
/// within a phase tables are listed parents first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Geography,
    Users,
    Catalog,
    Carts,
    Orders,
    Marketing,
    MenusAndRiders,
    Temporary,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::Geography,
        Phase::Users,
        Phase::Catalog,
        Phase::Carts,
        Phase::Orders,
        Phase::Marketing,
        Phase::MenusAndRiders,
        Phase::Temporary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Geography => "geography",
            Phase::Users => "users",
            Phase::Catalog => "catalog",
            Phase::Carts => "carts",
            Phase::Orders => "orders",
            Phase::Marketing => "marketing",
            Phase::MenusAndRiders => "menus-riders",
            Phase::Temporary => "temporary",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which tables a run imports. Chosen by the binary, never by a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportProfile {
    /// Every recognized table.
    Full,
    /// Reference data only: geography, accounts, catalog, offers, settings
    /// and menus. Transactional history is left behind.
    Essential,
}

impl ImportProfile {
    pub fn includes(&self, spec: &TableSpec) -> bool {
        match self {
            ImportProfile::Full => true,
            ImportProfile::Essential => spec.essential,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportProfile::Full => "full",
            ImportProfile::Essential => "essential",
        }
    }
}

impl fmt::Display for ImportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transforms one table's rows, registering surrogate ids as it goes.
pub type TransformFn =
    fn(&str, &[LegacyRow], &mut IdentifierRegistry, DateTime<Utc>) -> TransformedTable;

/// How a table's rows become documents.
#[derive(Clone, Copy)]
pub enum TableKind {
    Transform(TransformFn),
    /// Rows are inserted verbatim.
    PassThrough,
}

impl fmt::Debug for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Transform(_) => f.write_str("Transform"),
            TableKind::PassThrough => f.write_str("PassThrough"),
        }
    }
}

/// One recognized legacy table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub legacy_table: &'static str,
    pub collection: &'static str,
    pub phase: Phase,
    /// Part of the essential profile.
    pub essential: bool,
    pub kind: TableKind,
}

impl TableSpec {
    fn transform<T: LegacyTable>(legacy_table: &'static str, phase: Phase, essential: bool) -> Self {
        Self {
            legacy_table,
            collection: <T::Record as CollectionRecord>::COLLECTION,
            phase,
            essential,
            kind: TableKind::Transform(transform_table::<T>),
        }
    }

    fn pass_through(legacy_table: &'static str, collection: &'static str) -> Self {
        Self {
            legacy_table,
            collection,
            phase: Phase::Temporary,
            essential: false,
            kind: TableKind::PassThrough,
        }
    }

    /// Turn this table's rows into documents.
    pub fn process(
        &self,
        rows: &[LegacyRow],
        registry: &mut IdentifierRegistry,
        now: DateTime<Utc>,
    ) -> TransformedTable {
        match self.kind {
            TableKind::Transform(transform) => transform(self.legacy_table, rows, registry, now),
            TableKind::PassThrough => pass_through(self.legacy_table, rows),
        }
    }
}

/// Every recognized legacy table in import order.
pub fn table_catalog() -> Vec<TableSpec> {
    use Phase::*;

    vec![
        TableSpec::transform::<geography::Countries>(tables::COUNTRY, Geography, true),
        TableSpec::transform::<geography::Provinces>(tables::PROVINCE, Geography, true),
        TableSpec::transform::<geography::Cities>(tables::CITY, Geography, true),
        TableSpec::transform::<geography::Pincodes>(tables::PINCODE, Geography, true),
        TableSpec::transform::<accounts::Users>(tables::USER, Users, true),
        TableSpec::transform::<accounts::Admins>(tables::ADMIN, Users, true),
        TableSpec::transform::<accounts::CustomerAddresses>(tables::CUSTOMER_ADDRESS, Users, true),
        TableSpec::transform::<catalog::MainCategories>(tables::MAIN_CATEGORY, Catalog, true),
        TableSpec::transform::<catalog::MenuCategories>(tables::MENU_CATEGORY, Catalog, true),
        TableSpec::transform::<catalog::Variants>(tables::VARIANT, Catalog, true),
        TableSpec::transform::<catalog::VariantValues>(tables::VARIANT_VALUE, Catalog, true),
        TableSpec::transform::<catalog::Products>(tables::PRODUCT, Catalog, true),
        TableSpec::transform::<catalog::ProductVariants>(tables::PRODUCT_VARIANT, Catalog, true),
        TableSpec::transform::<catalog::ProductImages>(tables::PRODUCT_IMAGE, Catalog, true),
        TableSpec::transform::<catalog::ProductReviews>(tables::PRODUCT_REVIEW, Catalog, false),
        TableSpec::transform::<catalog::Wishlists>(tables::WISHLIST, Catalog, false),
        TableSpec::transform::<orders::Carts>(tables::CART, Carts, false),
        TableSpec::transform::<orders::Orders>(tables::ORDERS, Orders, false),
        TableSpec::transform::<orders::OrderItems>(tables::ORDER_ITEM, Orders, false),
        TableSpec::transform::<orders::OrderStatusHistories>(tables::ORDER_STATUS_HISTORY, Orders, false),
        TableSpec::transform::<orders::Transactions>(tables::TRANSACTION, Orders, false),
        TableSpec::transform::<orders::WalletHistories>(tables::WALLET_HISTORY, Orders, false),
        TableSpec::transform::<marketing::Notifications>(tables::NOTIFICATION, Marketing, false),
        TableSpec::transform::<marketing::Feedbacks>(tables::FEEDBACK, Marketing, false),
        TableSpec::transform::<marketing::Offers>(tables::OFFER, Marketing, true),
        TableSpec::transform::<marketing::Banners>(tables::BANNER, Marketing, true),
        TableSpec::transform::<marketing::DeliveryCharges>(tables::DELIVERY_CHARGE, Marketing, true),
        TableSpec::transform::<marketing::PincodeDeliveries>(tables::PINCODE_DELIVERY, Marketing, true),
        TableSpec::transform::<marketing::Settings>(tables::SETTING, Marketing, true),
        TableSpec::transform::<catalog::MenuItems>(tables::MENU_ITEM, MenusAndRiders, true),
        TableSpec::transform::<catalog::StoreMenus>(tables::STORE_MENU, MenusAndRiders, true),
        TableSpec::transform::<riders::RiderHistories>(tables::RIDER_HISTORY, MenusAndRiders, false),
        TableSpec::transform::<riders::RiderSessions>(tables::RIDER_SESSION, MenusAndRiders, false),
        TableSpec::transform::<riders::RiderFeedbacks>(tables::RIDER_FEEDBACK, MenusAndRiders, false),
        TableSpec::pass_through(tables::TEMP_CART, "tempCarts"),
        TableSpec::pass_through(tables::TEMP_ORDERS, "tempOrders"),
        TableSpec::pass_through(tables::OTP_VERIFICATION, "otpVerifications"),
        TableSpec::pass_through(tables::LOGIN_LOG, "loginLogs"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_catalog_is_in_phase_order() {
        let catalog = table_catalog();
        assert!(catalog.windows(2).all(|pair| pair[0].phase <= pair[1].phase));
        assert_eq!(catalog.first().unwrap().legacy_table, "country");
        assert_eq!(catalog.last().unwrap().phase, Phase::Temporary);
    }

    #[test]
    fn test_names_are_unique() {
        let catalog = table_catalog();
        let tables: HashSet<_> = catalog.iter().map(|spec| spec.legacy_table).collect();
        let collections: HashSet<_> = catalog.iter().map(|spec| spec.collection).collect();
        assert_eq!(tables.len(), catalog.len());
        assert_eq!(collections.len(), catalog.len());
    }

    #[test]
    fn test_collections_follow_record_types() {
        let collections: HashMap<_, _> = table_catalog()
            .iter()
            .map(|spec| (spec.legacy_table, spec.collection))
            .collect();

        assert_eq!(collections["customeraddress"], "customerAddresses");
        assert_eq!(collections["deliverycharge"], "deliveryChargeSettings");
        assert_eq!(collections["orderstatushistory"], "orderStatusHistory");
        assert_eq!(collections["storemenu"], "storeMenus");
        assert_eq!(collections["otpverification"], "otpVerifications");
    }

    #[test]
    fn test_essential_profile_leaves_history_behind() {
        let catalog = table_catalog();
        let essential: Vec<_> = catalog
            .iter()
            .filter(|spec| ImportProfile::Essential.includes(spec))
            .map(|spec| spec.legacy_table)
            .collect();

        assert!(essential.contains(&"product"));
        assert!(essential.contains(&"setting"));
        assert!(!essential.contains(&"orders"));
        assert!(!essential.contains(&"tempcart"));
        assert!(catalog.iter().all(|spec| ImportProfile::Full.includes(spec)));
    }

    #[test]
    fn test_pass_through_tables() {
        let pass_through: Vec<_> = table_catalog()
            .into_iter()
            .filter(|spec| matches!(spec.kind, TableKind::PassThrough))
            .map(|spec| spec.legacy_table)
            .collect();
        assert_eq!(
            pass_through,
            vec!["tempcart", "temporders", "otpverification", "loginlog"]
        );
    }
}
