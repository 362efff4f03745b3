//! Output document records, grouped by the import phase that writes them.

pub mod accounts;
pub mod catalog;
pub mod envelope;
pub mod geography;
pub mod marketing;
pub mod orders;
pub mod riders;

pub use accounts::{Admin, CustomerAddress, User, UserRole};
pub use catalog::{
    MainCategory, MenuCategory, MenuItem, Product, ProductImage, ProductReview, ProductVariant,
    StoreMenu, Variant, VariantValue, Wishlist,
};
pub use envelope::{CollectionRecord, ImportedDocument};
pub use geography::{City, Country, Pincode, Province};
pub use marketing::{
    Banner, DeliveryChargeSetting, Feedback, Notification, Offer, PincodeDelivery, Setting,
};
pub use orders::{Cart, Order, OrderItem, OrderStatusHistory, Transaction, WalletHistory};
pub use riders::{RiderFeedback, RiderHistory, RiderSession};
