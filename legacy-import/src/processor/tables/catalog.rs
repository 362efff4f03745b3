//! Categories, variants, products and what hangs off products.

use legacy_import_shared::types::{
    MainCategory, MenuCategory, MenuItem, Product, ProductImage, ProductReview, ProductVariant,
    StoreMenu, Variant, VariantValue, Wishlist,
};

use super::{MAIN_CATEGORY, MENU_CATEGORY, PRODUCT, USER, VARIANT, VARIANT_VALUE};
use crate::consumer::LegacyRow;
use crate::processor::coerce::{coerce_bool, coerce_float, coerce_int, coerce_text};
use crate::processor::{LegacyTable, TransformContext};

fn position(row: &LegacyRow) -> i64 {
    coerce_int(row.pick(&["position", "sortorder", "displayorder"]), 0)
}

pub struct MainCategories;

impl LegacyTable for MainCategories {
    type Record = MainCategory;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<MainCategory> {
        Some(MainCategory {
            name: row.text("name").unwrap_or_default(),
            slug: row.text("slug"),
            image: row.text("image"),
            position: position(row),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct MenuCategories;

impl LegacyTable for MenuCategories {
    type Record = MenuCategory;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<MenuCategory> {
        Some(MenuCategory {
            name: row.text("name").unwrap_or_default(),
            image: row.text("image"),
            position: position(row),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct Variants;

impl LegacyTable for Variants {
    type Record = Variant;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Variant> {
        Some(Variant {
            name: row.text("name").unwrap_or_default(),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

/// Rows with an empty value are skipped.
pub struct VariantValues;

impl LegacyTable for VariantValues {
    type Record = VariantValue;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<VariantValue> {
        let value = coerce_text(row.pick(&["value", "name"]))?;
        let variant = context.link(VARIANT, row.get("variantid"));

        Some(VariantValue {
            variant: variant.id,
            old_variant_id: variant.legacy,
            value,
            position: position(row),
            status: row.int("status", 1),
        })
    }
}

pub struct Products;

impl LegacyTable for Products {
    type Record = Product;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Product> {
        let main_category = context.link(MAIN_CATEGORY, row.pick(&["maincategoryid", "categoryid"]));
        let menu_category = context.link(MENU_CATEGORY, row.get("menucategoryid"));

        Some(Product {
            name: row.text("name").unwrap_or_default(),
            slug: row.text("slug"),
            description: row.text("description"),
            short_description: coerce_text(row.pick(&["shortdescription", "shortdesc"])),
            sku: row.text("sku"),
            main_category: main_category.id,
            old_main_category_id: main_category.legacy,
            menu_category: menu_category.id,
            old_menu_category_id: menu_category.legacy,
            price: coerce_float(row.pick(&["price", "saleprice"]), 0.0),
            mrp: row.optional_float("mrp"),
            discount: row.float("discount", 0.0),
            stock: coerce_int(row.pick(&["stock", "quantity"]), 0),
            unit: row.text("unit"),
            weight: row.optional_float("weight"),
            image: row.text("image"),
            is_featured: coerce_bool(row.pick(&["isfeatured", "featured"]), false),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
            updated_at: context.date(row.get("updatedat")),
        })
    }
}

pub struct ProductVariants;

impl LegacyTable for ProductVariants {
    type Record = ProductVariant;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<ProductVariant> {
        let product = context.link(PRODUCT, row.get("productid"));
        let variant = context.link(VARIANT, row.get("variantid"));
        let variant_value = context.link(VARIANT_VALUE, row.get("variantvalueid"));

        Some(ProductVariant {
            product: product.id,
            old_product_id: product.legacy,
            variant: variant.id,
            old_variant_id: variant.legacy,
            variant_value: variant_value.id,
            old_variant_value_id: variant_value.legacy,
            sku: row.text("sku"),
            price: row.float("price", 0.0),
            mrp: row.optional_float("mrp"),
            stock: coerce_int(row.pick(&["stock", "quantity"]), 0),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

/// Rows without an image path or a resolvable product are skipped.
pub struct ProductImages;

impl LegacyTable for ProductImages {
    type Record = ProductImage;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<ProductImage> {
        let image = coerce_text(row.pick(&["image", "imagepath"]))?;
        let product = context.link(PRODUCT, row.get("productid"));
        if !product.is_resolved() {
            return None;
        }

        Some(ProductImage {
            product: product.id,
            old_product_id: product.legacy,
            image,
            position: position(row),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct ProductReviews;

impl LegacyTable for ProductReviews {
    type Record = ProductReview;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<ProductReview> {
        let product = context.link(PRODUCT, row.get("productid"));
        let user = context.link(USER, row.get("userid"));

        Some(ProductReview {
            product: product.id,
            old_product_id: product.legacy,
            user: user.id,
            old_user_id: user.legacy,
            rating: row.int("rating", 0),
            review: coerce_text(row.pick(&["review", "comment"])),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

/// Rows without a resolvable user or product are skipped.
pub struct Wishlists;

impl LegacyTable for Wishlists {
    type Record = Wishlist;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Wishlist> {
        let product = context.link(PRODUCT, row.get("productid"));
        let user = context.link(USER, row.get("userid"));
        if !product.is_resolved() || !user.is_resolved() {
            return None;
        }

        Some(Wishlist {
            product: product.id,
            old_product_id: product.legacy,
            user: user.id,
            old_user_id: user.legacy,
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct MenuItems;

impl LegacyTable for MenuItems {
    type Record = MenuItem;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<MenuItem> {
        let menu_category = context.link(MENU_CATEGORY, row.get("menucategoryid"));
        let product = context.link(PRODUCT, row.get("productid"));

        Some(MenuItem {
            menu_category: menu_category.id,
            old_menu_category_id: menu_category.legacy,
            product: product.id,
            old_product_id: product.legacy,
            position: position(row),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct StoreMenus;

impl LegacyTable for StoreMenus {
    type Record = StoreMenu;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<StoreMenu> {
        let menu_category = context.link(MENU_CATEGORY, row.get("menucategoryid"));
        let product = context.link(PRODUCT, row.get("productid"));

        Some(StoreMenu {
            name: row.text("name"),
            menu_category: menu_category.id,
            old_menu_category_id: menu_category.legacy,
            product: product.id,
            old_product_id: product.legacy,
            position: position(row),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}
