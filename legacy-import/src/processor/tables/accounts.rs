//! Storefront users, admins and customer addresses.

use legacy_import_shared::types::{Admin, CustomerAddress, User, UserRole};

use super::{CITY, PROVINCE, USER};
use crate::consumer::LegacyRow;
use crate::processor::coerce::{coerce_bool, coerce_optional_float, coerce_text};
use crate::processor::{LegacyTable, TransformContext};

/// Map the legacy `usertype` code to a role: `2` is a rider, `1` a seller,
/// anything else a customer.
pub fn role_for(user_type: Option<&str>) -> UserRole {
    match user_type {
        Some("2") => UserRole::Rider,
        Some("1") => UserRole::Seller,
        _ => UserRole::Customer,
    }
}

fn normalize_email(row: &LegacyRow) -> Option<String> {
    coerce_text(row.pick(&["email", "emailid"])).map(|email| email.to_lowercase())
}

fn full_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

pub struct Users;

impl LegacyTable for Users {
    type Record = User;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<User> {
        let first_name = coerce_text(row.pick(&["firstname", "fname"]));
        let last_name = coerce_text(row.pick(&["lastname", "lname"]));
        let full_name = coerce_text(row.pick(&["name", "fullname"]))
            .or_else(|| full_name(first_name.as_deref(), last_name.as_deref()));
        let legacy_user_type = row.text("usertype");
        let city = context.link(CITY, row.get("cityid"));
        let province = context.link(PROVINCE, row.pick(&["provinceid", "stateid"]));

        Some(User {
            first_name,
            last_name,
            full_name,
            email: normalize_email(row),
            mobile: coerce_text(row.pick(&["mobile", "phone", "mobileno"])),
            password_hash: row.text("password"),
            role: role_for(legacy_user_type.as_deref()),
            legacy_user_type,
            status: row.int("status", 1),
            wallet_balance: coerce_optional_float(row.pick(&["walletbalance", "wallet"]))
                .unwrap_or(0.0),
            referral_code: coerce_text(row.pick(&["referralcode", "refcode"])),
            profile_image: coerce_text(row.pick(&["profileimage", "image"])),
            device_token: coerce_text(row.pick(&["devicetoken", "fcmtoken"])),
            city: city.id,
            old_city_id: city.legacy,
            province: province.id,
            old_province_id: province.legacy,
            last_login_at: context.optional_date(row.pick(&["lastlogin", "lastloginat"])),
            created_at: context.date(row.get("createdat")),
            updated_at: context.date(row.get("updatedat")),
        })
    }
}

pub struct Admins;

impl LegacyTable for Admins {
    type Record = Admin;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Admin> {
        Some(Admin {
            name: coerce_text(row.pick(&["name", "username"])).unwrap_or_default(),
            email: normalize_email(row),
            password_hash: row.text("password"),
            role: coerce_text(row.pick(&["role", "admintype"])).unwrap_or_else(|| "admin".to_string()),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct CustomerAddresses;

impl LegacyTable for CustomerAddresses {
    type Record = CustomerAddress;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<CustomerAddress> {
        let user = context.link(USER, row.get("userid"));
        let city = context.link(CITY, row.get("cityid"));
        let province = context.link(PROVINCE, row.pick(&["provinceid", "stateid"]));

        Some(CustomerAddress {
            user: user.id,
            old_user_id: user.legacy,
            name: row.text("name"),
            mobile: coerce_text(row.pick(&["mobile", "phone"])),
            address_line1: coerce_text(row.pick(&["address", "addressline1", "address1"])),
            address_line2: coerce_text(row.pick(&["addressline2", "address2"])),
            landmark: row.text("landmark"),
            pincode: row.text("pincode"),
            city: city.id,
            old_city_id: city.legacy,
            province: province.id,
            old_province_id: province.legacy,
            latitude: coerce_optional_float(row.pick(&["latitude", "lat"])),
            longitude: coerce_optional_float(row.pick(&["longitude", "lng"])),
            address_type: coerce_text(row.pick(&["addresstype", "type"])),
            is_default: coerce_bool(row.pick(&["isdefault", "default"]), false),
            created_at: context.date(row.get("createdat")),
        })
    }
}
