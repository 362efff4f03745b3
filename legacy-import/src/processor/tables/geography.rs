//! Countries, provinces, cities and pincodes.

use legacy_import_shared::types::{City, Country, Pincode, Province};

use super::{CITY, COUNTRY, PROVINCE};
use crate::consumer::LegacyRow;
use crate::processor::coerce::coerce_text;
use crate::processor::{LegacyTable, TransformContext};

pub struct Countries;

impl LegacyTable for Countries {
    type Record = Country;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Country> {
        Some(Country {
            name: row.text("name").unwrap_or_default(),
            code: coerce_text(row.pick(&["code", "countrycode", "sortname"])),
            phone_code: coerce_text(row.pick(&["phonecode", "phone_code"])),
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
            updated_at: context.date(row.get("updatedat")),
        })
    }
}

pub struct Provinces;

impl LegacyTable for Provinces {
    type Record = Province;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Province> {
        let country = context.link(COUNTRY, row.get("countryid"));

        Some(Province {
            name: row.text("name").unwrap_or_default(),
            country: country.id,
            old_country_id: country.legacy,
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
            updated_at: context.date(row.get("updatedat")),
        })
    }
}

pub struct Cities;

impl LegacyTable for Cities {
    type Record = City;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<City> {
        let province = context.link(PROVINCE, row.pick(&["provinceid", "stateid"]));

        Some(City {
            name: row.text("name").unwrap_or_default(),
            province: province.id,
            old_province_id: province.legacy,
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
            updated_at: context.date(row.get("updatedat")),
        })
    }
}

/// Rows without a code are skipped.
pub struct Pincodes;

impl LegacyTable for Pincodes {
    type Record = Pincode;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Pincode> {
        let code = coerce_text(row.pick(&["pincode", "code"]))?;
        let city = context.link(CITY, row.get("cityid"));
        let province = context.link(PROVINCE, row.pick(&["provinceid", "stateid"]));

        Some(Pincode {
            code,
            area_name: coerce_text(row.pick(&["areaname", "area"])),
            city: city.id,
            old_city_id: city.legacy,
            province: province.id,
            old_province_id: province.legacy,
            status: row.int("status", 1),
            created_at: context.date(row.get("createdat")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::tables::test_support::{now, now_bson, row};
    use crate::processor::IdentifierRegistry;
    use serde_json::json;

    #[test]
    fn test_country_defaults() {
        let registry = IdentifierRegistry::new();
        let context = TransformContext::new(&registry, now());

        let country = Countries::transform(
            &row(json!({ "id": "7", "name": " India ", "sortname": "IN", "phonecode": 91 })),
            &context,
        )
        .unwrap();

        assert_eq!(country.name, "India");
        assert_eq!(country.code.as_deref(), Some("IN"));
        assert_eq!(country.phone_code.as_deref(), Some("91"));
        assert_eq!(country.status, 1);
        assert_eq!(country.created_at, now_bson());
    }

    #[test]
    fn test_province_links_country() {
        let mut registry = IdentifierRegistry::new();
        let india = registry.assign(COUNTRY, Some(&json!("7"))).unwrap();
        let context = TransformContext::new(&registry, now());

        let province = Provinces::transform(
            &row(json!({ "id": "3", "name": "Delhi", "countryid": "7", "status": "0" })),
            &context,
        )
        .unwrap();

        assert_eq!(province.country, Some(india));
        assert_eq!(province.old_country_id.as_deref(), Some("7"));
        assert_eq!(province.status, 0);
    }

    #[test]
    fn test_city_with_unknown_province() {
        let registry = IdentifierRegistry::new();
        let context = TransformContext::new(&registry, now());

        let city = Cities::transform(
            &row(json!({ "id": "1", "name": "Noida", "provinceid": "99" })),
            &context,
        )
        .unwrap();

        assert_eq!(city.province, None);
        assert_eq!(city.old_province_id.as_deref(), Some("99"));
        assert_eq!(context.dangling(), 1);
    }

    #[test]
    fn test_pincode_without_code_is_skipped() {
        let registry = IdentifierRegistry::new();
        let context = TransformContext::new(&registry, now());

        assert!(Pincodes::transform(&row(json!({ "id": "1", "pincode": " " })), &context).is_none());

        let pincode = Pincodes::transform(
            &row(json!({ "id": "2", "pincode": 110001, "area": "Connaught Place" })),
            &context,
        )
        .unwrap();
        assert_eq!(pincode.code, "110001");
        assert_eq!(pincode.area_name.as_deref(), Some("Connaught Place"));
        assert_eq!(pincode.old_city_id, None);
    }
}
