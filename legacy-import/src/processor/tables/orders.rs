//! Carts, orders and money movements.

use legacy_import_shared::types::{
    Cart, Order, OrderItem, OrderStatusHistory, Transaction, WalletHistory,
};

use super::{CUSTOMER_ADDRESS, ORDERS, PRODUCT, PRODUCT_VARIANT, USER};
use crate::consumer::LegacyRow;
use crate::processor::coerce::{coerce_float, coerce_int, coerce_optional_float, coerce_text};
use crate::processor::{LegacyTable, TransformContext};

/// Rows without a resolvable user or product are skipped.
pub struct Carts;

impl LegacyTable for Carts {
    type Record = Cart;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Cart> {
        let user = context.link(USER, row.get("userid"));
        let product = context.link(PRODUCT, row.get("productid"));
        if !user.is_resolved() || !product.is_resolved() {
            return None;
        }
        let product_variant =
            context.link(PRODUCT_VARIANT, row.pick(&["productvariantid", "variantid"]));

        Some(Cart {
            user: user.id,
            old_user_id: user.legacy,
            product: product.id,
            old_product_id: product.legacy,
            product_variant: product_variant.id,
            old_product_variant_id: product_variant.legacy,
            quantity: coerce_int(row.pick(&["quantity", "qty"]), 0),
            price: row.float("price", 0.0),
            created_at: context.date(row.get("createdat")),
            updated_at: context.date(row.get("updatedat")),
        })
    }
}

pub struct Orders;

impl LegacyTable for Orders {
    type Record = Order;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Order> {
        let user = context.link(USER, row.get("userid"));
        let address = context.link(CUSTOMER_ADDRESS, row.pick(&["addressid", "customeraddressid"]));
        let rider = context.link(USER, row.get("riderid"));

        let order_amount = row.float("orderamount", 0.0);
        let net_amount = row.optional_float("netamount").unwrap_or(order_amount);
        let created_at = context.date(row.get("createdat"));
        let order_date = context
            .optional_date(row.get("orderdate"))
            .unwrap_or(created_at);

        Some(Order {
            order_number: coerce_text(row.pick(&["ordernumber", "orderno", "orderid"])),
            user: user.id,
            old_user_id: user.legacy,
            address: address.id,
            old_address_id: address.legacy,
            rider: rider.id,
            old_rider_id: rider.legacy,
            order_amount,
            net_amount,
            discount_amount: coerce_float(row.pick(&["discountamount", "discount"]), 0.0),
            delivery_charge: row.float("deliverycharge", 0.0),
            wallet_amount: row.float("walletamount", 0.0),
            coupon_code: row.text("couponcode"),
            payment_mode: coerce_text(row.pick(&["paymentmode", "paymenttype"])),
            payment_status: row.int("paymentstatus", 0),
            order_status: coerce_int(row.pick(&["orderstatus", "status"]), 0),
            payment_reference: coerce_text(row.pick(&["paymentid", "transactionid"])),
            notes: coerce_text(row.pick(&["notes", "instructions"])),
            order_date,
            delivery_date: context.optional_date(row.get("deliverydate")),
            created_at,
            updated_at: context.date(row.get("updatedat")),
        })
    }
}

/// Rows without a resolvable order are skipped.
pub struct OrderItems;

impl LegacyTable for OrderItems {
    type Record = OrderItem;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<OrderItem> {
        let order = context.link(ORDERS, row.get("orderid"));
        if !order.is_resolved() {
            return None;
        }
        let product = context.link(PRODUCT, row.get("productid"));
        let product_variant =
            context.link(PRODUCT_VARIANT, row.pick(&["productvariantid", "variantid"]));

        let quantity = coerce_int(row.pick(&["quantity", "qty"]), 0);
        let price = row.float("price", 0.0);

        Some(OrderItem {
            order: order.id,
            old_order_id: order.legacy,
            product: product.id,
            old_product_id: product.legacy,
            product_variant: product_variant.id,
            old_product_variant_id: product_variant.legacy,
            product_name: coerce_text(row.pick(&["productname", "name"])),
            quantity,
            price,
            total: coerce_optional_float(row.pick(&["total", "totalamount"]))
                .unwrap_or(price * quantity as f64),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct OrderStatusHistories;

impl LegacyTable for OrderStatusHistories {
    type Record = OrderStatusHistory;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<OrderStatusHistory> {
        let order = context.link(ORDERS, row.get("orderid"));

        Some(OrderStatusHistory {
            order: order.id,
            old_order_id: order.legacy,
            status: coerce_int(row.pick(&["status", "orderstatus"]), 0),
            remarks: coerce_text(row.pick(&["remarks", "comment"])),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct Transactions;

impl LegacyTable for Transactions {
    type Record = Transaction;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<Transaction> {
        let user = context.link(USER, row.get("userid"));
        let order = context.link(ORDERS, row.get("orderid"));

        Some(Transaction {
            user: user.id,
            old_user_id: user.legacy,
            order: order.id,
            old_order_id: order.legacy,
            amount: row.float("amount", 0.0),
            transaction_type: coerce_text(row.pick(&["transactiontype", "type"])),
            payment_mode: coerce_text(row.pick(&["paymentmode", "paymenttype"])),
            gateway_reference: coerce_text(row.pick(&["transactionid", "paymentid"])),
            status: row.int("status", 0),
            created_at: context.date(row.get("createdat")),
        })
    }
}

pub struct WalletHistories;

impl LegacyTable for WalletHistories {
    type Record = WalletHistory;

    fn transform(row: &LegacyRow, context: &TransformContext<'_>) -> Option<WalletHistory> {
        let user = context.link(USER, row.get("userid"));
        let order = context.link(ORDERS, row.get("orderid"));

        Some(WalletHistory {
            user: user.id,
            old_user_id: user.legacy,
            order: order.id,
            old_order_id: order.legacy,
            amount: row.float("amount", 0.0),
            entry_type: coerce_text(row.pick(&["type", "entrytype"])),
            balance_after: coerce_optional_float(row.pick(&["balance", "balanceafter"])),
            description: coerce_text(row.pick(&["description", "remarks"])),
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
    fn test_net_amount_falls_back_to_order_amount() {
        let registry = IdentifierRegistry::new();
        let context = TransformContext::new(&registry, now());

        let order = Orders::transform(&row(json!({ "id": "1", "orderamount": "150.50" })), &context).unwrap();
        assert_eq!(order.order_amount, 150.5);
        assert_eq!(order.net_amount, 150.5);

        let blank = Orders::transform(
            &row(json!({ "id": "2", "orderamount": "80", "netamount": "" })),
            &context,
        )
        .unwrap();
        assert_eq!(blank.net_amount, 80.0);

        let explicit = Orders::transform(
            &row(json!({ "id": "3", "orderamount": "80", "netamount": "72.5" })),
            &context,
        )
        .unwrap();
        assert_eq!(explicit.net_amount, 72.5);
    }

    #[test]
    fn test_order_links_rider_through_users() {
        let mut registry = IdentifierRegistry::new();
        let customer = registry.assign(USER, Some(&json!("11"))).unwrap();
        let rider = registry.assign(USER, Some(&json!("12"))).unwrap();
        let context = TransformContext::new(&registry, now());

        let order = Orders::transform(
            &row(json!({
                "id": "1",
                "userid": "11",
                "riderid": "12",
                "addressid": "0",
                "deliverydate": "0000-00-00 00:00:00",
                "orderstatus": "4"
            })),
            &context,
        )
        .unwrap();

        assert_eq!(order.user, Some(customer));
        assert_eq!(order.rider, Some(rider));
        assert_eq!(order.address, None);
        assert_eq!(order.delivery_date, None);
        assert_eq!(order.order_status, 4);
        assert_eq!(order.order_date, now_bson());
    }

    #[test]
    fn test_order_item_requires_order() {
        let mut registry = IdentifierRegistry::new();
        registry.assign(ORDERS, Some(&json!("1")));
        let context = TransformContext::new(&registry, now());

        assert!(OrderItems::transform(&row(json!({ "id": "1", "orderid": "2" })), &context).is_none());

        let item = OrderItems::transform(
            &row(json!({ "id": "2", "orderid": "1", "quantity": "3", "price": "10.5" })),
            &context,
        )
        .unwrap();
        assert_eq!(item.total, 31.5);
    }

    #[test]
    fn test_cart_requires_user_and_product() {
        let mut registry = IdentifierRegistry::new();
        registry.assign(USER, Some(&json!("11")));
        registry.assign(PRODUCT, Some(&json!("21")));
        let context = TransformContext::new(&registry, now());

        let missing_product = row(json!({ "id": "1", "userid": "11", "productid": "" }));
        let valid = row(json!({ "id": "2", "userid": "11", "productid": "21", "quantity": "2" }));

        assert!(Carts::transform(&missing_product, &context).is_none());
        assert_eq!(Carts::transform(&valid, &context).unwrap().quantity, 2);
    }

    #[test]
    fn test_wallet_balance_optional() {
        let registry = IdentifierRegistry::new();
        let context = TransformContext::new(&registry, now());

        let entry = WalletHistories::transform(
            &row(json!({ "id": "1", "amount": "-20", "type": "debit" })),
            &context,
        )
        .unwrap();
        assert_eq!(entry.amount, -20.0);
        assert_eq!(entry.balance_after, None);
        assert_eq!(entry.entry_type.as_deref(), Some("debit"));
    }
}
