use rust_decimal::Decimal;
use serde::Serialize;

use super::product::{line_subtotal, saturating_sum};

/// One product line inside a sub-order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// The part of an order fulfilled by a single store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubOrder {
    pub store_id: i64,
    pub order_items: Vec<OrderItem>,
}

/// Body of `POST /orders/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_id: String,
    pub address: String,
    pub sub_orders: Vec<SubOrder>,
}

impl CheckoutRequest {
    pub fn item_count(&self) -> usize {
        self.sub_orders.iter().map(|s| s.order_items.len()).sum()
    }

    pub fn total(&self) -> Decimal {
        saturating_sum(
            self.sub_orders
                .iter()
                .flat_map(|s| s.order_items.iter())
                .map(|item| line_subtotal(item.unit_price, item.quantity)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_request_wire_format() {
        let request = CheckoutRequest {
            customer_id: "42".to_string(),
            address: "Av. Siempre Viva 742".to_string(),
            sub_orders: vec![SubOrder {
                store_id: 3,
                order_items: vec![OrderItem {
                    product_id: 9,
                    quantity: 2,
                    unit_price: Decimal::new(1250, 2),
                }],
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "customerId": "42",
                "address": "Av. Siempre Viva 742",
                "subOrders": [
                    {
                        "storeId": 3,
                        "orderItems": [
                            { "productId": 9, "quantity": 2, "unitPrice": 12.5 }
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_checkout_request_totals() {
        let request = CheckoutRequest {
            customer_id: "1".to_string(),
            address: String::new(),
            sub_orders: vec![
                SubOrder {
                    store_id: 1,
                    order_items: vec![
                        OrderItem { product_id: 1, quantity: 2, unit_price: Decimal::new(100, 2) },
                        OrderItem { product_id: 2, quantity: 1, unit_price: Decimal::new(50, 2) },
                    ],
                },
                SubOrder {
                    store_id: 2,
                    order_items: vec![OrderItem { product_id: 3, quantity: 4, unit_price: Decimal::ONE }],
                },
            ],
        };
        assert_eq!(request.item_count(), 3);
        assert_eq!(request.total(), Decimal::new(650, 2));
    }
}
