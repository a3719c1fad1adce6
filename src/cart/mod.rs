//! In-memory cart aggregate.
//!
//! Lines are keyed by `product_id` and kept in insertion order for display.
//! Quantity is always at least 1: any operation that would bring it to 0
//! drops the line instead.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::{
    clamp_unit_price, saturating_sum, CartLineItem, CartLinePatch, CartProduct, CheckoutRequest,
    OrderItem, SubOrder,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, creating the line on first add.
    pub fn add(&mut self, product: CartProduct) {
        match self.line_mut(product.product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLineItem::from(product)),
        }
    }

    pub fn increase(&mut self, product_id: i64) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    pub fn decrease(&mut self, product_id: i64) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_sub(1);
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Merges `patch` into the matching line. Product identity is never
    /// changed by a patch.
    pub fn update(&mut self, product_id: i64, patch: CartLinePatch) {
        let Some(line) = self.line_mut(product_id) else {
            return;
        };
        if let Some(name) = patch.product_name {
            line.product_name = name;
        }
        if let Some(url) = patch.image_url {
            line.image_url = url;
        }
        if let Some(price) = patch.unit_price {
            line.unit_price = clamp_unit_price(price);
        }
        if let Some(store_id) = patch.store_id {
            line.store_id = store_id;
        }
        if let Some(quantity) = patch.quantity {
            line.quantity = quantity;
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    /// Replaces the whole collection. Duplicate product ids are merged into
    /// the first occurrence and zero-quantity lines are dropped.
    pub fn replace(&mut self, lines: Vec<CartLineItem>) {
        self.lines.clear();
        for mut incoming in lines {
            if incoming.quantity == 0 {
                continue;
            }
            incoming.unit_price = clamp_unit_price(incoming.unit_price);
            match self.line_mut(incoming.product_id) {
                Some(line) => line.quantity = line.quantity.saturating_add(incoming.quantity),
                None => self.lines.push(incoming),
            }
        }
    }

    /// Takes submitted quantities out of the cart. Lines added or increased
    /// after the snapshot keep whatever was not part of it.
    pub fn deduct(&mut self, submitted: &[SubOrder]) {
        for item in submitted.iter().flat_map(|s| s.order_items.iter()) {
            if let Some(line) = self.line_mut(item.product_id) {
                line.quantity = line.quantity.saturating_sub(item.quantity);
            }
        }
        self.lines.retain(|line| line.quantity > 0);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn get(&self, product_id: i64) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_price(&self) -> Decimal {
        saturating_sum(self.lines.iter().map(CartLineItem::subtotal))
    }

    /// Groups lines by store, ordered by ascending `store_id`. Within a
    /// sub-order, items keep cart order.
    pub fn to_sub_orders(&self) -> Vec<SubOrder> {
        let mut groups: BTreeMap<i64, Vec<OrderItem>> = BTreeMap::new();
        for line in &self.lines {
            groups.entry(line.store_id).or_default().push(OrderItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
        }
        groups
            .into_iter()
            .map(|(store_id, order_items)| SubOrder { store_id, order_items })
            .collect()
    }

    pub fn build_checkout_request(
        &self,
        customer_id: impl Into<String>,
        address: impl Into<String>,
    ) -> CheckoutRequest {
        CheckoutRequest {
            customer_id: customer_id.into(),
            address: address.into(),
            sub_orders: self.to_sub_orders(),
        }
    }

    fn line_mut(&mut self, product_id: i64) -> Option<&mut CartLineItem> {
        self.lines.iter_mut().find(|line| line.product_id == product_id)
    }
}
