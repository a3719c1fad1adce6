use rust_decimal::Decimal;
use serde::Deserialize;

/// Largest unit price a cart line accepts, in whole currency units.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;

/// Clamps a unit price into `0..=MAX_UNIT_PRICE`.
pub fn clamp_unit_price(price: Decimal) -> Decimal {
    price.clamp(Decimal::ZERO, Decimal::from(MAX_UNIT_PRICE))
}

/// `unit_price * quantity`, saturating at [`Decimal::MAX`].
pub fn line_subtotal(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .unwrap_or(Decimal::MAX)
}

/// Sums amounts, saturating at [`Decimal::MAX`].
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .unwrap_or(Decimal::MAX)
}

/// A product as the catalog offers it for a given store.
///
/// Mirrors the backend's available-products listing. Only the fields a cart
/// needs survive the conversion into [`CartProduct`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableProduct {
    pub store_id: i64,
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub store_address: String,
    #[serde(default)]
    pub store_latitude: f64,
    #[serde(default)]
    pub store_longitude: f64,
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub available_quantity: i64,
}

/// The part of a catalog entry that goes into the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub product_id: i64,
    pub product_name: String,
    pub image_url: String,
    pub unit_price: Decimal,
    pub store_id: i64,
}

impl CartProduct {
    pub fn new(
        product_id: i64,
        product_name: impl Into<String>,
        unit_price: Decimal,
        store_id: i64,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            image_url: String::new(),
            unit_price,
            store_id,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }
}

impl From<AvailableProduct> for CartProduct {
    fn from(product: AvailableProduct) -> Self {
        Self {
            product_id: product.product_id,
            product_name: product.product_name,
            image_url: product.image_url,
            unit_price: product.unit_price.unwrap_or(Decimal::ZERO),
            store_id: product.store_id,
        }
    }
}

/// One product entry in the cart with its aggregated quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub product_id: i64,
    pub product_name: String,
    pub image_url: String,
    pub unit_price: Decimal,
    pub store_id: i64,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn subtotal(&self) -> Decimal {
        line_subtotal(self.unit_price, self.quantity)
    }
}

impl From<CartProduct> for CartLineItem {
    fn from(product: CartProduct) -> Self {
        Self {
            product_id: product.product_id,
            product_name: product.product_name,
            image_url: product.image_url,
            unit_price: clamp_unit_price(product.unit_price),
            store_id: product.store_id,
            quantity: 1,
        }
    }
}

/// Partial update merged into an existing line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLinePatch {
    pub product_name: Option<String>,
    pub image_url: Option<String>,
    pub unit_price: Option<Decimal>,
    pub store_id: Option<i64>,
    /// `Some(0)` removes the line.
    pub quantity: Option<u32>,
}
