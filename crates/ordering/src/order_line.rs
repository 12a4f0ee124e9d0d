use serde::{Deserialize, Deserializer, Serialize};

use orderkit_core::{ProductId, ValueObject};

/// One purchased product at a price and quantity.
///
/// `amount` is fixed at construction as `price * quantity`. Sign is not
/// checked: negative prices or quantities are carried through as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    product_id: ProductId,
    /// Price in smallest currency unit (e.g., cents).
    price: i32,
    quantity: i32,
    #[serde(skip_serializing)]
    amount: i64,
}

impl OrderLine {
    pub fn new(product_id: ProductId, price: i32, quantity: i32) -> Self {
        Self {
            product_id,
            price,
            quantity,
            amount: i64::from(price) * i64::from(quantity),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl ValueObject for OrderLine {}

#[derive(Deserialize)]
struct OrderLineFields {
    product_id: ProductId,
    price: i32,
    quantity: i32,
}

// The amount is derived, never trusted from input.
impl<'de> Deserialize<'de> for OrderLine {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = OrderLineFields::deserialize(deserializer)?;
        Ok(OrderLine::new(fields.product_id, fields.price, fields.quantity))
    }
}
