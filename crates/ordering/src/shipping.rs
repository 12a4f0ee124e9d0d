use serde::{Deserialize, Serialize};

use orderkit_core::ValueObject;

/// Where and to whom an order ships.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub receiver_name: String,
    pub receiver_phone: String,
    pub address: String,
}

impl ShippingInfo {
    pub fn new(
        receiver_name: impl Into<String>,
        receiver_phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            receiver_name: receiver_name.into(),
            receiver_phone: receiver_phone.into(),
            address: address.into(),
        }
    }
}

impl ValueObject for ShippingInfo {}
