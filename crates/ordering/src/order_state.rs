use serde::{Deserialize, Serialize};

/// Order lifecycle stage.
///
/// This is a capability lookup, not a transition graph: [`crate::Order`]
/// decides which moves are legal by consulting
/// [`OrderState::is_shipping_changeable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    PaymentWaiting,
    Preparing,
    Shipped,
    Delivering,
    DeliveryCompleted,
    Cancel,
}

impl OrderState {
    /// Every state, in lifecycle order.
    pub const ALL: [OrderState; 6] = [
        OrderState::PaymentWaiting,
        OrderState::Preparing,
        OrderState::Shipped,
        OrderState::Delivering,
        OrderState::DeliveryCompleted,
        OrderState::Cancel,
    ];

    /// Whether shipping info may still change (and the order still be canceled).
    pub fn is_shipping_changeable(self) -> bool {
        match self {
            OrderState::PaymentWaiting | OrderState::Preparing => true,
            OrderState::Shipped
            | OrderState::Delivering
            | OrderState::DeliveryCompleted
            | OrderState::Cancel => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::PaymentWaiting => "PAYMENT_WAITING",
            OrderState::Preparing => "PREPARING",
            OrderState::Shipped => "SHIPPED",
            OrderState::Delivering => "DELIVERING",
            OrderState::DeliveryCompleted => "DELIVERY_COMPLETED",
            OrderState::Cancel => "CANCEL",
        }
    }
}

impl core::fmt::Display for OrderState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
