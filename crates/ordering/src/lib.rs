//! Ordering domain module.
//!
//! An order aggregates line items, derives its total, and moves through a
//! small shipping/cancellation lifecycle. Pure domain logic: no IO, no
//! storage, no clocks beyond the convenience mutators on [`Order`].

pub mod order;
pub mod order_line;
pub mod order_state;
pub mod shipping;

pub use order::{
    CancelOrder, ChangeShippingInfo, CompletePayment, MarkShipped, Order, OrderCanceled,
    OrderCommand, OrderEvent, OrderPlaced, OrderShipped, PlaceOrder, ShippingInfoChanged,
};
pub use order_line::OrderLine;
pub use order_state::OrderState;
pub use orderkit_core::{OrderId, ProductId};
pub use shipping::ShippingInfo;
