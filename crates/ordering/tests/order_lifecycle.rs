//! Black-box tests for the order lifecycle through the public API only.

use orderkit_core::{AggregateRoot, DomainError};
use orderkit_events::Event;
use orderkit_ordering::{
    Order, OrderEvent, OrderId, OrderLine, OrderState, ProductId, ShippingInfo,
};

fn home() -> ShippingInfo {
    ShippingInfo::new("Park Seoyeon", "010-2222-3333", "101 Gangnam-daero, Seoul")
}

fn office() -> ShippingInfo {
    ShippingInfo::new("Park Seoyeon", "010-2222-3333", "55 Pangyo-ro, Seongnam")
}

fn place_order() -> Order {
    let lines = vec![
        OrderLine::new(ProductId::new(), 1000, 2),
        OrderLine::new(ProductId::new(), 500, 3),
    ];
    Order::new(OrderId::new(), lines, Some(home())).unwrap()
}

#[test]
fn customer_redirects_then_warehouse_ships() {
    let mut order = place_order();
    assert_eq!(order.total_amounts(), 3500);
    assert_eq!(order.order_state(), OrderState::PaymentWaiting);

    order.complete_payment();
    assert_eq!(order.order_state(), OrderState::PaymentWaiting);

    order.change_shipping_info(office()).unwrap();
    assert_eq!(order.shipping_info(), &office());

    order.change_shipped();
    assert_eq!(order.order_state(), OrderState::Shipped);

    // Too late to redirect or cancel.
    let err = order.change_shipping_info(home()).unwrap_err();
    assert!(err.is_illegal_state());
    let err = order.cancel().unwrap_err();
    assert!(matches!(err, DomainError::IllegalState(_)));
    assert_eq!(order.shipping_info(), &office());
    assert_eq!(order.order_state(), OrderState::Shipped);

    let types: Vec<&str> = order
        .take_pending_events()
        .iter()
        .map(|e| e.event_type())
        .collect();
    assert_eq!(
        types,
        vec![
            "ordering.order.placed",
            "ordering.order.shipping_info_changed",
            "ordering.order.shipped",
        ]
    );
}

#[test]
fn canceled_order_is_final_for_guarded_operations() {
    let mut order = place_order();
    order.cancel().unwrap();
    assert_eq!(order.order_state(), OrderState::Cancel);

    assert!(order.cancel().unwrap_err().is_illegal_state());
    assert!(order.change_shipping_info(office()).unwrap_err().is_illegal_state());
    assert_eq!(order.order_state(), OrderState::Cancel);
    assert_eq!(order.shipping_info(), &home());
}

#[test]
fn restored_delivery_cannot_be_changed() {
    let lines = vec![OrderLine::new(ProductId::new(), 12_900, 1)];
    let mut order =
        Order::restore(OrderId::new(), lines, home(), OrderState::DeliveryCompleted).unwrap();

    assert_eq!(order.total_amounts(), 12_900);
    assert!(order.change_shipping_info(office()).unwrap_err().is_illegal_state());
    assert!(order.cancel().unwrap_err().is_illegal_state());
    assert_eq!(order.version(), 0);
}

#[test]
fn event_history_survives_json_and_replay() {
    let mut order = place_order();
    order.change_shipping_info(office()).unwrap();
    order.change_shipped();
    let history = order.take_pending_events();

    let json = serde_json::to_string(&history).unwrap();
    let decoded: Vec<OrderEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, history);

    let rebuilt = Order::rehydrate(&decoded).unwrap();
    assert_eq!(rebuilt, order);
    assert_eq!(rebuilt.id(), order.id());
}
