use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use orderkit_core::{Aggregate, AggregateRoot, DomainError, DomainResult, OrderId};
use orderkit_events::Event;

use crate::order_line::OrderLine;
use crate::order_state::OrderState;
use crate::shipping::ShippingInfo;

/// Aggregate root: Order.
///
/// Invariants held by every constructor and mutator:
/// - `order_lines` is never empty.
/// - `total_amounts` is the sum of the lines' amounts.
/// - shipping info only changes, and cancellation only happens, while
///   [`OrderState::is_shipping_changeable`] holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    order_lines: Vec<OrderLine>,
    total_amounts: i64,
    state: OrderState,
    shipping_info: ShippingInfo,
    version: u64,
    pending_events: Vec<OrderEvent>,
}

impl Order {
    /// Place a new order at the current time.
    ///
    /// `shipping_info` is optional only so a missing value can be rejected
    /// the same way an empty line list is.
    pub fn new(
        id: OrderId,
        order_lines: Vec<OrderLine>,
        shipping_info: Option<ShippingInfo>,
    ) -> DomainResult<Self> {
        Self::place(PlaceOrder {
            order_id: id,
            order_lines,
            shipping_info,
            occurred_at: Utc::now(),
        })
    }

    /// Place a new order from a command. The order starts in
    /// [`OrderState::PaymentWaiting`] with one pending `OrderPlaced` event.
    pub fn place(cmd: PlaceOrder) -> DomainResult<Self> {
        checked_total_amounts(&cmd.order_lines)?;
        let shipping_info = cmd
            .shipping_info
            .ok_or_else(|| DomainError::validation("shipping info is required"))?;

        let placed = OrderPlaced {
            order_id: cmd.order_id,
            order_lines: cmd.order_lines,
            shipping_info,
            occurred_at: cmd.occurred_at,
        };

        let mut order = Self::from_placed(&placed);
        order.pending_events.push(OrderEvent::OrderPlaced(placed));
        Ok(order)
    }

    /// Reconstruct an order at a known state, e.g. after loading it from a store.
    ///
    /// No events are recorded and the version starts at 0.
    pub fn restore(
        id: OrderId,
        order_lines: Vec<OrderLine>,
        shipping_info: ShippingInfo,
        state: OrderState,
    ) -> DomainResult<Self> {
        let total_amounts = checked_total_amounts(&order_lines)?;

        Ok(Self {
            id,
            order_lines,
            total_amounts,
            state,
            shipping_info,
            version: 0,
            pending_events: Vec::new(),
        })
    }

    /// Rebuild an order by replaying its event history.
    pub fn rehydrate(history: &[OrderEvent]) -> DomainResult<Self> {
        let (first, rest) = history
            .split_first()
            .ok_or_else(|| DomainError::validation("event history is empty"))?;

        let OrderEvent::OrderPlaced(placed) = first else {
            return Err(DomainError::invariant(
                "event history must start with an order placement",
            ));
        };
        checked_total_amounts(&placed.order_lines)?;

        let mut order = Self::from_placed(placed);
        for event in rest {
            order.ensure_replayable(event)?;
            order.apply(event);
        }

        Ok(order)
    }

    fn ensure_replayable(&self, event: &OrderEvent) -> DomainResult<()> {
        if event.aggregate_id() != self.id {
            return Err(DomainError::invariant("event belongs to a different order"));
        }
        match event {
            OrderEvent::OrderPlaced(_) => {
                Err(DomainError::invariant("order placed more than once"))
            }
            OrderEvent::ShippingInfoChanged(_) | OrderEvent::OrderCanceled(_)
                if !self.state.is_shipping_changeable() =>
            {
                Err(DomainError::invariant(format!(
                    "{} recorded while order was {}",
                    event.event_type(),
                    self.state
                )))
            }
            _ => Ok(()),
        }
    }

    fn from_placed(placed: &OrderPlaced) -> Self {
        let mut order = Self {
            id: placed.order_id,
            order_lines: Vec::new(),
            total_amounts: 0,
            state: OrderState::PaymentWaiting,
            shipping_info: placed.shipping_info.clone(),
            version: 0,
            pending_events: Vec::new(),
        };
        order.apply(&OrderEvent::OrderPlaced(placed.clone()));
        order
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn order_lines(&self) -> &[OrderLine] {
        &self.order_lines
    }

    pub fn total_amounts(&self) -> i64 {
        self.total_amounts
    }

    pub fn order_state(&self) -> OrderState {
        self.state
    }

    pub fn shipping_info(&self) -> &ShippingInfo {
        &self.shipping_info
    }

    /// Events recorded by mutations since the last call to [`Order::take_pending_events`].
    pub fn pending_events(&self) -> &[OrderEvent] {
        &self.pending_events
    }

    pub fn take_pending_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Replace the shipping info. Fails while the order is shipping or done.
    pub fn change_shipping_info(&mut self, shipping_info: ShippingInfo) -> DomainResult<()> {
        self.execute(&OrderCommand::ChangeShippingInfo(ChangeShippingInfo {
            order_id: self.id,
            shipping_info,
            occurred_at: Utc::now(),
        }))
    }

    /// Mark the order shipped. Allowed from every state, including `Shipped`.
    pub fn change_shipped(&mut self) {
        let cmd = MarkShipped {
            order_id: self.id,
            occurred_at: Utc::now(),
        };
        let events = self.handle_mark_shipped(&cmd);
        self.record_all(events);
    }

    /// Cancel the order. Fails once the order is no longer shippable.
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.execute(&OrderCommand::CancelOrder(CancelOrder {
            order_id: self.id,
            occurred_at: Utc::now(),
        }))
    }

    /// Payment-completion hook. Changes nothing and records nothing.
    pub fn complete_payment(&mut self) {
        self.handle_complete_payment();
    }

    /// Decide, then apply and record, the events for `command`.
    ///
    /// A rejected command leaves the order untouched.
    pub fn execute(&mut self, command: &OrderCommand) -> DomainResult<()> {
        match self.decide_and_apply(command) {
            Ok(events) => {
                self.pending_events.extend(events);
                Ok(())
            }
            Err(error) => {
                warn!(
                    order_id = %self.id,
                    state = %self.state,
                    error = %error,
                    "order command rejected"
                );
                Err(error)
            }
        }
    }

    fn set_order_lines(&mut self, order_lines: Vec<OrderLine>) {
        self.total_amounts = calculate_total_amounts(&order_lines);
        self.order_lines = order_lines;
    }

    fn record_all(&mut self, events: Vec<OrderEvent>) {
        for event in &events {
            self.apply(event);
        }
        self.pending_events.extend(events);
    }
}

/// Validate the lines of a new or restored order and return their total.
fn checked_total_amounts(order_lines: &[OrderLine]) -> DomainResult<i64> {
    if order_lines.is_empty() {
        return Err(DomainError::validation(
            "at least one order line is required",
        ));
    }
    order_lines
        .iter()
        .try_fold(0i64, |acc, line| acc.checked_add(line.amount()))
        .ok_or_else(|| DomainError::validation("order total overflows"))
}

// Lines reaching here were checked by `checked_total_amounts`; saturate
// rather than panic for events applied directly.
fn calculate_total_amounts(order_lines: &[OrderLine]) -> i64 {
    order_lines
        .iter()
        .fold(0i64, |acc, line| acc.saturating_add(line.amount()))
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: PlaceOrder. Consumed by [`Order::place`] since no order exists yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub order_lines: Vec<OrderLine>,
    pub shipping_info: Option<ShippingInfo>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ChangeShippingInfo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeShippingInfo {
    pub order_id: OrderId,
    pub shipping_info: ShippingInfo,
    pub occurred_at: DateTime<Utc>,
}

/// Command: MarkShipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkShipped {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CancelOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOrder {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: CompletePayment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletePayment {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    ChangeShippingInfo(ChangeShippingInfo),
    MarkShipped(MarkShipped),
    CancelOrder(CancelOrder),
    CompletePayment(CompletePayment),
}

impl OrderCommand {
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderCommand::ChangeShippingInfo(c) => c.order_id,
            OrderCommand::MarkShipped(c) => c.order_id,
            OrderCommand::CancelOrder(c) => c.order_id,
            OrderCommand::CompletePayment(c) => c.order_id,
        }
    }
}

/// Event: OrderPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub order_lines: Vec<OrderLine>,
    pub shipping_info: ShippingInfo,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShippingInfoChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfoChanged {
    pub order_id: OrderId,
    pub shipping_info: ShippingInfo,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderShipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderShipped {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderCanceled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCanceled {
    pub order_id: OrderId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderPlaced(OrderPlaced),
    ShippingInfoChanged(ShippingInfoChanged),
    OrderShipped(OrderShipped),
    OrderCanceled(OrderCanceled),
}

impl Event for OrderEvent {
    type AggregateId = OrderId;

    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "ordering.order.placed",
            OrderEvent::ShippingInfoChanged(_) => "ordering.order.shipping_info_changed",
            OrderEvent::OrderShipped(_) => "ordering.order.shipped",
            OrderEvent::OrderCanceled(_) => "ordering.order.canceled",
        }
    }

    fn aggregate_id(&self) -> OrderId {
        match self {
            OrderEvent::OrderPlaced(e) => e.order_id,
            OrderEvent::ShippingInfoChanged(e) => e.order_id,
            OrderEvent::OrderShipped(e) => e.order_id,
            OrderEvent::OrderCanceled(e) => e.order_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(e) => e.occurred_at,
            OrderEvent::ShippingInfoChanged(e) => e.occurred_at,
            OrderEvent::OrderShipped(e) => e.occurred_at,
            OrderEvent::OrderCanceled(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Order {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::OrderPlaced(e) => {
                self.id = e.order_id;
                self.set_order_lines(e.order_lines.clone());
                self.shipping_info = e.shipping_info.clone();
                self.state = OrderState::PaymentWaiting;
            }
            OrderEvent::ShippingInfoChanged(e) => {
                self.shipping_info = e.shipping_info.clone();
            }
            OrderEvent::OrderShipped(_) => {
                self.state = OrderState::Shipped;
            }
            OrderEvent::OrderCanceled(_) => {
                self.state = OrderState::Cancel;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;

        debug!(
            order_id = %self.id,
            event_type = event.event_type(),
            state = %self.state,
            version = self.version,
            "applied order event"
        );
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        self.ensure_order_id(command.order_id())?;

        match command {
            OrderCommand::ChangeShippingInfo(cmd) => self.handle_change_shipping_info(cmd),
            OrderCommand::MarkShipped(cmd) => Ok(self.handle_mark_shipped(cmd)),
            OrderCommand::CancelOrder(cmd) => self.handle_cancel(cmd),
            OrderCommand::CompletePayment(_) => {
                self.handle_complete_payment();
                Ok(Vec::new())
            }
        }
    }
}

impl Order {
    fn ensure_order_id(&self, order_id: OrderId) -> Result<(), DomainError> {
        if self.id != order_id {
            return Err(DomainError::invariant("order_id mismatch"));
        }
        Ok(())
    }

    fn handle_change_shipping_info(
        &self,
        cmd: &ChangeShippingInfo,
    ) -> Result<Vec<OrderEvent>, DomainError> {
        if !self.state.is_shipping_changeable() {
            return Err(DomainError::illegal_state("shipping info cannot be changed"));
        }

        Ok(vec![OrderEvent::ShippingInfoChanged(ShippingInfoChanged {
            order_id: cmd.order_id,
            shipping_info: cmd.shipping_info.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    /// Shipping is unconditional, so this decision cannot fail.
    fn handle_mark_shipped(&self, cmd: &MarkShipped) -> Vec<OrderEvent> {
        vec![OrderEvent::OrderShipped(OrderShipped {
            order_id: cmd.order_id,
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_cancel(&self, cmd: &CancelOrder) -> Result<Vec<OrderEvent>, DomainError> {
        if !self.state.is_shipping_changeable() {
            return Err(DomainError::illegal_state(
                "cannot cancel an order that is already shipping",
            ));
        }

        Ok(vec![OrderEvent::OrderCanceled(OrderCanceled {
            order_id: cmd.order_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_complete_payment(&self) {
        debug!(
            order_id = %self.id,
            state = %self.state,
            "payment completion hook invoked; no state change"
        );
    }
}
