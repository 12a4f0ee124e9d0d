//! Domain events emitted by aggregates.

pub mod event;

pub use event::Event;
