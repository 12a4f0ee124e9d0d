//! `orderkit-core` — domain building blocks shared by the ordering model.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use value_object::ValueObject;
