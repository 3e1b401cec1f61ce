//! Cart domain: value objects, aggregates and the events that drive them.
pub mod aggregates;
pub mod events;
pub mod value_objects;
