//! Lifecycle of a value-holding box: construction, copy, move, assignment and
//! destruction of an entity owning a single heap slot.

pub mod id;
pub mod scope;
pub mod value;
pub mod value_box;
