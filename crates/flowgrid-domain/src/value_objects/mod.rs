//! Value objects
//!
//! Small immutable types shared across layers.

pub mod service_kind;
pub mod variable;

pub use service_kind::ServiceKind;
pub use variable::{Variable, VariableKind};
