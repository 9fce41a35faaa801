//! The dict conversions behind the `Dictable` capability.
//!
//! Every call recomputes its field selection from the entity's model and the
//! current class configuration; nothing is cached across calls.

mod asdict;
mod fromdict;
mod iter;


pub use asdict::{asdict, asdict_fields};
pub use fromdict::fromdict;
pub use iter::DictIter;
