//! Core runtime for Dictalchemy: entity descriptors, values, the `Dictable`
//! capability, configuration resolution, and the `asdict` / `fromdict`
//! conversions exported via the `prelude`.
#![warn(unreachable_pub)]

extern crate self as dictalchemy;

// public exports are one module level down
pub mod config;
pub mod convert;
pub mod error;
pub mod follow;
pub mod model;
pub mod obs;
pub mod options;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or resolver helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::{DictConfig, make_dictable},
        follow::FollowSpec,
        model::{entity::EntityModel, field::FieldModel},
        options::{AsDictOptions, FromDictOptions},
        traits::{Dictable, Entity, EntitySchema, FieldValue},
        value::{DictMap, Value},
    };
}
