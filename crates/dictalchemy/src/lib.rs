//! ## Crate layout
//! - `config`: class-level configuration, the `make_dictable` registry, and the resolver.
//! - `convert`: the `asdict` / `fromdict` conversions and `DictIter`.
//! - `error`: `DictError`, `ErrorKind`, and `AttrError`.
//! - `follow`: relation traversal specs.
//! - `model`: static entity and field descriptors.
//! - `obs`: conversion metrics and sink overrides.
//! - `options`: per-call `asdict` / `fromdict` options.
//! - `traits`: `Entity`, `EntitySchema`, `Dictable`, and `FieldValue`.
//! - `value`: `Value` and the `DictMap` plain mapping.
//!
//! `#[derive(Dictable)]` generates the model and accessors; the `prelude`
//! brings the derive and the conversion vocabulary into scope.

pub use dictalchemy_core::{
    config, convert, error, follow, model, obs, options, traits, value,
};
pub use dictalchemy_derive::Dictable;

// export so the derive output resolves inside this crate too
extern crate self as dictalchemy;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Errors
//

pub use error::{DictError, ErrorKind};

///
/// Prelude
/// The derive shares its name with the `Dictable` trait, like serde's derives.
///

pub mod prelude {
    pub use crate::Dictable;
    pub use dictalchemy_core::prelude::*;
}
