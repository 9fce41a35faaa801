//! Runtime descriptor tables for mapped entities.
//!
//! A model is declared once per entity type (usually by `#[derive(Dictable)]`)
//! and is the only metadata the conversion layer reads:
//! - `field` describes one mapped property and its kind
//! - `entity` groups the fields and answers the field-set queries
pub mod entity;
pub mod field;
