use crate::model::field::FieldModel;
use std::collections::BTreeSet;

/// Field-name set returned by the model accessors.
///
/// Sorted so that every traversal driven by it is deterministic.
pub type FieldSet = BTreeSet<&'static str>;

///
/// EntityModel
/// Statically declared runtime model for one entity type.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (registry key and diagnostics).
    pub path: &'static str,
    /// Short external name used in error messages.
    pub entity_name: &'static str,
    /// Declared fields; names are unique and kinds are disjoint.
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn column_fields(&self) -> FieldSet {
        self.select(FieldModel::is_column)
    }

    #[must_use]
    pub fn synonym_fields(&self) -> FieldSet {
        self.select(FieldModel::is_synonym)
    }

    #[must_use]
    pub fn relationship_fields(&self) -> FieldSet {
        self.select(FieldModel::is_relationship)
    }

    #[must_use]
    pub fn primary_key_fields(&self) -> FieldSet {
        self.select(FieldModel::is_primary_key)
    }

    /// Every field whose name starts with `_`, across all kinds.
    #[must_use]
    pub fn underscore_fields(&self) -> FieldSet {
        self.select(FieldModel::is_underscore)
    }

    #[must_use]
    pub fn is_relationship(&self, name: &str) -> bool {
        self.field(name).is_some_and(FieldModel::is_relationship)
    }

    fn select(&self, pred: impl Fn(&FieldModel) -> bool) -> FieldSet {
        self.fields
            .iter()
            .filter(|field| pred(field))
            .map(|field| field.name)
            .collect()
    }
}

///
/// TESTS
///
