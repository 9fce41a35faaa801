///
/// ColumnModel
/// One storage column backing a column property.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnModel {
    /// Storage column name (may differ from the attribute name).
    pub name: &'static str,
    /// Whether the column participates in the primary key.
    pub primary_key: bool,
}

impl ColumnModel {
    #[must_use]
    pub const fn new(name: &'static str, primary_key: bool) -> Self {
        Self { name, primary_key }
    }
}

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    One,
    Many,
}

///
/// FieldKind
///
/// The three disjoint property kinds a mapped entity can declare.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Column-backed property over one or more storage columns.
    Column { columns: &'static [ColumnModel] },

    /// Alternate accessor name for another field.
    Synonym { target: &'static str },

    /// Reference to one or many instances of another entity.
    Relationship { cardinality: Cardinality },
}

///
/// FieldModel
/// Runtime field metadata consumed by the conversion layer.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldModel {
    /// Attribute name as used in plain mappings.
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn column(name: &'static str, columns: &'static [ColumnModel]) -> Self {
        Self {
            name,
            kind: FieldKind::Column { columns },
        }
    }

    #[must_use]
    pub const fn synonym(name: &'static str, target: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Synonym { target },
        }
    }

    #[must_use]
    pub const fn relationship(name: &'static str, cardinality: Cardinality) -> Self {
        Self {
            name,
            kind: FieldKind::Relationship { cardinality },
        }
    }

    #[must_use]
    pub const fn is_column(&self) -> bool {
        matches!(self.kind, FieldKind::Column { .. })
    }

    #[must_use]
    pub const fn is_synonym(&self) -> bool {
        matches!(self.kind, FieldKind::Synonym { .. })
    }

    #[must_use]
    pub const fn is_relationship(&self) -> bool {
        matches!(self.kind, FieldKind::Relationship { .. })
    }

    /// A column property is part of the primary key if ANY of its columns is.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        match self.kind {
            FieldKind::Column { columns } => columns.iter().any(|c| c.primary_key),
            FieldKind::Synonym { .. } | FieldKind::Relationship { .. } => false,
        }
    }

    #[must_use]
    pub fn is_underscore(&self) -> bool {
        self.name.starts_with('_')
    }
}
