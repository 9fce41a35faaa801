use thiserror::Error as ThisError;

///
/// ErrorKind
///
/// Stable classification of `DictError` leaves.
/// Every kind is a caller or configuration mistake; none is transient.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A `follow` key names a field that is not a relationship, or a
    /// followed entity lacks the requested serializer.
    Configuration,
    /// `fromdict` received a primary-key field without opt-in.
    PrimaryKeyProtection,
    /// A `follow` argument (or option bundle) could not be normalized.
    MalformedFollowSpec,
    /// A value could not be stored into, or read as, the expected shape.
    InvalidValue,
}

///
/// DictError
///
/// Structured failures raised by `asdict` / `fromdict`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DictError {
    #[error("key '{field}' in parameter 'follow' is not a relationship of {entity}")]
    NotARelationship { entity: &'static str, field: String },

    #[error(
        "primary key '{field}' of {entity} cannot be updated by fromdict; \
         set fromdict_allow_pk on the entity or pass allow_pk"
    )]
    PrimaryKeyProtected { entity: &'static str, field: String },

    #[error("malformed follow spec: expected a map or a list of names, found {found}")]
    MalformedFollowSpec { found: &'static str },

    #[error("invalid option '{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    #[error("invalid value for {entity}.{field}: expected {expected}, found {found}")]
    InvalidValue {
        entity: &'static str,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{entity} has no serializer named '{method}'")]
    UnknownMethod { entity: &'static str, method: String },

    #[error("cannot coerce {found} to a plain mapping")]
    NotMappable { found: &'static str },

    #[error("conversion failed at {path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },
}

impl DictError {
    /// Classify the innermost error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.leaf() {
            Self::NotARelationship { .. } | Self::UnknownMethod { .. } => ErrorKind::Configuration,
            Self::PrimaryKeyProtected { .. } => ErrorKind::PrimaryKeyProtection,
            Self::MalformedFollowSpec { .. } | Self::InvalidOption { .. } => {
                ErrorKind::MalformedFollowSpec
            }
            Self::InvalidValue { .. } | Self::NotMappable { .. } | Self::Context { .. } => {
                ErrorKind::InvalidValue
            }
        }
    }

    /// Prepend a relation segment to the error path.
    #[must_use]
    pub fn with_field(self, field: impl AsRef<str>) -> Self {
        self.with_path_segment(field.as_ref())
    }

    /// Prepend a collection index segment to the error path.
    #[must_use]
    pub fn with_index(self, index: usize) -> Self {
        self.with_path_segment(format!("[{index}]"))
    }

    /// Return the full relation path, if the error was raised while following.
    #[must_use]
    pub const fn path(&self) -> Option<&str> {
        match self {
            Self::Context { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Return the innermost, non-context error variant.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            _ => self,
        }
    }

    #[must_use]
    fn with_path_segment(self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        match self {
            Self::Context { path, source } => Self::Context {
                path: Self::join_segments(segment.as_str(), path.as_str()),
                source,
            },
            source => Self::Context {
                path: segment,
                source: Box::new(source),
            },
        }
    }

    #[must_use]
    fn join_segments(prefix: &str, suffix: &str) -> String {
        if suffix.starts_with('[') {
            format!("{prefix}{suffix}")
        } else {
            format!("{prefix}.{suffix}")
        }
    }
}

///
/// AttrError
///
/// Outcome of a failed `Entity::set_attr`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum AttrError {
    #[error("unknown attribute")]
    Unknown,

    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

///
/// TESTS
///
