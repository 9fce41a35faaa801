use syn::{GenericArgument, PathArguments, Type};

// sequence and set containers followed as lists
const LIST_WRAPPERS: &[&str] = &["Vec", "VecDeque", "LinkedList", "BTreeSet", "HashSet", "IndexSet"];

// map containers followed as keyed mappings
const MAP_WRAPPERS: &[&str] = &["BTreeMap", "HashMap", "IndexMap"];

///
/// RelationShape
/// Container layout of a relation field.
///

#[derive(Clone, Copy)]
pub enum RelationShape {
    /// `T` or `Box<T>`
    One { boxed: bool },
    /// `Option<T>` or `Option<Box<T>>`
    Opt { boxed: bool },
    /// `Vec<T>`, `VecDeque<T>`, a set of `T`, or the boxed forms
    Many { boxed: bool },
    /// `BTreeMap<K, T>` / `HashMap<K, T>`, keyed by `K: ToString`
    Keyed { boxed: bool },
}

impl RelationShape {
    pub fn classify(ty: &Type) -> Self {
        if let Some(inner) = generic_inner(ty, "Option") {
            Self::Opt {
                boxed: is_path_ident(inner, "Box"),
            }
        } else if let Some(inner) = LIST_WRAPPERS
            .iter()
            .find_map(|wrapper| generic_arg(ty, wrapper, 0))
        {
            Self::Many {
                boxed: is_path_ident(inner, "Box"),
            }
        } else if let Some(inner) = MAP_WRAPPERS
            .iter()
            .find_map(|wrapper| generic_arg(ty, wrapper, 1))
        {
            Self::Keyed {
                boxed: is_path_ident(inner, "Box"),
            }
        } else {
            Self::One {
                boxed: is_path_ident(ty, "Box"),
            }
        }
    }

    pub const fn is_many(self) -> bool {
        matches!(self, Self::Many { .. } | Self::Keyed { .. })
    }
}

fn is_path_ident(ty: &Type, ident: &str) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == ident)
}

fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    generic_arg(ty, wrapper, 0)
}

// nth type argument of `Wrapper<A, B, ..>`
fn generic_arg<'a>(ty: &'a Type, wrapper: &str, position: usize) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(inner) => Some(inner),
            _ => None,
        })
        .nth(position)
}
