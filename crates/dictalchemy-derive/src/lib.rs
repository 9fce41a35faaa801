use proc_macro::TokenStream;

mod attrs;
mod dictable;
mod util;

/// Derive `EntitySchema`, `Entity` and `Dictable` for a struct with named fields.
///
/// Struct options: `#[dict(entity_name = "..", exclude = [..],
/// exclude_underscore = bool, fromdict_allow_pk = bool, asdict_include = [..],
/// fromdict_include = [..], synonym(name = "..", target = ".."),
/// serializer(name = "..", with = "path::to::fn"))]`.
///
/// A serializer is `fn(&Self, &AsDictOptions) -> Result<DictMap, DictError>`;
/// it converts followed relations when a parent call passes its name as
/// `method`.
///
/// Relation containers: `T`, `Box<T>`, `Option<T>`, `Option<Box<T>>`,
/// `Vec<T>`, `VecDeque<T>`, `LinkedList<T>`, `BTreeSet<T>`, `HashSet<T>`,
/// `IndexSet<T>` (followed as lists) and `BTreeMap<K, T>`, `HashMap<K, T>`,
/// `IndexMap<K, T>` (followed as maps keyed by `K: ToString`).
///
/// Field options: `#[dict(primary_key)]`, `#[dict(column = "..")]`,
/// `#[dict(relation)]`, `#[dict(property)]`, `#[dict(skip)]`.
#[proc_macro_derive(Dictable, attributes(dict))]
pub fn derive_dictable(input: TokenStream) -> TokenStream {
    dictable::derive_dictable(input.into()).into()
}
