use dictalchemy::{DictError, prelude::*};
use std::collections::{BTreeMap, VecDeque};

fn plain(entity: &Everything, options: &AsDictOptions) -> Result<DictMap, DictError> {
    entity.asdict_with(options)
}

#[derive(Default, Dictable)]
struct Child {
    #[dict(primary_key)]
    id: u64,
}

#[derive(Default, Dictable)]
#[dict(
    entity_name = "Everything",
    exclude = ["hidden"],
    exclude_underscore = false,
    fromdict_allow_pk = true,
    asdict_include = ["label"],
    fromdict_include = ["label"],
    synonym(name = "alias", target = "_raw"),
    serializer(name = "plain", with = "plain")
)]
struct Everything {
    #[dict(primary_key, column = "everything_id")]
    id: u64,
    hidden: String,
    _raw: String,
    #[dict(property)]
    label: String,
    #[dict(skip)]
    scratch: std::collections::HashMap<u8, u8>,
    #[dict(relation)]
    one: Child,
    #[dict(relation)]
    boxed: Box<Child>,
    #[dict(relation)]
    maybe: Option<Child>,
    #[dict(relation)]
    maybe_boxed: Option<Box<Child>>,
    #[dict(relation)]
    many: Vec<Child>,
    #[dict(relation)]
    many_boxed: Vec<Box<Child>>,
    #[dict(relation)]
    queued: VecDeque<Child>,
    #[dict(relation)]
    keyed: BTreeMap<String, Box<Child>>,
}

fn main() {
    let entity = Everything::default();
    let _ = entity.scratch.len();
    let _ = entity.asdict_with(&AsDictOptions::new().follow([
        "boxed",
        "many",
        "many_boxed",
        "maybe",
        "maybe_boxed",
        "one",
        "queued",
        "keyed",
    ]));
    let _ = entity.asdict_via("plain", &AsDictOptions::new());
}
