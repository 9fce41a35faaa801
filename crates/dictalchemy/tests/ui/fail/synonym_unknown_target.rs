use dictalchemy::prelude::*;

#[derive(Dictable)]
#[dict(synonym(name = "label", target = "_missing"))]
struct Record {
    #[dict(primary_key)]
    id: u64,
}

fn main() {}
