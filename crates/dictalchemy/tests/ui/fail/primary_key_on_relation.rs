use dictalchemy::prelude::*;

#[derive(Dictable)]
struct Node {
    #[dict(primary_key)]
    id: u64,
    #[dict(primary_key, relation)]
    parent: Option<Box<Node>>,
}

fn main() {}
