use dictalchemy::prelude::*;

#[derive(Dictable)]
#[dict(excludes = ["a"])]
struct Record {
    #[dict(primary_key)]
    id: u64,
}

fn main() {}
