use dictalchemy::prelude::*;

#[derive(Dictable)]
struct Tuple(u64);

fn main() {}
