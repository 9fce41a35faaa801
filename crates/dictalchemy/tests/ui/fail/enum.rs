use dictalchemy::prelude::*;

#[derive(Dictable)]
enum Shape {
    Circle,
}

fn main() {}
