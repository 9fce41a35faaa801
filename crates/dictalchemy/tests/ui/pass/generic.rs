use dictalchemy::prelude::*;

#[derive(Dictable)]
struct Wrapper<T: Dictable> {
    #[dict(primary_key)]
    id: u64,
    #[dict(relation)]
    inner: Option<T>,
}

#[derive(Dictable)]
struct Leaf {
    #[dict(primary_key)]
    id: u64,
}

fn main() {
    let wrapper = Wrapper {
        id: 1,
        inner: Some(Leaf { id: 2 }),
    };
    let _ = wrapper.asdict_with(&AsDictOptions::new().follow(["inner"]));
}
