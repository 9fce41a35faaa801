use dictalchemy::prelude::*;

#[derive(Dictable)]
struct Minimal {
    #[dict(primary_key)]
    id: u64,
}

fn main() {
    let entity = Minimal { id: 1 };
    let data = entity.asdict();
    assert_eq!(data.get("id"), Some(&Value::Int(1)));
}
