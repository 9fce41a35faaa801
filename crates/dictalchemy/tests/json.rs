use dictalchemy::{ErrorKind, prelude::*};

#[derive(Clone, Debug, Default, Dictable, PartialEq)]
struct Track {
    #[dict(primary_key)]
    id: u32,
    title: String,
    length: f64,
    #[dict(relation)]
    artist: Option<Artist>,
}

#[derive(Clone, Debug, Default, Dictable, PartialEq)]
struct Artist {
    #[dict(primary_key)]
    id: u32,
    name: String,
    aliases: Vec<String>,
}

fn track() -> Track {
    Track {
        id: 7,
        title: "Glass".to_string(),
        length: 183.5,
        artist: Some(Artist {
            id: 2,
            name: "Ana".to_string(),
            aliases: vec!["A".to_string()],
        }),
    }
}

fn value(json: &str) -> Value {
    serde_json::from_str(json).expect("test json should decode")
}

#[test]
fn asdict_serializes_to_plain_json() {
    let data = track()
        .asdict_with(&AsDictOptions::new().follow(["artist"]))
        .expect("artist is a relation");

    let json = serde_json::to_value(&data).expect("plain mapping serializes");
    assert_eq!(
        json,
        serde_json::json!({
            "artist": {"aliases": ["A"], "id": 2, "name": "Ana"},
            "id": 7,
            "length": 183.5,
            "title": "Glass",
        })
    );
}

#[test]
fn json_payload_updates_entity() {
    let mut entity = track();
    let payload: DictMap =
        serde_json::from_str(r#"{"title": "Glass (live)", "length": 201.0}"#)
            .expect("payload should decode");

    entity.fromdict(&payload).expect("plain update");

    assert_eq!(entity.title, "Glass (live)");
    assert!((entity.length - 201.0).abs() < f64::EPSILON);
}

#[test]
fn whole_number_payload_updates_float_field() {
    let mut entity = track();
    let payload: DictMap =
        serde_json::from_str(r#"{"length": 200}"#).expect("payload should decode");

    entity.fromdict(&payload).expect("an integer is a valid float");

    assert!((entity.length - 200.0).abs() < f64::EPSILON);
}

#[test]
fn unsigned_key_mapping_round_trips_through_json() {
    let data = track()
        .asdict_with(&AsDictOptions::new().follow(["artist"]))
        .expect("artist is a relation");

    let text = serde_json::to_string(&data).expect("plain mapping serializes");
    let decoded: DictMap = serde_json::from_str(&text).expect("own output decodes");
    assert_eq!(decoded, data);

    let mut restored = Track::default();
    restored
        .fromdict_with(&decoded, &FromDictOptions::new().allow_pk(true))
        .expect("own output is applicable");
    assert_eq!(restored.id, 7);
}

#[test]
fn keyword_bundle_drives_asdict() {
    let options = AsDictOptions::try_from(&value(
        r#"{"exclude": ["length"], "follow": {"artist": {"exclude": ["aliases"]}}}"#,
    ))
    .expect("bundle parses");

    let data = track().asdict_with(&options).expect("artist is a relation");
    assert_eq!(
        serde_json::to_value(&data).expect("plain mapping serializes"),
        serde_json::json!({"artist": {"id": 2, "name": "Ana"}, "id": 7, "title": "Glass"})
    );
}

#[test]
fn keyword_bundle_drives_fromdict() {
    let options = FromDictOptions::try_from(&value(r#"{"allow_pk": true, "follow": ["artist"]}"#))
        .expect("bundle parses");

    let mut entity = track();
    entity
        .fromdict_with(
            &serde_json::from_str(r#"{"artist": {"name": "Anna"}, "id": 8}"#)
                .expect("payload should decode"),
            &options,
        )
        .expect("pk allowed, artist followed");

    assert_eq!(entity.id, 8);
    assert_eq!(entity.artist.map(|artist| artist.name), Some("Anna".to_string()));
}

#[test]
fn malformed_follow_is_rejected() {
    let err = AsDictOptions::try_from(&value(r#"{"follow": "artist"}"#))
        .expect_err("a bare string is not a follow spec");

    assert_eq!(err.kind(), ErrorKind::MalformedFollowSpec);
}
