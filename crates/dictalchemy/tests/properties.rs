use dictalchemy::prelude::*;
use proptest::prelude::*;

#[derive(Clone, Debug, Default, Dictable, PartialEq)]
#[dict(synonym(name = "secret", target = "_secret"))]
struct Sample {
    #[dict(primary_key)]
    id: i64,
    name: String,
    score: Option<i64>,
    active: bool,
    tags: Vec<String>,
    _secret: String,
    #[dict(property)]
    note: String,
}

const NAMES: [&str; 9] = [
    "_secret", "active", "id", "name", "note", "score", "secret", "tags", "unknown",
];

fn arb_sample() -> impl Strategy<Value = Sample> {
    (
        any::<i64>(),
        "[a-z]{0,8}",
        proptest::option::of(any::<i64>()),
        any::<bool>(),
        prop::collection::vec("[a-z]{1,4}", 0..4),
        "[a-z]{0,8}",
        "[a-z]{0,8}",
    )
        .prop_map(|(id, name, score, active, tags, secret, note)| Sample {
            id,
            name,
            score,
            active,
            tags,
            _secret: secret,
            note,
        })
}

fn arb_names() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(NAMES.to_vec(), 0..=NAMES.len())
}

proptest! {
    #[test]
    fn fromdict_of_asdict_restores_every_emitted_field(source in arb_sample()) {
        let data = source.asdict();
        let mut target = Sample::default();

        target
            .fromdict_with(&data, &FromDictOptions::new().allow_pk(true))
            .expect("own output is always applicable");

        prop_assert_eq!(target.asdict(), data);
        prop_assert_eq!(target.id, source.id);
        prop_assert_eq!(target._secret, source._secret);
    }

    #[test]
    fn exclude_always_dominates_include(
        sample in arb_sample(),
        exclude in arb_names(),
        include in arb_names(),
    ) {
        let data = sample
            .asdict_with(
                &AsDictOptions::new()
                    .exclude(exclude.iter().copied())
                    .include(include.iter().copied()),
            )
            .expect("no follow");

        for name in &exclude {
            prop_assert!(!data.contains_key(*name), "{} leaked", name);
        }
        for name in &include {
            // underscore names stay hidden by default; "unknown" is never exposed
            let exposed = !exclude.contains(name) && !name.starts_with('_') && *name != "unknown";
            prop_assert_eq!(data.contains_key(*name), exposed, "{}", name);
        }
    }

    #[test]
    fn iter_dict_agrees_with_asdict(sample in arb_sample()) {
        let pairs: DictMap = sample.iter_dict().collect();
        prop_assert_eq!(pairs, sample.asdict());
    }
}
