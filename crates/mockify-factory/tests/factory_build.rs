use chrono::{TimeZone, Utc};
use serde::Deserialize;
use uuid::Uuid;

use mockify_core::{FieldDef, GenerationError, Generator, RandomEngine, Schema, Value};
use mockify_factory::{
    BuildOptions, BuildRequest, Factory, FactoryConfig, FactoryError, auto_factory, factory,
};
use mockify_generate::generators::{collection, special, string};

fn engine(seed: u64) -> RandomEngine {
    let reference = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    RandomEngine::seeded(seed).with_reference_time(reference)
}

fn is_uuid_v4(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|text| Uuid::parse_str(text).ok())
        .is_some_and(|id| id.get_version_num() == 4)
}

fn user_factory() -> Factory {
    factory(
        Schema::new()
            .field("id", special::uuid())
            .field("isActive", true),
    )
    .with_trait("inactive", Schema::new().field("isActive", false))
}

#[test]
fn builds_schema_fields_in_order() {
    let mut rng = engine(1);
    let record = user_factory().build_with(&mut rng, ()).unwrap();

    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "isActive"]);
    assert!(is_uuid_v4(record.get("id").unwrap()));
    assert_eq!(record.get("isActive"), Some(&Value::Bool(true)));
}

#[test]
fn trait_values_shadow_the_schema() {
    let mut rng = engine(1);
    let record = user_factory().build_with(&mut rng, "inactive").unwrap();

    assert_eq!(record.get("isActive"), Some(&Value::Bool(false)));
    assert!(is_uuid_v4(record.get("id").unwrap()));
}

#[test]
fn overrides_beat_traits_and_schema() {
    let users = factory(Schema::new().field("status", "schema"))
        .with_trait("flagged", Schema::new().field("status", "trait"));
    let mut rng = engine(3);

    let plain = users.build_with(&mut rng, ()).unwrap();
    let traited = users.build_with(&mut rng, "flagged").unwrap();
    let overridden = users
        .build_with(
            &mut rng,
            BuildRequest::for_trait("flagged").set("status", "override"),
        )
        .unwrap();

    assert_eq!(plain.get("status"), Some(&Value::from("schema")));
    assert_eq!(traited.get("status"), Some(&Value::from("trait")));
    assert_eq!(overridden.get("status"), Some(&Value::from("override")));
}

#[test]
fn trait_without_value_falls_through_to_schema() {
    let users = factory(Schema::new().field("role", "member"))
        .with_trait("quiet", Schema::new().field("role", FieldDef::Unset));
    let mut rng = engine(3);

    let record = users.build_with(&mut rng, "quiet").unwrap();

    assert_eq!(record.get("role"), Some(&Value::from("member")));
}

#[test]
fn override_without_value_omits_the_field() {
    let users = factory(Schema::new().field("email", special::email()));
    let mut rng = engine(3);

    let record = users
        .build_with(&mut rng, BuildRequest::new().set("email", FieldDef::Unset))
        .unwrap();

    assert!(!record.contains_key("email"));
}

#[test]
fn unknown_trait_builds_from_the_schema() {
    let mut rng = engine(5);
    let record = user_factory().build_with(&mut rng, "missing").unwrap();

    assert_eq!(record.get("isActive"), Some(&Value::Bool(true)));
}

#[test]
fn candidate_fields_follow_layer_order() {
    let users = factory(Schema::new().field("a", 1))
        .with_trait("extra", Schema::new().field("b", 2))
        .with_field_names(["d", "a"]);
    let mut rng = engine(5);

    let record = users
        .build_with(&mut rng, BuildRequest::for_trait("extra").set("c", 3))
        .unwrap();

    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
}

#[test]
fn nested_objects_resolve_their_generators() {
    let users = factory(Schema::new().field(
        "profile",
        Schema::new()
            .field("bio", string::sentence(None))
            .field("theme", "dark"),
    ));
    let mut rng = engine(8);

    let record = users.build_with(&mut rng, ()).unwrap();
    let profile = record.get("profile").unwrap();

    assert!(matches!(profile.get("bio"), Some(Value::Text(_))));
    assert_eq!(profile.get("theme"), Some(&Value::from("dark")));
}

#[test]
fn seeded_builds_are_reproducible_across_engines() {
    let users = user_factory().with_field_names(["email", "createdAt", "price"]);
    let request = BuildRequest::new().with_seed(42);

    let first = users.build_with(&mut engine(1), request.clone()).unwrap();
    let second = users.build_with(&mut engine(999), request).unwrap();

    assert_eq!(first, second);
}

#[test]
fn seeded_build_leaves_the_engine_untouched() {
    let users = user_factory();
    let mut rng = engine(7);
    let mut untouched = engine(7);

    users
        .build_with(&mut rng, BuildOptions::seeded(42))
        .unwrap();

    assert_eq!(rng.seed(), untouched.seed());
    assert_eq!(rng.random(), untouched.random());
}

#[test]
fn seeded_build_many_repeats_the_same_record() {
    let users = user_factory();
    let mut rng = engine(7);

    let records = users
        .build_many_with(&mut rng, 3, BuildOptions::seeded(11))
        .unwrap();

    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|record| record == &records[0]));
}

#[test]
fn build_many_resolves_each_record_independently() {
    let mut rng = engine(21);
    let records = user_factory().build_many_with(&mut rng, 5, ()).unwrap();

    let mut ids: Vec<&str> = records
        .iter()
        .filter_map(|record| record.get("id").and_then(Value::as_str))
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[test]
fn with_trait_and_extend_leave_the_receiver_unchanged() {
    let base = factory(Schema::new().field("a", 1));
    let extended = base.extend(Schema::new().field("a", 2).field("b", 3));
    let traited = base.with_trait("t", Schema::new().field("a", 4));
    let mut rng = engine(2);

    let record = base.build_with(&mut rng, "t").unwrap();

    assert_eq!(record.get("a"), Some(&Value::Int(1)));
    assert!(!record.contains_key("b"));
    assert!(base.trait_definition("t").is_none());
    assert!(traited.trait_definition("t").is_some());
    assert_eq!(
        extended.build_with(&mut rng, ()).unwrap().get("a"),
        Some(&Value::Int(2))
    );
}

#[test]
fn extend_deep_merges_nested_objects() {
    let base = factory(Schema::new().field(
        "a",
        Schema::new().field("x", 1).field("y", 2),
    ));
    let patched = base.extend(Schema::new().field(
        "a",
        Schema::new().field("y", 20).field("z", 3),
    ));
    let mut rng = engine(2);

    let record = patched.build_with(&mut rng, ()).unwrap();
    let nested = record.get("a").and_then(Value::as_object).unwrap();

    assert_eq!(nested.keys().map(String::as_str).collect::<Vec<_>>(), vec!["x", "y", "z"]);
    assert_eq!(nested.get("y"), Some(&Value::Int(20)));
    assert_eq!(nested.get("x"), Some(&Value::Int(1)));
}

#[test]
fn extend_keeps_traits() {
    let extended = user_factory().extend(Schema::new().field("role", "admin"));
    let mut rng = engine(2);

    let record = extended.build_with(&mut rng, "inactive").unwrap();

    assert_eq!(record.get("isActive"), Some(&Value::Bool(false)));
    assert_eq!(record.get("role"), Some(&Value::from("admin")));
}

#[test]
fn auto_factory_infers_from_field_names() {
    let mut rng = engine(4);
    let record = auto_factory(["user_id", "video"])
        .build_with(&mut rng, ())
        .unwrap();

    assert!(is_uuid_v4(record.get("user_id").unwrap()));
    assert!(matches!(record.get("video"), Some(Value::Text(_))));
}

#[test]
fn disabled_inference_omits_undefined_fields() {
    let users = Factory::from_field_names(["email", "createdAt"]).with_config(FactoryConfig {
        smart_inference: false,
    });
    let mut rng = engine(4);

    let record = users.build_with(&mut rng, ()).unwrap();

    assert!(record.is_empty());
}

#[test]
fn producer_errors_propagate_undecorated() {
    let broken = factory(Schema::new().field(
        "token",
        Generator::from_fn(|_| Err(GenerationError::producer(std::io::Error::other("boom")))),
    ));
    let mut rng = engine(4);

    let result = broken.build_with(&mut rng, ());

    assert!(matches!(result, Err(FactoryError::Generation(_))));
    assert_eq!(result.unwrap_err().to_string(), "boom");
}

#[test]
fn reset_sequences_rewinds_schema_and_trait_counters() {
    let orders = factory(Schema::new().field(
        "number",
        collection::sequence(|n| Value::from(n as i64)),
    ))
    .with_trait(
        "labelled",
        Schema::new().field(
            "label",
            collection::sequence(|n| Value::from(format!("order-{n}"))),
        ),
    );
    let mut rng = engine(6);

    orders.build_with(&mut rng, "labelled").unwrap();
    let second = orders.build_with(&mut rng, "labelled").unwrap();
    assert_eq!(second.get("number"), Some(&Value::Int(2)));

    orders.reset_sequences();
    let rewound = orders.build_with(&mut rng, "labelled").unwrap();

    assert_eq!(rewound.get("number"), Some(&Value::Int(1)));
    assert_eq!(rewound.get("label"), Some(&Value::from("order-1")));
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    id: String,
    is_active: bool,
}

#[test]
fn build_into_decodes_a_typed_record() {
    let user: User = user_factory()
        .build_into(BuildRequest::new().with_seed(9))
        .unwrap();

    assert!(Uuid::parse_str(&user.id).is_ok());
    assert!(user.is_active);
}

#[test]
fn build_into_reports_shape_mismatch() {
    let result: Result<User, _> = factory(Schema::new().field("id", 5)).build_into(());

    assert!(matches!(result, Err(FactoryError::Decode(_))));
}

#[test]
fn successive_extends_accumulate_nested_keys() {
    let base = factory(Schema::new().field("a", Schema::new().field("z", 0)));
    let patched = base
        .extend(Schema::new().field("a", Schema::new().field("x", 1)))
        .extend(Schema::new().field("a", Schema::new().field("y", 2)));
    let mut rng = engine(2);

    let record = patched.build_with(&mut rng, ()).unwrap();
    let nested = record.get("a").and_then(Value::as_object).unwrap();

    assert_eq!(nested.keys().map(String::as_str).collect::<Vec<_>>(), vec!["z", "x", "y"]);
    assert_eq!(nested.get("z"), Some(&Value::Int(0)));
}

#[test]
fn removing_every_layer_falls_back_to_inference() {
    let users = Factory::from_field_names(["email"]);
    let mut rng = engine(12);

    let record = users.build_with(&mut rng, ()).unwrap();

    let email = record.get("email").and_then(Value::as_str).unwrap();
    assert!(email.contains('@'));
}

#[test]
fn failed_seeded_build_still_restores_the_engine() {
    let broken = factory(Schema::new().field(
        "token",
        Generator::from_fn(|rng| {
            rng.random();
            Err(GenerationError::producer(std::io::Error::other("boom")))
        }),
    ));
    let mut rng = engine(7);
    let mut untouched = engine(7);

    assert!(broken.build_with(&mut rng, BuildOptions::seeded(3)).is_err());

    assert_eq!(rng.seed(), 7);
    assert_eq!(rng.random(), untouched.random());
}

#[test]
fn nested_factory_follows_the_outer_seed_and_sequences() {
    let lines = factory(Schema::new().field(
        "line",
        collection::sequence(|n| Value::from(n as i64)),
    ));
    let orders = factory(Schema::new().field("id", special::uuid()))
        .extend(Schema::new().field("item", lines.as_generator(())));
    let mut rng = engine(10);

    let first = orders
        .build_with(&mut rng, BuildOptions::seeded(1))
        .unwrap();
    let second = orders.build_with(&mut rng, ()).unwrap();
    assert_eq!(
        second.get("item").and_then(|item| item.get("line")),
        Some(&Value::Int(2))
    );

    orders.reset_sequences();
    let replayed = orders
        .build_with(&mut rng, BuildOptions::seeded(1))
        .unwrap();

    assert_eq!(first, replayed);
}

#[test]
fn nested_factory_errors_pass_through() {
    let broken = factory(Schema::new().field(
        "token",
        Generator::from_fn(|_| Err(GenerationError::producer(std::io::Error::other("boom")))),
    ));
    let outer = factory(Schema::new().field("inner", broken));
    let mut rng = engine(4);

    let result = outer.build_with(&mut rng, ());

    assert_eq!(result.unwrap_err().to_string(), "boom");
}
