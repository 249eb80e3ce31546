use mockify_core::{
    FieldDef, GenerationError, Generator, RandomEngine, Schema, SequenceCounter, Value,
};

#[test]
fn constant_object_normalizes_to_nested() {
    let definition = FieldDef::from(serde_json::json!({"id": "x", "tags": ["a"]}));

    let FieldDef::Nested(schema) = definition else {
        panic!("expected nested definition");
    };
    assert!(matches!(schema.get("id"), Some(FieldDef::Constant(Value::Text(_)))));
    assert!(matches!(schema.get("tags"), Some(FieldDef::Constant(Value::List(_)))));
}

#[test]
fn nested_resolution_skips_children_without_value() {
    let schema = Schema::new()
        .field("kept", 1)
        .field("dropped", FieldDef::Unset)
        .field("never", Generator::partial("test.none", |_| Ok(None)));
    let mut engine = RandomEngine::seeded(1);

    let value = FieldDef::Nested(schema).resolve(&mut engine).unwrap().unwrap();

    let fields = value.as_object().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(value.get("kept"), Some(&Value::Int(1)));
}

#[test]
fn generators_are_invoked_per_resolution() {
    let counter = SequenceCounter::new();
    let shared = counter.clone();
    let generator = Generator::new("test.counter", move |_| Ok(Value::from(shared.next() as i64)))
        .with_counters([counter.clone()]);
    let definition = FieldDef::from(generator);
    let mut engine = RandomEngine::seeded(1);

    assert_eq!(counter.current(), 0);
    assert_eq!(definition.resolve(&mut engine).unwrap(), Some(Value::Int(1)));
    assert_eq!(definition.resolve(&mut engine).unwrap(), Some(Value::Int(2)));
}

#[test]
fn producer_errors_pass_through_unchanged() {
    let generator = Generator::from_fn(|_| {
        Err(GenerationError::producer(std::io::Error::other("boom")))
    });
    let mut engine = RandomEngine::seeded(1);

    let err = generator.generate(&mut engine).unwrap_err();

    assert_eq!(err.to_string(), "boom");
}

#[test]
fn schema_collects_nested_sequence_counters() {
    let counter = SequenceCounter::new();
    counter.next();
    let generator = Generator::constant(1).with_counters([counter.clone()]);
    let schema = Schema::new().field(
        "outer",
        Schema::new().field("inner", generator),
    );

    let counters = schema.sequence_counters();
    assert_eq!(counters.len(), 1);

    counters[0].reset();
    assert_eq!(counter.current(), 0);
}

#[test]
fn timestamps_serialize_as_rfc3339() {
    let at = chrono::DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
        .unwrap()
        .with_timezone(&chrono::Utc);

    let json = serde_json::to_string(&Value::Timestamp(at)).unwrap();

    assert_eq!(json, "\"2024-01-02T03:04:05.000Z\"");
    assert_eq!(Value::Timestamp(at).to_json(), serde_json::json!("2024-01-02T03:04:05.000Z"));
}
