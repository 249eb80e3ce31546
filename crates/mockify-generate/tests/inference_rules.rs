use regex::Regex;

use mockify_core::{RandomEngine, Value};
use mockify_generate::InferenceError;
use mockify_generate::generators::special;
use mockify_generate::inference::{
    self, BUILTIN_PATTERNS, PatternDef, PatternTable, find_rule_for_field, infer_generator,
    infer_generators_for_schema, is_boolean_field, is_date_field, is_id_field, is_numeric_field,
};

const UUID_V4: &str = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

fn label(name: &str) -> Option<&'static str> {
    find_rule_for_field(name).map(|rule| rule.label())
}

#[test]
fn conflict_table_resolves_by_priority() {
    let cases: &[(&str, Option<&str>)] = &[
        ("id", Some("special.uuid")),
        ("uuid", Some("special.uuid")),
        ("user_id", Some("special.uuid")),
        ("userId", Some("special.uuid")),
        ("userID", Some("special.uuid")),
        ("orderID", Some("special.uuid")),
        ("email", Some("special.email")),
        ("contactEmail", Some("special.email")),
        ("emailAddress", Some("special.address")),
        ("ipAddress", Some("special.ipv4")),
        ("billingAddress", Some("special.address")),
        ("thumbnail", Some("special.image_url(150x150)")),
        ("createdAt", Some("date.past")),
        ("updated_at", Some("date.recent")),
        ("expiresAt", Some("date.future")),
        ("lastLoginAt", Some("date.date")),
        ("signup_at", Some("date.date")),
        ("lastLoginAT", Some("date.date")),
        ("startDate", Some("date.date")),
        ("isActive", Some("boolean.boolean")),
        ("userActive", Some("boolean.boolean")),
        ("totalPrice", Some("number.price")),
        ("viewCount", Some("number.count")),
        ("name", Some("special.full_name")),
        ("firstName", Some("special.first_name")),
        ("version", Some("string.pattern(#.#.#)")),
        ("apiKey", Some("string.string(32, alphanumeric)")),
        ("video", None),
        ("paid", Some("special.uuid")),
        ("format", Some("date.date")),
        ("island", None),
    ];

    for (name, expected) in cases {
        assert_eq!(label(name), *expected, "field {name}");
    }
}

#[test]
fn uppercase_suffixes_still_infer() {
    assert_eq!(infer_generator("userID").id(), "special.uuid");
    assert!(find_rule_for_field("orderID").is_some());
    assert_eq!(label("lastLoginAT"), Some("date.date"));
}

#[test]
fn exact_matches_are_case_insensitive() {
    assert_eq!(label("EMAIL"), Some("special.email"));
    assert_eq!(label("ID"), Some("special.uuid"));
    assert_eq!(label("CreatedAt"), Some("date.past"));
}

#[test]
fn id_rules_distinguish_exact_and_suffix_matches() {
    let exact = find_rule_for_field("id").unwrap();
    let suffix = find_rule_for_field("user_id").unwrap();

    assert_eq!(exact.priority(), 100);
    assert_eq!(exact.pattern(), "^id$");
    assert_eq!(suffix.priority(), 90);
    assert_eq!(suffix.pattern(), "_id$");
}

#[test]
fn inferred_ids_have_uuid_shape() {
    let shape = Regex::new(UUID_V4).unwrap();
    let mut rng = RandomEngine::seeded(42);

    for name in ["id", "user_id", "accountId"] {
        let value = infer_generator(name).value(&mut rng).unwrap();
        assert!(shape.is_match(value.as_str().unwrap()), "{name}");
    }
}

#[test]
fn unmatched_names_fall_back_to_a_word() {
    let generator = infer_generator("video");
    assert_eq!(generator.id(), "string.word");
    assert!(inference::find_generator_for_field("video").is_none());

    let mut rng = RandomEngine::seeded(1);
    assert!(matches!(generator.value(&mut rng).unwrap(), Value::Text(_)));
}

#[test]
fn higher_priority_wins_regardless_of_declaration_order() {
    let defs = [
        PatternDef::new("Address$", 85, "address", special::address),
        PatternDef::new("^ipAddress$", 95, "ipv4", special::ipv4),
    ];
    let reversed = [defs[1], defs[0]];

    for table in [
        PatternTable::compile(&defs).unwrap(),
        PatternTable::compile(&reversed).unwrap(),
    ] {
        assert_eq!(table.find("ipAddress").unwrap().label(), "ipv4");
        assert_eq!(table.find("homeAddress").unwrap().label(), "address");
    }
}

#[test]
fn equal_priorities_keep_declaration_order() {
    let defs = [
        PatternDef::new("^code$", 90, "first", special::uuid),
        PatternDef::new("code$", 90, "second", special::uuid),
    ];
    let table = PatternTable::compile(&defs).unwrap();
    assert_eq!(table.find("code").unwrap().label(), "first");
}

#[test]
fn builtin_table_is_sorted_by_descending_priority() {
    let table = PatternTable::builtin();
    assert_eq!(table.len(), BUILTIN_PATTERNS.len());
    let priorities: Vec<u8> = table.rules().iter().map(|rule| rule.priority()).collect();
    assert!(priorities.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn malformed_pattern_is_a_configuration_error() {
    let defs = [PatternDef::new("^(unclosed$", 90, "broken", special::uuid)];
    let result = PatternTable::compile(&defs);
    assert!(matches!(
        result,
        Err(InferenceError::InvalidPattern { ref pattern, .. }) if pattern == "^(unclosed$"
    ));
}

#[test]
fn schema_inference_keeps_name_order() {
    let schema = infer_generators_for_schema(["email", "createdAt", "video"]);
    let keys: Vec<&str> = schema.keys().collect();
    assert_eq!(keys, vec!["email", "createdAt", "video"]);
}

#[test]
fn field_predicates() {
    assert!(is_boolean_field("isVerified"));
    assert!(is_boolean_field("published"));
    assert!(!is_boolean_field("island"));

    assert!(is_date_field("birthDate"));
    assert!(is_date_field("created_at"));
    assert!(is_date_field("lastLoginAT"));
    assert!(is_date_field("format"));
    assert!(!is_date_field("status"));

    assert!(is_id_field("id"));
    assert!(is_id_field("orderId"));
    assert!(is_id_field("order_id"));
    assert!(!is_id_field("video"));
    assert!(!is_id_field("paid"));
    assert!(!is_id_field("userID"));

    assert!(is_numeric_field("price"));
    assert!(is_numeric_field("itemCount"));
    assert!(!is_numeric_field("name"));
}
