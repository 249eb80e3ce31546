//! Field-name inference.
//!
//! Maps a field name to a plausible generator through the priority-ordered
//! [`PatternTable`], falling back to a random word when nothing matches.

use std::sync::LazyLock;

use mockify_core::{FieldDef, Generator, Schema};
use regex::RegexSet;
use tracing::trace;

use crate::generators::string;

pub mod patterns;

pub use patterns::{BUILTIN_PATTERNS, PatternDef, PatternRule, PatternTable};

const BOOLEAN_PATTERNS: &[&str] = &[
    "^is[A-Z]",
    "^has[A-Z]",
    "^can[A-Z]",
    "^should[A-Z]",
    "^will[A-Z]",
    "(?i)Active$",
    "(?i)^(enabled|disabled|visible|hidden|verified|active|completed|published)$",
];

const DATE_PATTERNS: &[&str] = &[
    "(?i)Date$",
    "(?i)At$",
    "(?i)_at$",
    "(?i)^timestamp$",
    "(?i)Timestamp$",
    "(?i)^date$",
];

const ID_PATTERNS: &[&str] = &["(?i)^id$", "(?i)^uuid$", "Id$", "_id$"];

const NUMERIC_PATTERNS: &[&str] = &[
    "(?i)^(age|price|amount|cost|quantity|qty|count|total|rating|score|percentage|percent)$",
    "(?i)Price$",
    "(?i)Count$",
];

static BOOLEAN_FIELDS: LazyLock<RegexSet> = LazyLock::new(|| static_set(BOOLEAN_PATTERNS));
static DATE_FIELDS: LazyLock<RegexSet> = LazyLock::new(|| static_set(DATE_PATTERNS));
static ID_FIELDS: LazyLock<RegexSet> = LazyLock::new(|| static_set(ID_PATTERNS));
static NUMERIC_FIELDS: LazyLock<RegexSet> = LazyLock::new(|| static_set(NUMERIC_PATTERNS));

/// Generator of the highest-priority built-in rule matching `name`.
pub fn find_generator_for_field(name: &str) -> Option<Generator> {
    find_rule_for_field(name).map(PatternRule::generator)
}

/// Winning built-in rule for `name`, if any.
pub fn find_rule_for_field(name: &str) -> Option<&'static PatternRule> {
    let rule = PatternTable::builtin().find(name);
    if let Some(rule) = rule {
        trace!(
            field = name,
            pattern = rule.pattern(),
            priority = rule.priority(),
            "inference rule matched"
        );
    }
    rule
}

/// Generator for `name`; a random word when no rule matches.
pub fn infer_generator(name: &str) -> Generator {
    find_generator_for_field(name).unwrap_or_else(|| {
        trace!(field = name, "no inference rule matched, using word");
        string::word()
    })
}

/// Schema with an inferred generator for each of `names`, in order.
pub fn infer_generators_for_schema<I, S>(names: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.as_ref();
            (name.to_string(), FieldDef::from(infer_generator(name)))
        })
        .collect()
}

pub fn is_boolean_field(name: &str) -> bool {
    BOOLEAN_FIELDS.is_match(name)
}

pub fn is_date_field(name: &str) -> bool {
    DATE_FIELDS.is_match(name)
}

/// `id`, `uuid`, camelCase `...Id` and snake_case `..._id`.
pub fn is_id_field(name: &str) -> bool {
    ID_FIELDS.is_match(name)
}

pub fn is_numeric_field(name: &str) -> bool {
    NUMERIC_FIELDS.is_match(name)
}

fn static_set(patterns: &[&str]) -> RegexSet {
    match RegexSet::new(patterns) {
        Ok(set) => set,
        Err(err) => panic!("built-in field predicate is invalid: {err}"),
    }
}
