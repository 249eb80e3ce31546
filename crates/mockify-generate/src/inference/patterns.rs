//! Field-name pattern table.
//!
//! Rules are matched in descending priority; rules of equal priority keep
//! their declaration order. Priorities encode specificity by hand: exact
//! names sit at 95-100, specific prefixes and suffixes at 85-90 and generic
//! trailing tokens at 75-80.

use std::sync::LazyLock;

use mockify_core::Generator;
use regex::{Regex, RegexSet};

use crate::errors::InferenceError;
use crate::generators::string::{Charset, StringOptions};
use crate::generators::{boolean, date, number, special, string};

/// Declarative rule entry.
#[derive(Debug, Clone, Copy)]
pub struct PatternDef {
    pub pattern: &'static str,
    pub case_insensitive: bool,
    pub priority: u8,
    /// Human-readable name of the generator the rule produces.
    pub label: &'static str,
    pub generator: fn() -> Generator,
}

impl PatternDef {
    /// Case-insensitive rule.
    pub const fn new(
        pattern: &'static str,
        priority: u8,
        label: &'static str,
        generator: fn() -> Generator,
    ) -> Self {
        Self {
            pattern,
            case_insensitive: true,
            priority,
            label,
            generator,
        }
    }

    /// Rule whose letter case is significant, e.g. camelCase boundaries.
    pub const fn cased(
        pattern: &'static str,
        priority: u8,
        label: &'static str,
        generator: fn() -> Generator,
    ) -> Self {
        Self {
            pattern,
            case_insensitive: false,
            priority,
            label,
            generator,
        }
    }
}

/// Compiled rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: &'static str,
    case_insensitive: bool,
    priority: u8,
    label: &'static str,
    generator: fn() -> Generator,
    regex: Regex,
}

impl PatternRule {
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Fresh generator for a matching field.
    pub fn generator(&self) -> Generator {
        (self.generator)()
    }
}

/// Priority-ordered rule table.
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
    set: RegexSet,
}

impl PatternTable {
    /// Compile and order `defs`. Fails on the first malformed pattern.
    pub fn compile(defs: &[PatternDef]) -> Result<Self, InferenceError> {
        let mut rules = defs
            .iter()
            .map(|def| {
                let expr = if def.case_insensitive {
                    format!("(?i:{})", def.pattern)
                } else {
                    def.pattern.to_string()
                };
                let regex = Regex::new(&expr).map_err(|source| {
                    InferenceError::InvalidPattern {
                        pattern: def.pattern.to_string(),
                        source,
                    }
                })?;
                Ok(PatternRule {
                    pattern: def.pattern,
                    case_insensitive: def.case_insensitive,
                    priority: def.priority,
                    label: def.label,
                    generator: def.generator,
                    regex,
                })
            })
            .collect::<Result<Vec<_>, InferenceError>>()?;
        // `sort_by` is stable, so equal priorities keep declaration order.
        rules.sort_by(|a, b| b.priority.cmp(&a.priority));

        let set = RegexSet::new(rules.iter().map(|rule| rule.regex.as_str())).map_err(
            |source| InferenceError::InvalidPattern {
                pattern: "<rule set>".to_string(),
                source,
            },
        )?;

        Ok(Self { rules, set })
    }

    /// The built-in table, compiled on first use.
    ///
    /// # Panics
    ///
    /// Panics if a built-in rule fails to compile; the table is static
    /// configuration and cannot be repaired at runtime.
    pub fn builtin() -> &'static PatternTable {
        static BUILTIN: LazyLock<PatternTable> =
            LazyLock::new(|| match PatternTable::compile(BUILTIN_PATTERNS) {
                Ok(table) => table,
                Err(err) => panic!("built-in inference table is invalid: {err}"),
            });
        &BUILTIN
    }

    /// Highest-priority rule matching `name`.
    pub fn find(&self, name: &str) -> Option<&PatternRule> {
        let index = self.set.matches(name).into_iter().next()?;
        self.rules.get(index)
    }

    /// Rules in match order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn thumbnail() -> Generator {
    special::image_url(150, 150)
}

fn image() -> Generator {
    special::image_url(640, 480)
}

fn past_date() -> Generator {
    date::past_date(5)
}

fn recent_date() -> Generator {
    date::recent_date(30)
}

fn future_date() -> Generator {
    date::future_date(5)
}

fn birth_date() -> Generator {
    date::birth_date(18, 80)
}

fn any_date() -> Generator {
    date::date(date::DateOptions::default())
}

fn timestamp() -> Generator {
    date::timestamp(date::DateOptions::default())
}

fn title() -> Generator {
    string::title(4)
}

fn paragraph() -> Generator {
    string::paragraph(None)
}

fn long_lorem() -> Generator {
    string::lorem(100)
}

fn sentence() -> Generator {
    string::sentence(None)
}

fn slug() -> Generator {
    string::slug(3)
}

fn version() -> Generator {
    string::pattern("#.#.#")
}

fn coin_flip() -> Generator {
    boolean::boolean(0.5)
}

fn hex_token() -> Generator {
    token(32, Charset::Hex)
}

fn hex_secret() -> Generator {
    token(64, Charset::Hex)
}

fn key() -> Generator {
    token(32, Charset::Alphanumeric)
}

fn token(length: usize, charset: Charset) -> Generator {
    string::string(StringOptions { length, charset })
}

pub const BUILTIN_PATTERNS: &[PatternDef] = &[
    // identifiers
    PatternDef::new("^id$", 100, "special.uuid", special::uuid),
    PatternDef::new("^uuid$", 100, "special.uuid", special::uuid),
    PatternDef::new("Id$", 90, "special.uuid", special::uuid),
    PatternDef::new("_id$", 90, "special.uuid", special::uuid),
    // email
    PatternDef::new("^email$", 95, "special.email", special::email),
    PatternDef::new("Email$", 85, "special.email", special::email),
    PatternDef::new("_email$", 85, "special.email", special::email),
    // names
    PatternDef::new("^firstName$", 95, "special.first_name", special::first_name),
    PatternDef::new("^first_name$", 95, "special.first_name", special::first_name),
    PatternDef::new("^lastName$", 95, "special.last_name", special::last_name),
    PatternDef::new("^last_name$", 95, "special.last_name", special::last_name),
    PatternDef::new("^fullName$", 95, "special.full_name", special::full_name),
    PatternDef::new("^full_name$", 95, "special.full_name", special::full_name),
    PatternDef::new("^name$", 90, "special.full_name", special::full_name),
    PatternDef::new("^username$", 95, "special.username", special::username),
    PatternDef::new("^user_name$", 95, "special.username", special::username),
    // phone
    PatternDef::new("^phone$", 95, "special.phone", special::phone),
    PatternDef::new("^phoneNumber$", 95, "special.phone", special::phone),
    PatternDef::new("^phone_number$", 95, "special.phone", special::phone),
    PatternDef::new("Phone$", 85, "special.phone", special::phone),
    // urls and images
    PatternDef::new("^url$", 95, "special.url", special::url),
    PatternDef::new("Url$", 85, "special.url", special::url),
    PatternDef::new("^link$", 90, "special.url", special::url),
    PatternDef::new("^href$", 90, "special.url", special::url),
    PatternDef::new("^website$", 90, "special.url", special::url),
    PatternDef::new("^avatar$", 95, "special.avatar_url", special::avatar_url),
    PatternDef::new("^avatarUrl$", 95, "special.avatar_url", special::avatar_url),
    PatternDef::new("^image$", 90, "special.image_url", image),
    PatternDef::new("Image$", 85, "special.image_url", image),
    PatternDef::new("^imageUrl$", 95, "special.image_url", image),
    PatternDef::new("^thumbnail$", 90, "special.image_url(150x150)", thumbnail),
    // dates
    PatternDef::new("^createdAt$", 95, "date.past", past_date),
    PatternDef::new("^created_at$", 95, "date.past", past_date),
    PatternDef::new("^updatedAt$", 95, "date.recent", recent_date),
    PatternDef::new("^updated_at$", 95, "date.recent", recent_date),
    PatternDef::new("^deletedAt$", 95, "date.recent", recent_date),
    PatternDef::new("^deleted_at$", 95, "date.recent", recent_date),
    PatternDef::new("^publishedAt$", 95, "date.past", past_date),
    PatternDef::new("^published_at$", 95, "date.past", past_date),
    PatternDef::new("^expiresAt$", 95, "date.future", future_date),
    PatternDef::new("^expires_at$", 95, "date.future", future_date),
    PatternDef::new("^birthDate$", 95, "date.birth", birth_date),
    PatternDef::new("^birth_date$", 95, "date.birth", birth_date),
    PatternDef::new("^dateOfBirth$", 95, "date.birth", birth_date),
    PatternDef::new("^dob$", 95, "date.birth", birth_date),
    PatternDef::new("^date$", 85, "date.date", any_date),
    PatternDef::new("Date$", 80, "date.date", any_date),
    PatternDef::new("At$", 75, "date.date", any_date),
    PatternDef::new("_at$", 75, "date.date", any_date),
    // timestamps
    PatternDef::new("^timestamp$", 95, "date.timestamp", timestamp),
    PatternDef::new("Timestamp$", 85, "date.timestamp", timestamp),
    // content
    PatternDef::new("^title$", 95, "string.title", title),
    PatternDef::new("Title$", 85, "string.title", title),
    PatternDef::new("^headline$", 90, "string.title", title),
    PatternDef::new("^subject$", 85, "string.title", title),
    PatternDef::new("^description$", 95, "string.paragraph", paragraph),
    PatternDef::new("^bio$", 95, "string.paragraph", paragraph),
    PatternDef::new("^summary$", 95, "string.paragraph", paragraph),
    PatternDef::new("^about$", 90, "string.paragraph", paragraph),
    PatternDef::new("^content$", 95, "string.lorem(100)", long_lorem),
    PatternDef::new("^body$", 95, "string.lorem(100)", long_lorem),
    PatternDef::new("^text$", 85, "string.sentence", sentence),
    PatternDef::new("^message$", 90, "string.sentence", sentence),
    PatternDef::new("^comment$", 90, "string.sentence", sentence),
    // numbers
    PatternDef::new("^age$", 95, "number.age", number::age),
    PatternDef::new("^price$", 95, "number.price", number::price),
    PatternDef::new("Price$", 85, "number.price", number::price),
    PatternDef::new("^amount$", 90, "number.price", number::price),
    PatternDef::new("^cost$", 90, "number.price", number::price),
    PatternDef::new("^quantity$", 95, "number.quantity", number::quantity),
    PatternDef::new("^qty$", 95, "number.quantity", number::quantity),
    PatternDef::new("^count$", 90, "number.count", number::count),
    PatternDef::new("Count$", 85, "number.count", number::count),
    PatternDef::new("^total$", 85, "number.count", number::count),
    PatternDef::new("^rating$", 95, "number.rating", number::rating),
    PatternDef::new("^score$", 90, "number.rating", number::rating),
    PatternDef::new("^percentage$", 95, "number.percentage", number::percentage),
    PatternDef::new("^percent$", 90, "number.percentage", number::percentage),
    // booleans
    PatternDef::cased("^is[A-Z]", 95, "boolean.boolean", coin_flip),
    PatternDef::cased("^has[A-Z]", 95, "boolean.boolean", coin_flip),
    PatternDef::cased("^can[A-Z]", 95, "boolean.boolean", coin_flip),
    PatternDef::cased("^should[A-Z]", 90, "boolean.boolean", coin_flip),
    PatternDef::cased("^will[A-Z]", 90, "boolean.boolean", coin_flip),
    PatternDef::new("Active$", 85, "boolean.boolean", coin_flip),
    PatternDef::new("^enabled$", 95, "boolean.boolean", coin_flip),
    PatternDef::new("^disabled$", 95, "boolean.boolean", coin_flip),
    PatternDef::new("^visible$", 95, "boolean.boolean", coin_flip),
    PatternDef::new("^hidden$", 95, "boolean.boolean", coin_flip),
    PatternDef::new("^verified$", 95, "boolean.boolean", coin_flip),
    PatternDef::new("^active$", 95, "boolean.boolean", coin_flip),
    PatternDef::new("^completed$", 95, "boolean.boolean", coin_flip),
    PatternDef::new("^published$", 95, "boolean.boolean", coin_flip),
    // address
    PatternDef::new("^address$", 95, "special.address", special::address),
    PatternDef::new("Address$", 85, "special.address", special::address),
    PatternDef::new("^street$", 90, "special.address", special::address),
    PatternDef::new("^city$", 95, "special.city", special::city),
    PatternDef::new("^country$", 95, "special.country", special::country),
    PatternDef::new("^zip$", 95, "special.zip_code", special::zip_code),
    PatternDef::new("^zipCode$", 95, "special.zip_code", special::zip_code),
    PatternDef::new("^zip_code$", 95, "special.zip_code", special::zip_code),
    PatternDef::new("^postalCode$", 95, "special.zip_code", special::zip_code),
    PatternDef::new("^postal_code$", 95, "special.zip_code", special::zip_code),
    // company
    PatternDef::new("^company$", 95, "special.company", special::company),
    PatternDef::new("^companyName$", 95, "special.company", special::company),
    PatternDef::new("^organization$", 90, "special.company", special::company),
    // technical
    PatternDef::new("^domain$", 95, "special.domain", special::domain),
    PatternDef::new("^ip$", 95, "special.ipv4", special::ipv4),
    PatternDef::new("^ipAddress$", 95, "special.ipv4", special::ipv4),
    PatternDef::new("^ip_address$", 95, "special.ipv4", special::ipv4),
    PatternDef::new("^mac$", 95, "special.mac_address", special::mac_address),
    PatternDef::new("^macAddress$", 95, "special.mac_address", special::mac_address),
    PatternDef::new("^color$", 95, "special.hex_color", special::hex_color),
    PatternDef::new("Color$", 85, "special.hex_color", special::hex_color),
    // slugs, versions, secrets
    PatternDef::new("^slug$", 95, "string.slug", slug),
    PatternDef::new("^handle$", 90, "string.slug", slug),
    PatternDef::new("^version$", 90, "string.pattern(#.#.#)", version),
    PatternDef::new("^token$", 90, "string.string(32, hex)", hex_token),
    PatternDef::new("^key$", 85, "string.string(32, alphanumeric)", key),
    PatternDef::new("^apiKey$", 95, "string.string(32, alphanumeric)", key),
    PatternDef::new("^api_key$", 95, "string.string(32, alphanumeric)", key),
    PatternDef::new("^secret$", 90, "string.string(64, hex)", hex_secret),
];
