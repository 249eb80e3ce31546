use mockify_core::{GenerationError, Generator, RandomEngine, Result, Value};

use super::{GeneratorRegistry, capitalize, pick};
use crate::data::{ADJECTIVES, LOREM_WORDS, NOUNS, WORDS};

const SENTENCE_WORDS: (i64, i64) = (5, 12);
const PARAGRAPH_SENTENCES: (i64, i64) = (3, 6);
const PARAGRAPH_SENTENCE_WORDS: (i64, i64) = (5, 15);

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(|| string(StringOptions::default()));
    registry.register(word);
    registry.register(|| words(3));
    registry.register(|| sentence(None));
    registry.register(|| paragraph(None));
    registry.register(|| lorem(50));
    registry.register(|| title(4));
    registry.register(|| slug(3));
}

/// Character pool for [`string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Alphanumeric,
    Alpha,
    Numeric,
    Hex,
    Lowercase,
    Uppercase,
}

impl Charset {
    pub fn chars(self) -> &'static [u8] {
        match self {
            Charset::Alphanumeric => {
                b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789"
            }
            Charset::Alpha => b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Charset::Numeric => b"0123456789",
            Charset::Hex => b"0123456789abcdef",
            Charset::Lowercase => b"abcdefghijklmnopqrstuvwxyz",
            Charset::Uppercase => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
        }
    }

    /// Parse a charset name as used in manifests (`"hex"`, `"alpha"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "alphanumeric" => Some(Charset::Alphanumeric),
            "alpha" => Some(Charset::Alpha),
            "numeric" => Some(Charset::Numeric),
            "hex" => Some(Charset::Hex),
            "lowercase" => Some(Charset::Lowercase),
            "uppercase" => Some(Charset::Uppercase),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringOptions {
    pub length: usize,
    pub charset: Charset,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            length: 10,
            charset: Charset::Alphanumeric,
        }
    }
}

/// Random string of `options.length` characters from `options.charset`.
pub fn string(options: StringOptions) -> Generator {
    Generator::new("string.string", move |rng| {
        Ok(Value::Text(random_chars(rng, options.charset, options.length)?))
    })
}

fn random_chars(rng: &mut RandomEngine, charset: Charset, length: usize) -> Result<String> {
    let chars = charset.chars();
    (0..length)
        .map(|_| rng.random_pick(chars).map(|byte| char::from(*byte)))
        .collect()
}

pub fn word() -> Generator {
    Generator::new("string.word", |rng| Ok(Value::from(pick(WORDS, rng)?)))
}

/// `count` words joined by single spaces.
pub fn words(count: usize) -> Generator {
    Generator::new("string.words", move |rng| {
        Ok(Value::Text(pick_words(rng, WORDS, count)?.join(" ")))
    })
}

/// Capitalized sentence ending in a period. With `None` the word count is
/// drawn from 5..=12 on every call.
pub fn sentence(word_count: Option<usize>) -> Generator {
    Generator::new("string.sentence", move |rng| {
        let count = match word_count {
            Some(count) => count,
            None => draw_count(rng, SENTENCE_WORDS),
        };
        Ok(Value::Text(random_sentence(rng, count)?))
    })
}

/// Several sentences of 5..=15 words each. With `None` the sentence count is
/// drawn from 3..=6 on every call.
pub fn paragraph(sentence_count: Option<usize>) -> Generator {
    Generator::new("string.paragraph", move |rng| {
        let count = match sentence_count {
            Some(count) => count,
            None => draw_count(rng, PARAGRAPH_SENTENCES),
        };
        let mut sentences = Vec::with_capacity(count);
        for _ in 0..count {
            let words = draw_count(rng, PARAGRAPH_SENTENCE_WORDS);
            sentences.push(random_sentence(rng, words)?);
        }
        Ok(Value::Text(sentences.join(" ")))
    })
}

pub fn lorem(word_count: usize) -> Generator {
    Generator::new("string.lorem", move |rng| {
        let words = pick_words(rng, LOREM_WORDS, word_count)?;
        Ok(Value::Text(finish_sentence(words)))
    })
}

/// Title-cased words alternating adjective and noun.
pub fn title(word_count: usize) -> Generator {
    Generator::new("string.title", move |rng| {
        let mut words = Vec::with_capacity(word_count);
        for index in 0..word_count {
            let table = if index % 2 == 0 { ADJECTIVES } else { NOUNS };
            words.push(capitalize(pick(table, rng)?));
        }
        Ok(Value::Text(words.join(" ")))
    })
}

/// Lowercase words joined by `-`.
pub fn slug(word_count: usize) -> Generator {
    Generator::new("string.slug", move |rng| {
        let words = pick_words(rng, WORDS, word_count)?;
        Ok(Value::Text(
            words
                .iter()
                .map(|word| word.to_lowercase())
                .collect::<Vec<_>>()
                .join("-"),
        ))
    })
}

/// Fill a template: `#` digit, `A` uppercase letter, `a` lowercase letter,
/// `*` digit or lowercase letter. Other characters are copied.
pub fn pattern(template: impl Into<String>) -> Generator {
    let template = template.into();
    Generator::new("string.pattern", move |rng| {
        let mut result = String::with_capacity(template.len());
        for ch in template.chars() {
            match ch {
                '#' => result.push(random_digit(rng)?),
                'A' => result.push(random_letter(rng, b'A')?),
                'a' => result.push(random_letter(rng, b'a')?),
                '*' => {
                    if rng.random() < 0.5 {
                        result.push(random_digit(rng)?);
                    } else {
                        result.push(random_letter(rng, b'a')?);
                    }
                }
                other => result.push(other),
            }
        }
        Ok(Value::Text(result))
    })
}

fn random_sentence(rng: &mut RandomEngine, count: usize) -> Result<String> {
    let words = pick_words(rng, WORDS, count)?;
    Ok(finish_sentence(words))
}

fn finish_sentence(words: Vec<&str>) -> String {
    let mut text = match words.split_first() {
        Some((first, rest)) => {
            let mut text = capitalize(first);
            for word in rest {
                text.push(' ');
                text.push_str(word);
            }
            text
        }
        None => String::new(),
    };
    text.push('.');
    text
}

fn pick_words(
    rng: &mut RandomEngine,
    table: &'static [&'static str],
    count: usize,
) -> Result<Vec<&'static str>> {
    (0..count).map(|_| pick(table, rng)).collect()
}

fn draw_count(rng: &mut RandomEngine, (min, max): (i64, i64)) -> usize {
    rng.random_int(min, max) as usize
}

fn random_digit(rng: &mut RandomEngine) -> Result<char> {
    let digit = rng.random_int(0, 9) as u32;
    char::from_digit(digit, 10)
        .ok_or_else(|| GenerationError::invalid_argument("digit out of range"))
}

fn random_letter(rng: &mut RandomEngine, base: u8) -> Result<char> {
    let offset = rng.random_int(0, 25) as u8;
    Ok(char::from(base + offset))
}
