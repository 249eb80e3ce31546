//! Date and time generators.
//!
//! Ranges are measured from the engine's reference time rather than the wall
//! clock, so two engines seeded alike produce the same instants.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeDelta, Utc};
use mockify_core::{GenerationError, Generator, RandomEngine, Result, Value};

use super::GeneratorRegistry;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const YEAR_MS: i64 = 365 * DAY_MS;
const DEFAULT_YEARS: i64 = 5;
const DEFAULT_DAYS: i64 = 30;

pub fn register(registry: &mut GeneratorRegistry) {
    registry.register(|| date(DateOptions::default()));
    registry.register(|| past_date(DEFAULT_YEARS));
    registry.register(|| future_date(DEFAULT_YEARS));
    registry.register(|| recent_date(DEFAULT_DAYS));
    registry.register(|| soon_date(DEFAULT_DAYS));
    registry.register(|| birth_date(18, 80));
    registry.register(|| timestamp(DateOptions::default()));
    registry.register(|| iso_date(DateOptions::default()));
}

/// Bounds for [`date`]. Missing bounds default to the five years up to the
/// reference time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateOptions {
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
}

impl DateOptions {
    pub fn between(min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    fn resolve(&self, reference: DateTime<Utc>) -> (i64, i64) {
        let now = reference.timestamp_millis();
        let min = self
            .min
            .map_or(now - DEFAULT_YEARS * YEAR_MS, |min| min.timestamp_millis());
        let max = self.max.map_or(now, |max| max.timestamp_millis());
        (min, max)
    }
}

pub fn date(options: DateOptions) -> Generator {
    Generator::new("date.date", move |rng| {
        Ok(Value::Timestamp(random_instant(rng, &options)?))
    })
}

/// Instant within the last `years` years.
pub fn past_date(years: i64) -> Generator {
    offset_date("date.past", years, YEAR_MS, Direction::Back)
}

/// Instant within the next `years` years.
pub fn future_date(years: i64) -> Generator {
    offset_date("date.future", years, YEAR_MS, Direction::Forward)
}

/// Instant within the last `days` days.
pub fn recent_date(days: i64) -> Generator {
    offset_date("date.recent", days, DAY_MS, Direction::Back)
}

/// Instant within the next `days` days.
pub fn soon_date(days: i64) -> Generator {
    offset_date("date.soon", days, DAY_MS, Direction::Forward)
}

/// Midnight UTC on a day 1..=28 of a year `min_age..=max_age` years before
/// the reference year.
pub fn birth_date(min_age: i64, max_age: i64) -> Generator {
    Generator::new("date.birth", move |rng| {
        let reference_year = i64::from(rng.reference_time().year());
        let year = reference_year - rng.random_int(min_age, max_age);
        let month = rng.random_int(0, 11) + 1;
        let day = rng.random_int(1, 28);
        let date = i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month as u32, day as u32))
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| {
                GenerationError::invalid_argument(format!("birth year {year} is out of range"))
            })?;
        Ok(Value::Timestamp(date.and_utc()))
    })
}

/// Epoch milliseconds of an instant drawn like [`date`].
pub fn timestamp(options: DateOptions) -> Generator {
    Generator::new("date.timestamp", move |rng| {
        Ok(Value::Int(random_instant(rng, &options)?.timestamp_millis()))
    })
}

/// RFC 3339 string of an instant drawn like [`date`].
pub fn iso_date(options: DateOptions) -> Generator {
    Generator::new("date.iso", move |rng| {
        let instant = random_instant(rng, &options)?;
        Ok(Value::Text(
            instant.to_rfc3339_opts(SecondsFormat::Millis, true),
        ))
    })
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Back,
    Forward,
}

fn offset_date(id: &'static str, amount: i64, unit_ms: i64, direction: Direction) -> Generator {
    Generator::new(id, move |rng| {
        let now = rng.reference_time();
        let end = amount
            .checked_mul(unit_ms)
            .and_then(|ms| match direction {
                Direction::Back => ms.checked_neg(),
                Direction::Forward => Some(ms),
            })
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or_else(|| {
                GenerationError::invalid_argument(format!(
                    "{id} offset of {amount} is out of range"
                ))
            })?;
        let (min, max) = if end < now { (end, now) } else { (now, end) };
        Ok(Value::Timestamp(random_instant(
            rng,
            &DateOptions::between(min, max),
        )?))
    })
}

fn random_instant(rng: &mut RandomEngine, options: &DateOptions) -> Result<DateTime<Utc>> {
    let (min, max) = options.resolve(rng.reference_time());
    let millis = rng.random_int(min, max);
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        GenerationError::invalid_argument(format!("timestamp {millis} is out of range"))
    })
}
