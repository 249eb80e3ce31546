//! Deterministic pseudo-random engine.
//!
//! Each draw advances a 31-bit linear-congruential state and feeds it through
//! a Mulberry32 mix. Statistical quality is modest; what matters is that the
//! same seed and the same call sequence always yield the same stream.
//!
//! The engine is a plain value passed by `&mut` into generators. A
//! process-wide instance lives behind [`global`] for callers that do not
//! thread their own engine; [`RandomEngine::seeded`] gives an isolated one.

use std::ops::{Deref, DerefMut};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::error::{GenerationError, Result};

const LCG_MULTIPLIER: u32 = 1_103_515_245;
const LCG_INCREMENT: u32 = 12_345;
const STATE_MASK: u32 = 0x7fff_ffff;
const MULBERRY_INCREMENT: u32 = 0x6d2b_79f5;
const TWO_POW_32: f64 = 4_294_967_296.0;

static PROCESS_START: LazyLock<DateTime<Utc>> = LazyLock::new(Utc::now);

static GLOBAL: LazyLock<Mutex<RandomEngine>> = LazyLock::new(|| {
    let seed = PROCESS_START.timestamp_millis().unsigned_abs();
    Mutex::new(RandomEngine::seeded(seed))
});

/// Seed and live state captured from an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSnapshot {
    seed: u64,
    state: u32,
}

/// Seedable, reproducible source of uniform randomness.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    seed: u64,
    state: u32,
    reference_time: DateTime<Utc>,
}

impl RandomEngine {
    /// Create an isolated engine with its own seed and state.
    ///
    /// Date generators measure offsets from the engine's reference time,
    /// which defaults to the instant the process first touched the engine
    /// module so that engines seeded alike agree on dates too.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            state: fold_seed(seed),
            reference_time: *PROCESS_START,
        }
    }

    /// Pin the instant date generators treat as "now".
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = reference_time;
        self
    }

    pub fn reference_time(&self) -> DateTime<Utc> {
        self.reference_time
    }

    /// Reset the state to a deterministic function of `seed`.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.state = fold_seed(seed);
    }

    /// The last seed set, not the live state.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind the live state to the last seed without changing it.
    pub fn reset_seed(&mut self) {
        self.state = fold_seed(self.seed);
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            seed: self.seed,
            state: self.state,
        }
    }

    pub fn restore(&mut self, snapshot: EngineSnapshot) {
        self.seed = snapshot.seed;
        self.state = snapshot.state;
    }

    /// Pin the engine to `seed` until the returned guard is dropped, at
    /// which point the previous seed and state are restored.
    pub fn pin(&mut self, seed: u64) -> PinnedSeed<'_> {
        let previous = self.snapshot();
        self.set_seed(seed);
        PinnedSeed {
            engine: self,
            previous,
        }
    }

    /// Next float in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        f64::from(self.advance()) / TWO_POW_32
    }

    /// Integer in `[min, max]`, both ends inclusive. Reversed bounds are
    /// swapped.
    pub fn random_int(&mut self, min: i64, max: i64) -> i64 {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let span = (i128::from(max) - i128::from(min) + 1) as f64;
        let offset = (self.random() * span).floor() as i128;
        (i128::from(min) + offset).clamp(i128::from(min), i128::from(max)) as i64
    }

    /// Float in `[min, max)` rounded to `decimals` fractional digits.
    pub fn random_float(&mut self, min: f64, max: f64, decimals: u32) -> f64 {
        let value = self.random() * (max - min) + min;
        let factor = 10_f64.powi(decimals.min(15) as i32);
        (value * factor).round() / factor
    }

    /// Uniform pick over `items`.
    pub fn random_pick<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        if items.is_empty() {
            return Err(GenerationError::invalid_argument(
                "cannot pick from an empty sequence",
            ));
        }
        let index = self.random_int(0, items.len() as i64 - 1) as usize;
        items
            .get(index)
            .ok_or_else(|| GenerationError::invalid_argument("pick index out of range"))
    }

    /// Up to `count` distinct elements of `items`, in random order.
    pub fn pick_many<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut shuffled = self.shuffle(items);
        shuffled.truncate(count.min(items.len()));
        shuffled
    }

    /// Fisher-Yates shuffle into a new vector.
    pub fn shuffle<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut result = items.to_vec();
        for i in (1..result.len()).rev() {
            let j = self.random_int(0, i as i64) as usize;
            result.swap(i, j);
        }
        result
    }

    pub fn random_bool(&mut self) -> bool {
        self.random() < 0.5
    }

    /// `true` with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.random() < probability
    }

    fn advance(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT)
            & STATE_MASK;
        mulberry32(self.state)
    }
}

impl RngCore for RandomEngine {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.advance());
        let low = u64::from(self.advance());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Guard returned by [`RandomEngine::pin`].
#[derive(Debug)]
pub struct PinnedSeed<'a> {
    engine: &'a mut RandomEngine,
    previous: EngineSnapshot,
}

impl Deref for PinnedSeed<'_> {
    type Target = RandomEngine;

    fn deref(&self) -> &RandomEngine {
        &*self.engine
    }
}

impl DerefMut for PinnedSeed<'_> {
    fn deref_mut(&mut self) -> &mut RandomEngine {
        &mut *self.engine
    }
}

impl Drop for PinnedSeed<'_> {
    fn drop(&mut self) {
        self.engine.restore(self.previous);
    }
}

/// Lock the process-wide engine.
///
/// The guard must not be held while calling anything that locks it again
/// (for example `Factory::build` from inside a generator); generators receive
/// the engine they should draw from as an argument.
pub fn global() -> MutexGuard<'static, RandomEngine> {
    GLOBAL.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_seed(seed: u64) {
    global().set_seed(seed);
}

pub fn get_seed() -> u64 {
    global().seed()
}

pub fn reset_seed() {
    global().reset_seed();
}

fn fold_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

fn mulberry32(input: u32) -> u32 {
    let mut t = input.wrapping_add(MULBERRY_INCREMENT);
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    t ^ (t >> 14)
}
