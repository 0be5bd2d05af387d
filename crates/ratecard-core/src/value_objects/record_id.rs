//! Record identifiers
//!
//! Every persisted record is keyed by a 64-bit, time-ordered id:
//! - Bits 62-22: milliseconds since [`RecordId::EPOCH`]
//! - Bits 21-12: worker id (0-1023)
//! - Bits 11-0:  per-millisecond sequence (0-4095)
//!
//! Ids leave the service as decimal strings so JavaScript clients never
//! lose precision.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Opaque identifier for ports, shipping lines, rates, notes, users and activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordId(i64);

impl RecordId {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which the id was generated
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER_ID)) as u16
    }

    pub fn parse(s: &str) -> Result<Self, RecordIdError> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(RecordId)
            .ok_or(RecordIdError::InvalidFormat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdError {
    #[error("invalid record id format")]
    InvalidFormat,

    #[error("worker id {0} is out of range (0-1023)")]
    WorkerIdOutOfRange(u16),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecordId> for i64 {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Accepts both `"123"` and `123`.
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct RecordIdVisitor;

        impl Visitor<'_> for RecordIdVisitor {
            type Value = RecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer record id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<RecordId, E>
            where
                E: de::Error,
            {
                Ok(RecordId(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<RecordId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(RecordId)
                    .map_err(|_| de::Error::custom("record id out of range"))
            }

            fn visit_str<E>(self, value: &str) -> Result<RecordId, E>
            where
                E: de::Error,
            {
                RecordId::parse(value).map_err(|_| de::Error::custom("invalid record id string"))
            }
        }

        deserializer.deserialize_any(RecordIdVisitor)
    }
}

#[derive(Debug, Default)]
struct GeneratorState {
    last_millis: i64,
    sequence: i64,
}

/// Thread-safe generator of time-ordered [`RecordId`]s.
///
/// Up to 4096 ids per millisecond per worker; on sequence exhaustion the
/// generator waits for the next millisecond. A clock that moves backwards is
/// treated as still being at the last observed millisecond, so ids stay
/// strictly increasing.
#[derive(Debug)]
pub struct IdGenerator {
    worker_id: u16,
    state: Mutex<GeneratorState>,
}

impl IdGenerator {
    pub fn new(worker_id: u16) -> Result<Self, RecordIdError> {
        if worker_id > MAX_WORKER_ID {
            return Err(RecordIdError::WorkerIdOutOfRange(worker_id));
        }
        Ok(Self {
            worker_id,
            state: Mutex::new(GeneratorState::default()),
        })
    }

    pub fn generate(&self) -> RecordId {
        loop {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);

            let now = current_millis().max(state.last_millis);
            if now == state.last_millis {
                if state.sequence == SEQUENCE_MASK {
                    // The lock is released while waiting out the millisecond
                    let exhausted_at = state.last_millis;
                    drop(state);
                    wait_past(exhausted_at);
                    continue;
                }
                state.sequence += 1;
            } else {
                state.sequence = 0;
            }
            state.last_millis = now;

            let id = ((now - RecordId::EPOCH) << (WORKER_BITS + SEQUENCE_BITS))
                | (i64::from(self.worker_id) << SEQUENCE_BITS)
                | state.sequence;
            return RecordId::new(id);
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            worker_id: 0,
            state: Mutex::new(GeneratorState::default()),
        }
    }
}

fn wait_past(millis: i64) {
    while current_millis() <= millis {
        std::thread::yield_now();
    }
}

fn current_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(RecordId::EPOCH)
}
