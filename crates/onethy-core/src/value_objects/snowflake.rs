//! Snowflake identifiers
//!
//! Every persisted entity gets a 64-bit time-sortable id minted in-process:
//! 42 bits of milliseconds since the service epoch, 10 bits of worker id,
//! 12 bits of per-millisecond sequence. Sorting by id is sorting by creation
//! time, which the message and conversation cursors rely on.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// 64-bit Snowflake ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

const TIMESTAMP_SHIFT: u8 = 22;
const WORKER_SHIFT: u8 = 12;
const WORKER_MAX: u16 = 1 << 10;
const SEQUENCE_MASK: u16 = (1 << 12) - 1;

impl Snowflake {
    /// Service epoch: 2024-01-01 00:00:00 UTC, in milliseconds
    pub const EPOCH: i64 = 1_704_067_200_000;

    /// Wrap a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Unwrap to the raw i64 (database representation)
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Whether this id is the zero placeholder
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Milliseconds since the Unix epoch at which this id was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    /// Worker id embedded in this id
    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> WORKER_SHIFT) as u16) & (WORKER_MAX - 1)
    }

    /// Per-millisecond sequence number embedded in this id
    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 as u16) & SEQUENCE_MASK
    }

    /// Creation instant as a UTC datetime
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        use chrono::{TimeZone, Utc};
        Utc.timestamp_millis_opt(self.timestamp())
            .single()
            .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
    }

    /// Parse the decimal string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Ids cross the JSON boundary as strings; JavaScript numbers lose precision
// past 2^53.
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Accept both the string form we emit and a bare integer
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(Snowflake(id)),
            Raw::Text(s) => Snowflake::parse(&s)
                .map_err(|_| serde::de::Error::custom("invalid snowflake string")),
        }
    }
}

/// In-process Snowflake minting
///
/// A single mutex guards the (last millisecond, sequence) pair; contention is
/// negligible next to the database round-trips every id accompanies.
pub struct SnowflakeGenerator {
    worker_id: u16,
    clock: Mutex<ClockState>,
}

struct ClockState {
    last_ms: i64,
    sequence: u16,
}

impl SnowflakeGenerator {
    /// Create a generator for the given worker id
    ///
    /// # Panics
    /// Panics if worker_id >= 1024 (it must fit in 10 bits)
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < WORKER_MAX, "Worker ID must be < 1024");
        Self {
            worker_id,
            clock: Mutex::new(ClockState {
                last_ms: 0,
                sequence: 0,
            }),
        }
    }

    /// Mint the next id
    pub fn generate(&self) -> Snowflake {
        let mut clock = self.clock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut now = now_millis();
        // If the wall clock stepped backwards, keep minting against the last
        // observed millisecond so ids stay monotonic.
        if now < clock.last_ms {
            now = clock.last_ms;
        }

        if now == clock.last_ms {
            clock.sequence = (clock.sequence + 1) & SEQUENCE_MASK;
            if clock.sequence == 0 {
                // 4096 ids in one millisecond; spin into the next one
                while now <= clock.last_ms {
                    now = now_millis();
                }
                clock.last_ms = now;
            }
        } else {
            clock.last_ms = now;
            clock.sequence = 0;
        }

        let id = ((clock.last_ms - Snowflake::EPOCH) << TIMESTAMP_SHIFT)
            | (i64::from(self.worker_id) << WORKER_SHIFT)
            | i64::from(clock.sequence);
        Snowflake::new(id)
    }

    /// Worker id this generator stamps into every id
    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[inline]
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_roundtrip() {
        let id = Snowflake::new(123_456_789);
        assert_eq!(id.to_string(), "123456789");
        assert_eq!("123456789".parse::<Snowflake>().unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Snowflake::parse("not-a-number").is_err());
        assert!(Snowflake::parse("").is_err());
    }

    #[test]
    fn test_serde_emits_string_accepts_both() {
        let id = Snowflake::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""42""#);
        assert_eq!(serde_json::from_str::<Snowflake>(r#""42""#).unwrap(), id);
        assert_eq!(serde_json::from_str::<Snowflake>("42").unwrap(), id);
    }

    #[test]
    fn test_generated_ids_carry_worker_id() {
        let generator = SnowflakeGenerator::new(7);
        let id = generator.generate();
        assert_eq!(id.worker_id(), 7);
        assert!(id.timestamp() >= Snowflake::EPOCH);
    }

    #[test]
    fn test_generated_ids_are_strictly_increasing() {
        let generator = SnowflakeGenerator::new(0);
        let mut last = generator.generate();
        for _ in 0..1000 {
            let next = generator.generate();
            assert!(next > last);
            last = next;
        }
    }
}
