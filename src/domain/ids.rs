//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for medrecall identifiers. Each type
//! ensures type safety so record, quiz, and result ids cannot be mixed up,
//! and provides validation where a format exists.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Owner identity newtype wrapper
///
/// Represents the authenticated user an entity belongs to. The value is an
/// opaque reference issued by the (out-of-scope) authentication layer; the
/// core only requires it to be non-empty.
///
/// # Examples
///
/// ```
/// use medrecall::domain::ids::UserId;
///
/// let owner = UserId::new("user-7d44b88c").unwrap();
/// assert_eq!(owner.as_str(), "user-7d44b88c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| format!("Invalid {}: {e}", stringify!($name)))
            }
        }
    };
}

uuid_id! {
    /// Clinical record identifier newtype wrapper
    RecordId
}

uuid_id! {
    /// Quiz identifier newtype wrapper
    QuizId
}

uuid_id! {
    /// Quiz result identifier newtype wrapper
    ResultId
}

/// External patient-record identifier
///
/// Format: `PT-{timestamp}-{suffix}` where the timestamp is the creation time
/// in milliseconds encoded base36 and the suffix combines a process-local
/// sequence with a random tail. The timestamp prefix makes identifiers
/// time-ordered at millisecond granularity; ordering between identifiers
/// generated in the same millisecond is not guaranteed.
///
/// Assigned once at record creation and never mutated.
///
/// # Examples
///
/// ```
/// use medrecall::domain::ids::PatientId;
///
/// let id = PatientId::generate();
/// assert!(id.as_str().starts_with("PT-"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(String);

/// Process-local sequence folded into the suffix so that identifiers
/// generated in the same millisecond still differ.
static PATIENT_ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Sequence space: 4 base36 digits.
const SEQUENCE_SPACE: u64 = 36 * 36 * 36 * 36;

impl PatientId {
    /// Generates a new patient identifier
    ///
    /// Successive calls within a process are guaranteed unique as long as
    /// fewer than 36^4 identifiers are generated within one millisecond.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis().max(0) as u64;
        let seq = PATIENT_ID_SEQUENCE.fetch_add(1, Ordering::Relaxed) % SEQUENCE_SPACE;
        let random: u64 = rand::thread_rng().gen_range(0..SEQUENCE_SPACE);

        let id = format!(
            "PT-{}-{}{}",
            encode_base36(millis),
            encode_base36_padded(seq, 4),
            encode_base36_padded(random, 4)
        )
        .to_uppercase();

        Self(id)
    }

    /// Wraps an identifier loaded from storage
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if !id.starts_with("PT-") {
            return Err(format!("Invalid patient ID format: {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn encode_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 digits are ASCII")
}

fn encode_base36_padded(value: u64, width: usize) -> String {
    let encoded = encode_base36(value);
    format!("{encoded:0>width$}")
}
