//! PII redaction for free-text clinical notes
//!
//! Pattern-based scrubbing applied before notes are persisted in plain
//! form. Redaction is irreversible; the unredacted original survives only
//! inside the vault's sealed ciphertext.

pub mod engine;
pub mod patterns;

pub use engine::{redact, RedactionEngine};
pub use patterns::{default_rules, RedactionRule, NAME_MASK};
