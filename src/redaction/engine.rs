//! Redaction engine
//!
//! Masks personally identifying substrings in free-text clinical notes
//! before they are persisted in plain form.

use super::patterns::{default_rules, RedactionRule};

/// Pattern-based scrubber for free-text clinical notes
///
/// `redact` is pure, deterministic, and total: input with no PII-shaped
/// substrings is returned unchanged.
///
/// Each rule is applied independently over the whole string, in rule order.
/// A later rule sees the output of the earlier ones, so an earlier
/// replacement that happens to match a later pattern will be rewritten
/// again. That sequential-pass behavior is part of the contract: callers
/// and stored data depend on it, so it must not be replaced with a
/// single-pass tokenizer.
///
/// # Examples
///
/// ```
/// use medrecall::redaction::RedactionEngine;
///
/// let engine = RedactionEngine::new();
/// let masked = engine.redact("Callback 090-1234-5678");
/// assert_eq!(masked, "Callback ***-****-5678");
/// ```
#[derive(Debug, Default)]
pub struct RedactionEngine {
    _private: (),
}

impl RedactionEngine {
    /// Creates a new redaction engine using the built-in rule set
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Masks PII-shaped substrings in `text`
    pub fn redact(&self, text: &str) -> String {
        let mut output = text.to_string();

        for rule in default_rules() {
            output = apply_rule(rule, &output);
        }

        output
    }
}

fn apply_rule(rule: &RedactionRule, text: &str) -> String {
    let match_count = rule.regex.find_iter(text).count();
    if match_count == 0 {
        return text.to_string();
    }

    tracing::trace!(rule = rule.name, matches = match_count, "Applying redaction rule");

    rule.regex
        .replace_all(text, rule.replacement)
        .into_owned()
}

/// Convenience wrapper around [`RedactionEngine::redact`]
pub fn redact(text: &str) -> String {
    RedactionEngine::new().redact(text)
}
