//! Redaction pattern library
//!
//! The four rules below are applied as independent sequential passes over the
//! whole input, in the order they appear here. The name rule is a heuristic,
//! not a dictionary lookup: it will both over- and under-mask, trading
//! precision for recall of personally identifying text.

use regex::Regex;
use std::sync::OnceLock;

/// Two-character glyph written over the masked part of a name.
pub const NAME_MASK: &str = "○○";

/// A compiled redaction rule
#[derive(Debug)]
pub struct RedactionRule {
    /// Short label used in logs (never the matched text)
    pub name: &'static str,

    /// Compiled pattern
    pub regex: Regex,

    /// Replacement template
    pub replacement: &'static str,
}

static RULES: OnceLock<Vec<RedactionRule>> = OnceLock::new();

/// Returns the built-in rule set, compiled once per process.
pub fn default_rules() -> &'static [RedactionRule] {
    RULES.get_or_init(compile_rules).as_slice()
}

fn compile_rules() -> Vec<RedactionRule> {
    vec![
        // Name-like token: 1-2 ideographic/syllabic characters followed by
        // 1-3 more of the same class. The leading run survives, the rest is
        // masked.
        RedactionRule {
            name: "person_name",
            regex: compile(r"([一-龯ぁ-んァ-ヶー]{1,2})([一-龯ぁ-んァ-ヶー]{1,3})"),
            replacement: "${1}○○",
        },
        // Phone-shaped digit groups with optional separators; only the final
        // 4-digit group survives.
        RedactionRule {
            name: "phone_number",
            regex: compile(r"(\d{2,4})-?(\d{2,4})-?(\d{4})"),
            replacement: "***-****-${3}",
        },
        // Email-shaped token; only the domain survives.
        RedactionRule {
            name: "email_address",
            regex: compile(r"([a-zA-Z0-9._-]+)@([a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+)"),
            replacement: "***@${2}",
        },
        // Block/lot/unit address fragment; the literal separators survive,
        // the lot and unit numbers are masked.
        RedactionRule {
            name: "street_address",
            regex: compile(r"(\d+)丁目(\d+)番地?(\d+)号?"),
            replacement: "${1}丁目○番地○号",
        },
    ]
}

fn compile(pattern: &str) -> Regex {
    // The rule set is static; an invalid pattern is a programming error
    // caught by the tests below.
    Regex::new(pattern).expect("built-in redaction pattern is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_compile() {
        let rules = default_rules();
        assert_eq!(rules.len(), 4);
    }

    #[test]
    fn test_name_rule_uses_mask_glyph() {
        let rule = &default_rules()[0];
        assert!(rule.replacement.ends_with(NAME_MASK));
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = default_rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "person_name",
                "phone_number",
                "email_address",
                "street_address"
            ]
        );
    }

    #[test]
    fn test_phone_pattern_matches() {
        let rule = &default_rules()[1];
        assert!(rule.regex.is_match("090-1234-5678"));
        assert!(rule.regex.is_match("0312345678"));
        assert!(!rule.regex.is_match("12-34"));
    }

    #[test]
    fn test_email_pattern_matches() {
        let rule = &default_rules()[2];
        assert!(rule.regex.is_match("taro.yamada@example.com"));
        assert!(!rule.regex.is_match("not-an-email"));
    }

    #[test]
    fn test_address_rule_in_isolation() {
        let rule = &default_rules()[3];
        assert_eq!(
            rule.regex.replace_all("1丁目2番地3号", rule.replacement),
            "1丁目○番地○号"
        );
        // 番 without 地 and a missing 号 still match
        assert_eq!(
            rule.regex.replace_all("4丁目56番7", rule.replacement),
            "4丁目○番地○号"
        );
    }
}
