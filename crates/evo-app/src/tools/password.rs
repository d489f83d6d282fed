//! Password strength check for `/pw`.
//!
//! Scores one point per satisfied rule (length, upper, lower, digit,
//! symbol) and returns a tip for each missed one.

use std::sync::LazyLock;

use regex::Regex;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Z]").expect("static regex"));
static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-z]").expect("static regex"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("static regex"));
static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^A-Za-z0-9]").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    /// 0 through 5.
    pub score: u8,
    /// One tip per missed rule.
    pub tips: Vec<&'static str>,
}

pub fn score(password: &str) -> StrengthReport {
    let mut score = 0;
    let mut tips = Vec::new();

    let rules: [(bool, &'static str); 5] = [
        (password.len() >= 8, "Use 8+ characters"),
        (UPPERCASE.is_match(password), "Add an uppercase letter"),
        (LOWERCASE.is_match(password), "Add a lowercase letter"),
        (DIGIT.is_match(password), "Add a number"),
        (SYMBOL.is_match(password), "Add a symbol"),
    ];

    for (passed, tip) in rules {
        if passed {
            score += 1;
        } else {
            tips.push(tip);
        }
    }

    StrengthReport { score, tips }
}
