use std::fmt::Display;

use rand::Rng;

/// Six digit account verification code, drawn once at signup and immutable
/// afterwards (there is no resend or regeneration path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationCode(i64);

impl VerificationCode {
    pub const MIN: i64 = 100_000;
    pub const MAX: i64 = 999_999;

    pub fn random() -> Self {
        Self(rand::rng().random_range(Self::MIN..=Self::MAX))
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Compares caller supplied input against this code.
    ///
    /// The comparison reads the longest leading (optionally signed) digit
    /// run, so trailing junk after the digits is ignored; input with no
    /// leading digits can never match.
    pub fn matches(self, submitted: &str) -> bool {
        parse_leading_int(submitted)
            .map(|code| code == self.0)
            .unwrap_or(false)
    }
}

fn parse_leading_int(input: &str) -> Option<i64> {
    let input = input.trim_start();
    let (sign, rest) = match input.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, input.strip_prefix('+').unwrap_or(input)),
    };

    let digit_run_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    // absurdly long digit runs overflow i64 and cannot match any stored code
    rest[..digit_run_len]
        .parse::<i64>()
        .ok()
        .map(|n| sign * n)
}

/// Stored codes read back from the database.
impl From<i64> for VerificationCode {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_always_six_digits() {
        for _ in 0..10_000 {
            let code = VerificationCode::random().value();
            assert!((VerificationCode::MIN..=VerificationCode::MAX).contains(&code));
        }
    }

    #[test]
    fn matches_on_exact_input() {
        let code = VerificationCode::from(123456);
        assert!(code.matches("123456"));
        assert!(code.matches("  123456  "));
        assert!(!code.matches("123457"));
    }

    #[test]
    fn matches_on_leading_digit_run() {
        let code = VerificationCode::from(123456);
        assert!(code.matches("123456abc"));
        assert!(code.matches("123456.7"));
        assert!(code.matches("+123456"));
        assert!(!code.matches("12345"));
        assert!(!code.matches("1234567"));
    }

    #[test]
    fn never_matches_without_leading_digits() {
        let code = VerificationCode::from(123456);
        assert!(!code.matches("abcdef"));
        assert!(!code.matches("abc123456"));
        assert!(!code.matches(""));
        assert!(!code.matches("999999999999999999999999"));
    }
}
