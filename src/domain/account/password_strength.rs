//! Heuristic password strength scoring for the sign-up form.
//!
//! One point per satisfied criterion, five in total. The score is a hint
//! for the user, not an acceptance rule.

use serde::Serialize;

pub const MAX_SCORE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => StrengthLevel::Weak,
            3..=4 => StrengthLevel::Medium,
            _ => StrengthLevel::Strong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub level: StrengthLevel,
    pub suggestions: Vec<String>,
}

pub fn evaluate(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    let checks = [
        (len >= 8, "密碼長度至少需要 8 個字元"),
        (len >= 12, "建議使用 12 個字元以上的密碼"),
        (has_lower && has_upper, "請混合使用大小寫字母"),
        (has_digit, "請加入數字"),
        (has_symbol, "請加入特殊符號"),
    ];

    let score = checks.iter().filter(|(ok, _)| *ok).count() as u8;
    let suggestions = checks
        .iter()
        .filter(|(ok, _)| !*ok)
        .map(|(_, hint)| hint.to_string())
        .collect();

    PasswordStrength {
        score,
        level: StrengthLevel::from_score(score),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_password_is_weak() {
        let s = evaluate("");
        assert_eq!(s.score, 0);
        assert_eq!(s.level, StrengthLevel::Weak);
        assert_eq!(s.suggestions.len(), 5);
    }

    #[test]
    fn medium_password() {
        let s = evaluate("Password1");
        // length >= 8, mixed case, digit
        assert_eq!(s.score, 3);
        assert_eq!(s.level, StrengthLevel::Medium);
        assert!(s.suggestions.contains(&"請加入特殊符號".to_string()));
    }

    #[test]
    fn strong_password() {
        let s = evaluate("Correct-Horse-9");
        assert_eq!(s.score, MAX_SCORE);
        assert_eq!(s.level, StrengthLevel::Strong);
        assert!(s.suggestions.is_empty());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 4 CJK chars are 12 bytes but only 4 characters
        assert_eq!(evaluate("密碼密碼").score, 0);
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StrengthLevel::Medium).unwrap(),
            "\"medium\""
        );
    }

    proptest! {
        #[test]
        fn score_and_suggestions_cover_all_criteria(pw in ".{0,40}") {
            let s = evaluate(&pw);
            prop_assert!(s.score <= MAX_SCORE);
            prop_assert_eq!(s.score as usize + s.suggestions.len(), MAX_SCORE as usize);
            prop_assert_eq!(s.level, StrengthLevel::from_score(s.score));
        }
    }
}
