//! Guess normalization and matching.

/// Decides whether a guess names a target identity.
///
/// Both sides are normalized first: lowercased, stripped of everything
/// outside `[a-z0-9]` and whitespace, and with runs of whitespace
/// collapsed to one space (which also trims the ends). After that the
/// strings must be equal; there is no partial or fuzzy matching.
///
/// ```rust
/// use cameo_session::GuessEvaluator;
///
/// assert!(GuessEvaluator::matches("Tom   Cruise!", "tom cruise"));
/// assert!(!GuessEvaluator::matches("Tom Cruis", "Tom Cruise"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessEvaluator;

impl GuessEvaluator {
    pub fn normalize(text: &str) -> String {
        let kept: String = text
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
            .collect();
        kept.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn matches(guess: &str, target: &str) -> bool {
        Self::normalize(guess) == Self::normalize(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(GuessEvaluator::normalize("  Drake \t"), "drake");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(GuessEvaluator::normalize("Robert Downey Jr."), "robert downey jr");
        assert_eq!(GuessEvaluator::normalize("Samuel L. Jackson"), "samuel l jackson");
    }

    #[test]
    fn test_normalize_collapses_inner_whitespace() {
        assert_eq!(GuessEvaluator::normalize("Tom   Cruise"), "tom cruise");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        // "é" is outside [a-z], so both spellings collapse to the same text.
        assert_eq!(GuessEvaluator::normalize("Beyoncé"), "beyonc");
        assert!(GuessEvaluator::matches("BEYONCÉ", "Beyoncé"));
    }

    #[test]
    fn test_matches_ignores_case_punctuation_and_spacing() {
        assert!(GuessEvaluator::matches("Tom   Cruise!", "tom cruise"));
        assert!(GuessEvaluator::matches("drake", "Drake"));
    }

    #[test]
    fn test_matches_requires_full_token_match() {
        assert!(!GuessEvaluator::matches("Tom Cruis", "Tom Cruise"));
        assert!(!GuessEvaluator::matches("Cruise", "Tom Cruise"));
        assert!(!GuessEvaluator::matches("tomcruise", "Tom Cruise"));
    }

    #[test]
    fn test_matches_empty_guess_never_hits_real_name() {
        assert!(!GuessEvaluator::matches("   ", "Drake"));
        assert!(!GuessEvaluator::matches("!!!", "Drake"));
    }
}
