//! Text splitting ahead of word counting.
//!
//! The trainer works on whitespace-delimited words, so whitespace
//! splitting is the default; a custom regex or no splitting at all are
//! available for callers that pre-chunk their own input.

use regex::Regex;
use std::sync::OnceLock;

/// Splitting patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPattern {
    /// Split on runs of whitespace
    #[default]
    Whitespace,
    /// Split on a custom regex pattern
    Custom(&'static str),
    /// No splitting (treat the whole text as one word)
    None,
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splitter {
    pattern: SplitPattern,
}

impl Splitter {
    /// Create a new splitter.
    pub fn new(pattern: SplitPattern) -> Self {
        Self { pattern }
    }

    /// Create a whitespace splitter.
    pub fn whitespace() -> Self {
        Self::new(SplitPattern::Whitespace)
    }

    /// Split text into words.
    ///
    /// Empty fragments are dropped in every mode; whitespace-only input
    /// yields no words.
    pub fn split(&self, text: &str) -> Vec<String> {
        match self.pattern {
            SplitPattern::Whitespace => {
                text.split_whitespace().map(|s| s.to_string()).collect()
            }
            SplitPattern::Custom(pattern) => {
                static RE: OnceLock<Regex> = OnceLock::new();
                let re = RE.get_or_init(|| Regex::new(pattern).expect("invalid split pattern"));
                re.split(text)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string())
                    .collect()
            }
            SplitPattern::None => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![text.to_string()]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_split() {
        let splitter = Splitter::whitespace();
        assert_eq!(
            splitter.split("tall  fast\ntaller"),
            vec!["tall", "fast", "taller"]
        );
    }

    #[test]
    fn test_whitespace_split_empty() {
        let splitter = Splitter::whitespace();
        assert_eq!(splitter.split("   "), Vec::<String>::new());
    }

    #[test]
    fn test_no_split() {
        let splitter = Splitter::new(SplitPattern::None);
        assert_eq!(splitter.split("tall fast"), vec!["tall fast"]);
        assert_eq!(splitter.split(""), Vec::<String>::new());
    }

    #[test]
    fn test_custom_split() {
        let splitter = Splitter::new(SplitPattern::Custom(r"[,;]"));
        assert_eq!(splitter.split("tall,fast;;taller"), vec!["tall", "fast", "taller"]);
    }
}
