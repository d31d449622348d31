//! Ignore patterns with shell-glob semantics (`*`, `?`, `[...]`)

use glob::Pattern;

use crate::domain::DomainError;

/// Compiled set of ignore globs, matched against bare entry names.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    /// Compile the given globs. Fails on the first malformed pattern.
    pub fn new<I, S>(patterns: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|e| DomainError::InvalidIgnorePattern {
                    pattern: p.to_string(),
                    message: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_star_pattern_when_matching_then_matches_suffix() {
        let set = IgnoreSet::new(["*.pyc"]).unwrap();
        assert!(set.is_ignored("module.pyc"));
        assert!(!set.is_ignored("module.py"));
    }

    #[test]
    fn given_question_and_class_patterns_when_matching_then_follow_shell_rules() {
        let set = IgnoreSet::new(["file?.txt", "[ab]*.log", "[!x]z"]).unwrap();
        assert!(set.is_ignored("file1.txt"));
        assert!(!set.is_ignored("file12.txt"));
        assert!(set.is_ignored("app.log"));
        assert!(set.is_ignored("b.log"));
        assert!(!set.is_ignored("c.log"));
        assert!(set.is_ignored("yz"));
        assert!(!set.is_ignored("xz"));
    }

    #[test]
    fn given_literal_pattern_when_matching_then_matches_dotfiles() {
        let set = IgnoreSet::new([".git", "node_modules"]).unwrap();
        assert!(set.is_ignored(".git"));
        assert!(set.is_ignored("node_modules"));
        assert!(!set.is_ignored(".github"));
    }

    #[test]
    fn given_star_pattern_when_matching_hidden_name_then_matches() {
        let set = IgnoreSet::new(["*"]).unwrap();
        assert!(set.is_ignored(".hidden"));
    }

    #[test]
    fn given_unterminated_class_when_compiling_then_returns_error() {
        let err = IgnoreSet::new(["[abc"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidIgnorePattern { ref pattern, .. } if pattern == "[abc"));
    }

    #[test]
    fn given_empty_set_when_matching_then_nothing_is_ignored() {
        let set = IgnoreSet::empty();
        assert!(set.is_empty());
        assert!(!set.is_ignored("anything"));
    }
}
