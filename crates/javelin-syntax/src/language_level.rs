//! Java language level.
//!
//! The tokenizer and the reference front-end accept a superset grammar; the
//! level decides which words are keywords and which lexical forms exist.

use std::fmt;
use std::str::FromStr;

/// Java feature release, e.g. `8`, `17`, `21`. Releases before 5 use the
/// minor number of their `1.x` name (`1.4` is `4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageLevel {
    pub major: u16,
}

impl LanguageLevel {
    pub const JAVA_1_4: Self = Self { major: 4 };
    pub const JAVA_5: Self = Self { major: 5 };
    pub const JAVA_8: Self = Self { major: 8 };
    pub const JAVA_11: Self = Self { major: 11 };
    pub const JAVA_17: Self = Self { major: 17 };
    pub const JAVA_21: Self = Self { major: 21 };
    pub const JAVA_23: Self = Self { major: 23 };

    pub const fn new(major: u16) -> Self {
        Self { major }
    }

    pub fn supports(self, feature: Feature) -> bool {
        self.major >= feature.since()
    }
}

impl Default for LanguageLevel {
    fn default() -> Self {
        Self::JAVA_21
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.major < 5 { write!(f, "1.{}", self.major) } else { write!(f, "{}", self.major) }
    }
}

impl FromStr for LanguageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("1.").unwrap_or(s);
        digits
            .parse::<u16>()
            .map(Self::new)
            .map_err(|_| format!("invalid language level `{s}`"))
    }
}

/// Lexical and syntactic features gated by the language level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    AssertKeyword,
    EnumKeyword,
    UnderscoreKeyword,
    LocalVarInference,
    SwitchExpressions,
    TextBlocks,
    Records,
    PatternInstanceof,
    MarkdownDocComments,
}

impl Feature {
    pub const fn since(self) -> u16 {
        match self {
            Self::AssertKeyword => 4,
            Self::EnumKeyword => 5,
            Self::UnderscoreKeyword => 9,
            Self::LocalVarInference => 10,
            Self::SwitchExpressions => 14,
            Self::TextBlocks => 15,
            Self::Records | Self::PatternInstanceof => 16,
            Self::MarkdownDocComments => 23,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_legacy_and_modern_names() {
        assert_eq!("1.4".parse::<LanguageLevel>(), Ok(LanguageLevel::JAVA_1_4));
        assert_eq!("17".parse::<LanguageLevel>(), Ok(LanguageLevel::JAVA_17));
        assert!("seventeen".parse::<LanguageLevel>().is_err());
        assert_eq!(LanguageLevel::JAVA_1_4.to_string(), "1.4");
    }

    #[test]
    fn feature_gates() {
        assert!(!LanguageLevel::JAVA_1_4.supports(Feature::EnumKeyword));
        assert!(LanguageLevel::JAVA_8.supports(Feature::EnumKeyword));
        assert!(!LanguageLevel::JAVA_11.supports(Feature::TextBlocks));
        assert!(LanguageLevel::JAVA_23.supports(Feature::MarkdownDocComments));
    }
}
