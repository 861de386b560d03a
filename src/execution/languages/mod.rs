//! Language profiles
//!
//! Every supported language maps to exactly one [`LanguageProfile`]: the image
//! the sandbox is created from, the shell command that compiles and runs the
//! submission, and the default wall-clock budget.

pub mod cpp;
pub mod java;
pub mod python;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported submission languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Java,
    Python,
}

/// Builds the single `/bin/sh -c` command for a submission and optional stdin
pub type CommandBuilder = fn(code: &str, stdin: Option<&str>) -> String;

/// Static description of how one language is executed
#[derive(Debug)]
pub struct LanguageProfile {
    pub language: Language,
    pub image: &'static str,
    pub timeout_ms: u64,
    builder: CommandBuilder,
}

/// Returned when a language identifier has no profile
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub const ALL: [Language; 3] = [Language::Cpp, Language::Java, Language::Python];

    /// Identifier used on the wire and in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Python => "python",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::Java => "Java",
            Language::Python => "Python",
        }
    }

    pub fn profile(&self) -> &'static LanguageProfile {
        match self {
            Language::Cpp => &cpp::PROFILE,
            Language::Java => &java::PROFILE,
            Language::Python => &python::PROFILE,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

impl LanguageProfile {
    pub(crate) const fn new(
        language: Language,
        image: &'static str,
        timeout_ms: u64,
        builder: CommandBuilder,
    ) -> Self {
        Self {
            language,
            image,
            timeout_ms,
            builder,
        }
    }

    /// Shell command that runs `code`, feeding `stdin` when it is non-empty
    pub fn command(&self, code: &str, stdin: &str) -> String {
        let stdin = (!stdin.is_empty()).then_some(stdin);
        (self.builder)(code, stdin)
    }
}

/// Look up the profile for a language identifier
pub fn resolve(language_id: &str) -> Result<&'static LanguageProfile, UnsupportedLanguage> {
    language_id.parse::<Language>().map(|language| language.profile())
}
