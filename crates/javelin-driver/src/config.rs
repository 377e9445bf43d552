use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use javelin_convert::ExceptionTable;
use javelin_syntax::LanguageLevel;
use serde::{Deserialize, Deserializer};

/// Looked up in the working directory when no file is given.
pub const CONFIG_FILE: &str = "javelin.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read `{path}`")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How files are handed to the front-end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One `parse_batch` call, falling back to single files if it fails.
    #[default]
    Batch,
    Single,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "batch" => Ok(Self::Batch),
            "single" => Ok(Self::Single),
            _ => Err(format!("unknown mode `{s}`, expected `batch` or `single`")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Batch => "batch",
            Self::Single => "single",
        })
    }
}

/// Contents of `javelin.toml`.
///
/// ```toml
/// language_level = "17"
/// mode = "single"
///
/// [[exceptions]]
/// front_end = "javelin-java"
/// version = "*"
/// ignored = ["switch-not-exhaustive"]
/// ```
///
/// Listing any `[[exceptions]]` replaces the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, deserialize_with = "language_level")]
    pub language_level: LanguageLevel,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_exceptions")]
    pub exceptions: Vec<ExceptionTable>,
}

impl Default for Config {
    fn default() -> Self {
        Self { language_level: LanguageLevel::default(), mode: Mode::default(), exceptions: default_exceptions() }
    }
}

impl Config {
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
        let config = text.parse()?;
        tracing::debug!(%path, ?config, "loaded configuration");
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn default_exceptions() -> Vec<ExceptionTable> {
    vec![ExceptionTable::default()]
}

/// Accepts `17`, `"17"` and `"1.4"`.
fn language_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LanguageLevel, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u16),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(major) => Ok(LanguageLevel::new(major)),
        Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use javelin_frontend::ProblemId;

    use super::*;

    #[test]
    fn empty_file_is_the_default() {
        assert_eq!("".parse::<Config>().unwrap(), Config::default());
        assert_eq!(Config::default().exceptions, [ExceptionTable::default()]);
    }

    #[test]
    fn full_file() {
        let config: Config = r#"
            language_level = "1.4"
            mode = "single"

            [[exceptions]]
            front_end = "other"
            version = "3.0"
            ignored = ["syntax-error"]
        "#
        .parse()
        .unwrap();

        assert_eq!(config.language_level, LanguageLevel::JAVA_1_4);
        assert_eq!(config.mode, Mode::Single);
        assert_eq!(config.exceptions.len(), 1);
        assert_eq!(config.exceptions[0].ignored, [ProblemId::SyntaxError]);
    }

    #[test]
    fn numeric_level() {
        let config: Config = "language_level = 8".parse().unwrap();
        assert_eq!(config.language_level, LanguageLevel::JAVA_8);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!("mode = \"parallel\"".parse::<Config>(), Err(ConfigError::Parse(_))));
        assert!(matches!("language_level = \"java\"".parse::<Config>(), Err(ConfigError::Parse(_))));
        assert!(matches!("verbose = true".parse::<Config>(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file() {
        let error = Config::load(Utf8Path::new("does/not/exist/javelin.toml")).unwrap_err();
        assert_eq!(error.to_string(), "failed to read `does/not/exist/javelin.toml`");
    }

    #[test]
    fn mode_round_trips_through_text() {
        assert_eq!("single".parse::<Mode>(), Ok(Mode::Single));
        assert_eq!(Mode::Batch.to_string(), "batch");
        assert!("both".parse::<Mode>().is_err());
    }
}
