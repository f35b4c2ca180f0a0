//! Configuration error types.

/// Error type for configuration loading and logger construction checks.
#[derive(Debug)]
pub enum ConfigError {
    /// The log file path is empty; it has no sensible default once set.
    EmptyFilePath,
    /// I/O error reading the settings file.
    Io(std::io::Error),
    /// TOML syntax or type error, including negative rotation thresholds.
    Parse(toml::de::Error),
    /// An environment override that does not parse as its field's type.
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFilePath => write!(f, "log file path is empty"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::InvalidValue { key, value } => write!(f, "invalid value for {key}: '{value}'"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::EmptyFilePath | Self::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}
