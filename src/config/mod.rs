//! Collaborator-facing settings: a TOML document with `[system]` and
//! `[access]` tables, overridden per field by environment variables, turned
//! into one configured `LoggerBuilder` per channel.
//!
//! Kept apart from the builder so the logging core never reads files or the
//! environment on its own.

mod error;
mod structs;

pub use error::ConfigError;
pub use structs::ChannelSettings;

use crate::internal;
use crate::logger::{LoggerBuilder, LoggerKind, LoggingConfig};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Prefix of every override, e.g. `USERMGMT_LOG_ACCESS_LEVEL`.
pub const ENV_PREFIX: &str = "USERMGMT_LOG";

/// The access channel gets its own file unless configured otherwise.
pub const DEFAULT_ACCESS_FILE: &str = "access.log";

/// An empty document is valid and yields the channel defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub system: ChannelSettings,
    pub access: ChannelSettings,
}

impl Settings {
    /// # Errors
    /// TOML syntax errors, unknown keys, or values of the wrong type.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// # Errors
    /// The file cannot be read or does not parse.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let settings = Self::from_toml(&content)?;
        internal::debug(
            "CONFIG",
            &format!("Settings loaded from {}", path.display()),
        );
        Ok(settings)
    }

    /// Startup entry point: the file if one is given and exists, then the
    /// process environment on top.
    ///
    /// # Errors
    /// Unreadable or malformed file, or an override that does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match path {
            Some(p) if p.exists() => Self::load_from(p)?,
            Some(p) => {
                internal::debug(
                    "CONFIG",
                    &format!("{} not found, using defaults", p.display()),
                );
                Self::default()
            }
            None => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    /// # Errors
    /// An override that does not parse as its field's type.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `USERMGMT_LOG_<CHANNEL>_<FIELD>` values from `lookup`.
    /// Taking the lookup as a function keeps tests away from process-global state.
    ///
    /// # Errors
    /// `InvalidValue` for numbers or booleans that do not parse.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        for kind in LoggerKind::all() {
            let prefix = format!("{ENV_PREFIX}_{}", kind.as_str().to_uppercase());
            let var = |field: &str| {
                let key = format!("{prefix}_{field}");
                lookup(&key).map(|value| (key, value))
            };
            let channel = self.channel_mut(kind);

            if let Some((_, v)) = var("FILE") {
                channel.file = Some(v);
            }
            if let Some((_, v)) = var("FORMAT") {
                channel.format = Some(v);
            }
            if let Some((_, v)) = var("LEVEL") {
                channel.level = Some(v);
            }
            if let Some((key, v)) = var("MAX_SIZE_MB") {
                channel.max_size_mb = Some(parse_number(key, &v)?);
            }
            if let Some((key, v)) = var("MAX_BACKUPS") {
                channel.max_backups = Some(parse_number(key, &v)?);
            }
            if let Some((key, v)) = var("MAX_AGE_DAYS") {
                channel.max_age_days = Some(parse_number(key, &v)?);
            }
            if let Some((key, v)) = var("CALLER") {
                channel.caller = Some(parse_bool(key, &v)?);
            }
            if let Some((key, v)) = var("COMPRESS") {
                channel.compress = Some(parse_bool(key, &v)?);
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn channel(&self, kind: LoggerKind) -> &ChannelSettings {
        match kind {
            LoggerKind::System => &self.system,
            LoggerKind::Access => &self.access,
        }
    }

    const fn channel_mut(&mut self, kind: LoggerKind) -> &mut ChannelSettings {
        match kind {
            LoggerKind::System => &mut self.system,
            LoggerKind::Access => &mut self.access,
        }
    }

    /// A builder preloaded with this channel's settings. The system channel
    /// captures call sites by default; the access channel logs to its own file.
    #[must_use]
    pub fn builder(&self, kind: LoggerKind) -> LoggerBuilder {
        let mut builder = LoggerBuilder::new();
        builder.kind(kind);
        match kind {
            LoggerKind::System => builder.capture_caller(true),
            LoggerKind::Access => builder.file_path(DEFAULT_ACCESS_FILE),
        };

        let channel = self.channel(kind);
        if let Some(file) = &channel.file {
            // An explicitly empty path is kept so construction can reject it
            builder.file_path(shellexpand::tilde(file).into_owned());
        }
        if let Some(format) = &channel.format {
            builder.format(format);
        }
        if let Some(level) = &channel.level {
            if level.parse::<crate::Level>().is_err() {
                internal::warn(
                    "CONFIG",
                    &format!("Unknown {kind} level '{level}', falling back to debug"),
                );
            }
            builder.level(level);
        }
        if let Some(size) = channel.max_size_mb {
            builder.max_size_mb(size);
        }
        if let Some(count) = channel.max_backups {
            builder.max_backups(count);
        }
        if let Some(days) = channel.max_age_days {
            builder.max_age_days(days);
        }
        if let Some(caller) = channel.caller {
            builder.capture_caller(caller);
        }
        if let Some(compress) = channel.compress {
            builder.compress_backups(compress);
        }
        builder
    }

    /// Frozen configuration for `kind`, ready for the registry.
    #[must_use]
    pub fn logging_config(&self, kind: LoggerKind) -> LoggingConfig {
        self.builder(kind).build()
    }
}

fn parse_number(key: String, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

fn parse_bool(key: String, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
