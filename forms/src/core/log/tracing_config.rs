// Copyright (c) 2026 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "r3bl_forms_log.txt";

/// Where the display layer writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

/// Which layers get created by [`crate::try_create_layers`]. The [`String`] is the path
/// of the log file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum WriterConfig {
    #[default]
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

/// Configuration for the tracing subscriber. Logging is **disabled** when the level
/// filter is [`LevelFilter::OFF`].
///
/// Anything that converts into this type can be passed to
/// [`crate::try_initialize_logging_global`] and
/// [`crate::try_initialize_logging_thread_local`], and two configs can be merged with
/// `+`:
///
/// ```
/// use r3bl_forms::{DisplayPreference, TracingConfig, WriterConfig};
///
/// let config: TracingConfig = tracing_core::LevelFilter::INFO.into();
/// let config = config + DisplayPreference::Stderr.into();
///
/// assert_eq!(
///     config.get_writer_config(),
///     WriterConfig::DisplayAndFile(
///         DisplayPreference::Stderr,
///         r3bl_forms::DEFAULT_LOG_FILE_NAME.to_string()
///     )
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracingConfig {
    pub level_filter: LevelFilter,
    pub writer_config: WriterConfig,
}

impl TracingConfig {
    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::OFF,
            writer_config: WriterConfig::None,
        }
    }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            level_filter: level.into(),
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::Display(preferred_display),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

/// The more verbose level filter wins, and the writer configs are merged.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// Merge two [`WriterConfig`]s. When both sides set the same thing, `rhs` wins since
/// it has higher specificity.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            // No collision merge.
            (None, it) | (it, None) => it,
            (Display(dp), File(f)) | (File(f), Display(dp)) => DisplayAndFile(dp, f),

            // Collision (rhs has higher specificity).
            (Display(_), Display(dp)) => Display(dp),
            (File(_), File(f)) => File(f),
            (Display(_) | File(_) | DisplayAndFile(..), DisplayAndFile(dp, f)) => {
                DisplayAndFile(dp, f)
            }
            (DisplayAndFile(_, f), Display(dp)) => DisplayAndFile(dp, f),
            (DisplayAndFile(dp, _), File(f)) => DisplayAndFile(dp, f),
        }
    }
}
