//! Compiler configuration
//!
//! `defaults/sqlfluent.default.toml` is embedded into the crate so that the documented defaults
//! and runtime behavior stay in sync. Callers layer their own files and overrides on top of
//! those defaults via [`Loader`] before deserializing into [`CompilerConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::sqlfluent::codegen::{GenerationMode, GeneratorOptions};
use crate::sqlfluent::parsing::RecoveryMode;

const DEFAULT_TOML: &str = include_str!("../../../defaults/sqlfluent.default.toml");

/// Top-level configuration consumed by the [`Compiler`](super::Compiler).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompilerConfig {
    pub parsing: ParsingConfig,
    pub generation: GenerationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParsingConfig {
    pub recovery: RecoveryMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationConfig {
    pub mode: GenerationMode,
    pub emit_runtime: bool,
}

/// Names written into the generated program and its source map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub generated_file: String,
    pub source_file: String,
    pub include_sources_content: bool,
}

impl CompilerConfig {
    /// Validation builds: first syntax error stops everything, no partial output.
    pub fn strict() -> Self {
        Self {
            parsing: ParsingConfig {
                recovery: RecoveryMode::Strict,
            },
            generation: GenerationConfig {
                mode: GenerationMode::FailFast,
                emit_runtime: false,
            },
            output: OutputConfig::default(),
        }
    }

    /// Editors and other tooling: every broken line reported, partial output kept.
    pub fn tooling() -> Self {
        Self {
            parsing: ParsingConfig {
                recovery: RecoveryMode::Resync,
            },
            generation: GenerationConfig {
                mode: GenerationMode::BestEffort,
                emit_runtime: false,
            },
            output: OutputConfig::default(),
        }
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            mode: self.generation.mode,
            emit_runtime: self.generation.emit_runtime,
            generated_file: self.output.generated_file.clone(),
            source_file: self.output.source_file.clone(),
            include_sources_content: self.output.include_sources_content,
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            generated_file: "codegen.js".to_string(),
            source_file: "query.sql".to_string(),
            include_sources_content: true,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CompilerConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CompilerConfig, ConfigError> {
    Loader::new().build()
}
