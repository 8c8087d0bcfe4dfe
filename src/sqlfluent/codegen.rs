//! Code generation
//!
//!     Turns a [`Program`] into an executable JavaScript program plus a source map pointing
//!     back at the query text.
//!
//!         1. [templates] renders every node into a positioned [`Fragment`].
//!         2. [fragment] flattens the fragment tree into text and [`Mapping`]s.
//!         3. [source_map] encodes the mappings as a source map v3 document.
//!
//!     The runtime [prelude] can be emitted ahead of the program so the output runs without
//!     any other file.
//!
//! Generation modes
//!
//!     Fail-fast returns no text as soon as any node failed to render. Best-effort keeps the
//!     partial output: failed nodes are left empty, everything else is rendered, and the errors
//!     are returned next to the text.

pub mod error;
pub mod fragment;
pub mod prelude;
pub mod source_map;
pub mod templates;
pub mod vlq;

pub use error::GenerationError;
pub use fragment::{Chunk, FlatOutput, Fragment, Mapping};
pub use source_map::{SourceMap, SourceMapError};
pub use templates::{render, RenderContext};

use serde::{Deserialize, Serialize};

use crate::sqlfluent::ast::{NodeRef, Program};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationMode {
    #[default]
    FailFast,
    BestEffort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub mode: GenerationMode,
    pub emit_runtime: bool,
    /// Name of the generated file, used by the `sourceMappingURL` marker and the map's `file`
    pub generated_file: String,
    /// Name the map uses for the query source
    pub source_file: String,
    pub include_sources_content: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            mode: GenerationMode::FailFast,
            emit_runtime: false,
            generated_file: "codegen.js".to_string(),
            source_file: "query.sql".to_string(),
            include_sources_content: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOutput {
    pub source: Option<String>,
    pub map: Option<SourceMap>,
    pub errors: Vec<GenerationError>,
}

impl GeneratorOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// The complete fragment tree for `program`, runtime included when requested
    pub fn fragment(&self, program: &Program) -> (Fragment, Vec<GenerationError>) {
        let mut ctx = RenderContext::new(&self.options.generated_file);
        let program_fragment = render(NodeRef::Program(program), &mut ctx);

        let fragment = if self.options.emit_runtime {
            Fragment::unpositioned()
                .child(prelude::runtime_fragment())
                .child(program_fragment)
        } else {
            program_fragment
        };

        (fragment, ctx.into_errors())
    }

    /// Generate the program text and its source map.
    ///
    /// `source_text` is the query the program was compiled from; it is embedded in the map
    /// when sources content is enabled.
    pub fn generate(&self, program: &Program, source_text: &str) -> GeneratorOutput {
        let (fragment, errors) = self.fragment(program);

        if !errors.is_empty() {
            tracing::warn!(count = errors.len(), mode = ?self.options.mode, "generation reported errors");
            if self.options.mode == GenerationMode::FailFast {
                return GeneratorOutput {
                    source: None,
                    map: None,
                    errors,
                };
            }
        }

        let flat = fragment.flatten();
        let content = self
            .options
            .include_sources_content
            .then_some(source_text);
        let map = SourceMap::new(
            self.options.generated_file.as_str(),
            self.options.source_file.as_str(),
            content,
            &flat.mappings,
        );
        tracing::debug!(
            bytes = flat.text.len(),
            mappings = flat.mappings.len(),
            "generated program"
        );

        GeneratorOutput {
            source: Some(flat.text),
            map: Some(map),
            errors,
        }
    }
}
