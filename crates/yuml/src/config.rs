//! Configuration types for yUML diagram compilation.
//!
//! All types implement [`serde::Deserialize`], so a configuration can be
//! loaded from TOML or any other serde format.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`DiagramConfig`] - Diagram type, direction and palette a document
//!   starts from. Directives inside the document override the first two.
//! - [`HeaderOverrides`] - Extra attributes merged into the DOT header.
//! - [`RenderConfig`] - Layout engine used to turn DOT into SVG.
//!
//! # Example
//!
//! ```
//! # use yuml::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.diagram().compile_options().is_ok());
//! assert_eq!(config.render().engine(), "dot");
//! ```

use serde::Deserialize;

use yuml_core::diagram::{DiagramKind, Direction};
use yuml_parser::{
    CompileOptions,
    error::{Diagnostic, ErrorCode},
};

pub use yuml_core::dot::HeaderOverrides;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagram defaults.
    #[serde(default)]
    diagram: DiagramConfig,

    /// DOT header overrides, ignored by sequence diagrams.
    #[serde(default)]
    dot_header: HeaderOverrides,

    /// External rendering settings.
    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    pub fn new(diagram: DiagramConfig, dot_header: HeaderOverrides, render: RenderConfig) -> Self {
        Self {
            diagram,
            dot_header,
            render,
        }
    }

    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }

    pub fn dot_header(&self) -> &HeaderOverrides {
        &self.dot_header
    }

    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns a copy with the diagram section replaced.
    pub fn with_diagram(mut self, diagram: DiagramConfig) -> Self {
        self.diagram = diagram;
        self
    }
}

/// Defaults a document starts from.
///
/// `type` and `direction` are kept as written and validated when a document
/// is compiled, so that a bad value is reported like any other diagnostic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagramConfig {
    /// Diagram type; class diagrams when unset.
    #[serde(default, rename = "type")]
    kind: Option<String>,

    /// `TB`, `LR` or `RL` (or the directive spellings); top-down when unset.
    #[serde(default)]
    direction: Option<String>,

    /// Draw white lines and text on a transparent background.
    #[serde(default)]
    dark: bool,
}

impl DiagramConfig {
    pub fn new(kind: Option<String>, direction: Option<String>, dark: bool) -> Self {
        Self {
            kind,
            direction,
            dark,
        }
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    pub fn dark(&self) -> bool {
        self.dark
    }

    /// Resolves the configured type and direction.
    ///
    /// # Errors
    ///
    /// Returns an `E201` diagnostic for an unknown type and an `E202`
    /// diagnostic for an unknown direction.
    pub fn compile_options(&self) -> Result<CompileOptions, Diagnostic> {
        let mut options = CompileOptions::default();

        if let Some(kind) = &self.kind {
            let kind = kind.parse::<DiagramKind>().map_err(|err| {
                let valid: Vec<&str> = DiagramKind::ALL.iter().map(|kind| kind.as_str()).collect();
                Diagnostic::error(format!("invalid diagram type `{}`", err.value()))
                    .with_code(ErrorCode::E201)
                    .with_help(format!("valid types: {}", valid.join(", ")))
            })?;
            options.kind = Some(kind);
        }

        if let Some(direction) = &self.direction {
            options.direction = direction.parse::<Direction>().map_err(|err| {
                Diagnostic::error(format!("invalid direction `{}`", err.value()))
                    .with_code(ErrorCode::E202)
                    .with_help("valid directions: TB, LR, RL")
            })?;
        }

        Ok(options)
    }
}

/// Settings of the external layout engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Graphviz layout engine (`dot`, `neato`, `fdp`, ...).
    #[serde(default = "default_engine")]
    engine: String,
}

impl RenderConfig {
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
        }
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
        }
    }
}

fn default_engine() -> String {
    "dot".to_string()
}
