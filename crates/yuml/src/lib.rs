//! yUML - compile yUML diagrams into Graphviz DOT or SVG.
//!
//! Class, use-case, activity, state, deployment and package diagrams compile
//! into a DOT document that an external layout engine turns into SVG.
//! Sequence diagrams are laid out and drawn as SVG directly.

pub mod config;
pub mod render;

mod embed;
mod error;
mod export;
mod layout;

pub use yuml_core::{color, diagram};

pub use embed::embed_images;
pub use error::YumlError;

use log::{debug, info, trace};

use yuml_core::dot::DotWriter;
use yuml_parser::{Compilation, dialect::Artifact};

use config::AppConfig;
use render::{DotRenderer, RenderError};

/// The document rendered for an input without instructions.
pub const EMPTY_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#;

/// What a document compiles into without the external layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// A Graphviz document, for graph diagrams.
    Dot(String),
    /// A finished drawing, for sequence diagrams and empty documents.
    Svg(String),
}

impl Output {
    pub fn as_str(&self) -> &str {
        match self {
            Output::Dot(text) | Output::Svg(text) => text,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Output::Dot(text) | Output::Svg(text) => text,
        }
    }
}

/// Builder for compiling and rendering yUML diagrams.
///
/// Holds only configuration and a thread-safe renderer, so one builder can
/// compile any number of documents, from several threads at once.
///
/// # Examples
///
/// ```rust,no_run
/// use yuml::{DiagramBuilder, config::AppConfig};
///
/// let source = "// {type:class}\n[Customer]<>1-*>[Order]";
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // DOT for the layout engine
/// let dot = builder.to_dot(source).expect("Failed to compile");
///
/// // Or straight to SVG through the configured renderer
/// let svg = builder.render_svg(source).expect("Failed to render");
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
pub struct DiagramBuilder {
    config: AppConfig,
    renderer: Option<Box<dyn DotRenderer>>,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// With the `graphviz` feature the builder renders through
    /// [`GraphvizRenderer`](render::GraphvizRenderer); otherwise it has no
    /// renderer until one is set with [`with_renderer`](Self::with_renderer).
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            renderer: default_renderer(),
        }
    }

    /// Replaces the renderer used for graph diagrams.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yuml::{DiagramBuilder, render::{DotRenderer, RenderError}};
    ///
    /// struct Echo;
    ///
    /// impl DotRenderer for Echo {
    ///     fn render(&self, dot: &str, _engine: &str) -> Result<String, RenderError> {
    ///         Ok(format!("<svg><!-- {} bytes --></svg>", dot.len()))
    ///     }
    /// }
    ///
    /// let builder = DiagramBuilder::default().with_renderer(Echo);
    /// let svg = builder.render_svg("[A]-[B]").unwrap();
    /// assert!(svg.starts_with("<svg>"));
    /// ```
    pub fn with_renderer(mut self, renderer: impl DotRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compiles a document with the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns `YumlError::Parse` for an invalid configured type or
    /// direction, a missing diagram type, or a malformed line.
    pub fn parse(&self, source: &str) -> Result<Compilation, YumlError> {
        let options = self
            .config
            .diagram()
            .compile_options()
            .map_err(|diagnostic| YumlError::new_parse_error(diagnostic.into(), ""))?;

        info!(kind:? = options.kind, direction = options.direction.rankdir(); "Parsing diagram");
        let compilation = yuml_parser::compile(source, &options)
            .map_err(|err| YumlError::new_parse_error(err, source))?;

        debug!(
            kind:? = compilation.kind,
            warnings = compilation.warnings.len();
            "Diagram parsed successfully"
        );
        trace!(artifact:? = compilation.artifact; "Compiled artifact");

        Ok(compilation)
    }

    /// Compiles a document as far as possible without the layout engine.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yuml::{DiagramBuilder, Output};
    ///
    /// let builder = DiagramBuilder::default();
    ///
    /// let Output::Dot(dot) = builder.compile("[Customer]-[Order]").unwrap() else {
    ///     unreachable!("class diagrams compile into DOT");
    /// };
    /// assert!(dot.starts_with("digraph G {"));
    ///
    /// let sequence = "// {type:sequence}\n[Patron]order food>[Waiter]";
    /// assert!(matches!(builder.compile(sequence).unwrap(), Output::Svg(_)));
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse).
    pub fn compile(&self, source: &str) -> Result<Output, YumlError> {
        let compilation = self.parse(source)?;
        let dark = self.config.diagram().dark();

        let output = match compilation.artifact {
            Artifact::Empty => Output::Svg(EMPTY_SVG.to_string()),
            Artifact::Graph(graph) => {
                let writer = DotWriter::new(dark, self.config.dot_header().clone());
                Output::Dot(writer.write(&graph))
            }
            Artifact::Sequence(model) => Output::Svg(export::sequence::render(&model, dark)),
        };

        debug!(bytes = output.as_str().len(); "Diagram compiled");
        Ok(output)
    }

    /// Compiles a graph diagram into a DOT document.
    ///
    /// # Errors
    ///
    /// Returns `YumlError::NotAGraph` for sequence diagrams and empty
    /// documents, otherwise the same errors as [`parse`](Self::parse).
    pub fn to_dot(&self, source: &str) -> Result<String, YumlError> {
        match self.compile(source)? {
            Output::Dot(dot) => Ok(dot),
            Output::Svg(_) => Err(YumlError::NotAGraph),
        }
    }

    /// Compiles and renders a document to SVG.
    ///
    /// Graph diagrams go through the renderer, after which embedded images
    /// such as use-case actors are drawn in.
    ///
    /// # Errors
    ///
    /// Returns `YumlError::Render` when a graph diagram has no renderer or the
    /// renderer fails, otherwise the same errors as [`parse`](Self::parse).
    pub fn render_svg(&self, source: &str) -> Result<String, YumlError> {
        let dot = match self.compile(source)? {
            Output::Svg(svg) => return Ok(svg),
            Output::Dot(dot) => dot,
        };

        let renderer = self.renderer.as_deref().ok_or(RenderError::Unavailable)?;
        let engine = self.config.render().engine();
        info!(engine; "Rendering graph");
        let svg = renderer.render(&dot, engine)?;

        let svg = embed_images(&svg, self.config.diagram().dark());
        info!("SVG rendered successfully");
        Ok(svg)
    }
}

#[cfg(feature = "graphviz")]
fn default_renderer() -> Option<Box<dyn DotRenderer>> {
    Some(Box::new(render::GraphvizRenderer))
}

#[cfg(not(feature = "graphviz"))]
fn default_renderer() -> Option<Box<dyn DotRenderer>> {
    None
}
