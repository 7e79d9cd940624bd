//! Rendering of DOT documents into SVG by an external layout engine.
//!
//! The builder never lays out graphs itself. It hands the DOT document to a
//! [`DotRenderer`]; with the `graphviz` feature enabled,
//! [`GraphvizRenderer`] runs the Graphviz executables found on `PATH`.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Errors raised while turning a DOT document into SVG.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no layout engine available; enable the `graphviz` feature or set a renderer")]
    Unavailable,

    #[error("layout engine `{engine}` failed: {message}")]
    Engine { engine: String, message: String },

    #[error("layout engine produced invalid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// Lays out a DOT document and draws it as SVG.
///
/// Implementations must be shareable across threads, so that one
/// [`DiagramBuilder`](crate::DiagramBuilder) can serve concurrent callers.
pub trait DotRenderer: Send + Sync {
    /// Renders `dot` with the layout engine named `engine` (`dot`, `neato`,
    /// ...) and returns the SVG document.
    fn render(&self, dot: &str, engine: &str) -> Result<String, RenderError>;
}

/// Renderer backed by the Graphviz command-line tools.
#[cfg(feature = "graphviz")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphvizRenderer;

#[cfg(feature = "graphviz")]
impl DotRenderer for GraphvizRenderer {
    fn render(&self, dot: &str, engine: &str) -> Result<String, RenderError> {
        use graphviz_rust::{
            cmd::{CommandArg, Format},
            exec_dot,
        };
        use log::debug;

        debug!(engine, bytes = dot.len(); "Running Graphviz");
        let args = vec![
            CommandArg::Format(Format::Svg),
            CommandArg::Custom(format!("-K{engine}")),
        ];
        let output = exec_dot(dot.to_string(), args).map_err(|err| RenderError::Engine {
            engine: engine.to_string(),
            message: err.to_string(),
        })?;

        Ok(String::from_utf8(output)?)
    }
}
