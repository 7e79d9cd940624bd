//! CLI logic for the yUML diagram tool.
//!
//! Reads a yUML document from a file or standard input, compiles it with the
//! configured defaults and writes DOT or SVG to a file or standard output.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Read, Write},
};

use log::info;

use yuml::{DiagramBuilder, YumlError, config::DiagramConfig};

/// Run the yUML CLI application
///
/// Command-line diagram settings take precedence over the configuration
/// file; directives inside the document take precedence over both.
///
/// # Errors
///
/// Returns `YumlError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), YumlError> {
    info!(
        input_path:? = args.input,
        output_path:? = args.output,
        dot = args.dot;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let diagram = merge_diagram(args, app_config.diagram());
    let builder = DiagramBuilder::new(app_config.with_diagram(diagram));

    let source = read_source(args.input.as_deref())?;

    let output = if args.dot {
        builder.compile(&source)?.into_string()
    } else {
        builder.render_svg(&source)?
    };

    write_output(args.output.as_deref(), &output)?;

    info!(output_path:? = args.output, bytes = output.len(); "Diagram written");

    Ok(())
}

fn merge_diagram(args: &Args, configured: &DiagramConfig) -> DiagramConfig {
    DiagramConfig::new(
        args.kind
            .clone()
            .or_else(|| configured.kind().map(str::to_string)),
        args.direction
            .clone()
            .or_else(|| configured.direction().map(str::to_string)),
        args.dark || configured.dark(),
    )
}

fn read_source(input: Option<&str>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(output: Option<&str>, content: &str) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, content),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()
        }
    }
}
