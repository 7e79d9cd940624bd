//! Command-line argument definitions for the yUML CLI.
//!
//! Arguments select the input and output, the diagram defaults a document
//! starts from, the configuration file and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the yUML diagram tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input yUML file; standard input when omitted
    #[arg(help = "Path to the input file (reads stdin when omitted)")]
    pub input: Option<String>,

    /// Path to the output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Diagram type used when the document has no `type` directive
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Layout direction (TB, LR, RL) used when the document has no
    /// `direction` directive
    #[arg(long = "dir", value_name = "DIRECTION")]
    pub direction: Option<String>,

    /// Draw white lines and text on a transparent background
    #[arg(long)]
    pub dark: bool,

    /// Write the DOT document instead of rendering it
    #[arg(long)]
    pub dot: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
